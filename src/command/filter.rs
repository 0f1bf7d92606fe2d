//! Filter: expand algebra collections into the host's native primitives.
//!
//! The host program only understands its own collection format. A component
//! tree, however, emits [`SequenceMsg`]/[`BatchMsg`] from arbitrarily deep
//! children. [`filter`] bridges the two through an injected [`Scheduler`].

use super::{compact, BatchMsg, Command, SequenceMsg};
use crate::message::{Msg, NativeMsg};

/// The host's native multi-command execution primitives.
pub trait Scheduler {
    /// Execute `cmds` one after another.
    ///
    /// Returns the message the host uses to carry out the sequence.
    fn sequence(&self, cmds: Vec<Command>) -> Msg;

    /// Execute `cmds` with no ordering guarantee.
    fn batch(&self, cmds: Vec<Command>) -> Msg;
}

/// Scheduler producing [`NativeMsg`] collections for
/// [`Program`](crate::runtime::Program).
///
/// Single commands are wrapped rather than invoked, so filtering never runs
/// user work on the update thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeScheduler;

impl Scheduler for NativeScheduler {
    fn sequence(&self, cmds: Vec<Command>) -> Msg {
        Msg::Native(NativeMsg::Sequence(cmds))
    }

    fn batch(&self, cmds: Vec<Command>) -> Msg {
        Msg::Native(NativeMsg::Batch(cmds))
    }
}

/// Turn a [`SequenceMsg`] or [`BatchMsg`] into the scheduler's native form.
///
/// Collections that are empty once `None`s are dropped resolve to `None`.
/// Every other message is returned unchanged.
pub fn filter<S>(scheduler: &S, msg: Msg) -> Option<Msg>
where
    S: Scheduler + ?Sized,
{
    match msg {
        Msg::Sequence(SequenceMsg(cmds)) => {
            let valid = compact(cmds);
            (!valid.is_empty()).then(|| scheduler.sequence(valid))
        }
        Msg::Batch(BatchMsg(cmds)) => {
            let valid = compact(cmds);
            (!valid.is_empty()).then(|| scheduler.batch(valid))
        }
        other => Some(other),
    }
}

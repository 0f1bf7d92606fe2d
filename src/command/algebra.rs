//! Sequence and Batch combinators.
//!
//! Both drop `None` entries first. No survivors means no work; a single
//! survivor is returned as-is, so callers can build lists of optional commands
//! without producing wrapper messages. Two or more become one command whose
//! message is the tagged collection.

use super::{compact, Cmd, Command};
use crate::message::Msg;

/// Commands to run one at a time, each after the previous completes.
#[derive(Debug, Default)]
pub struct SequenceMsg(pub Vec<Cmd>);

/// Commands to run independently, in no particular order.
#[derive(Debug, Default)]
pub struct BatchMsg(pub Vec<Cmd>);

impl SequenceMsg {
    /// Number of entries, including `None`s.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no entries at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl BatchMsg {
    /// Number of entries, including `None`s.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no entries at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for SequenceMsg {
    type Item = Cmd;
    type IntoIter = std::vec::IntoIter<Cmd>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl IntoIterator for BatchMsg {
    type Item = Cmd;
    type IntoIter = std::vec::IntoIter<Cmd>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Combine commands to run strictly in order.
pub fn sequence<I>(cmds: I) -> Cmd
where
    I: IntoIterator<Item = Cmd>,
{
    collapse(compact(cmds), |cmds| Msg::Sequence(SequenceMsg(cmds)))
}

/// Combine commands to run independently.
pub fn batch<I>(cmds: I) -> Cmd
where
    I: IntoIterator<Item = Cmd>,
{
    collapse(compact(cmds), |cmds| Msg::Batch(BatchMsg(cmds)))
}

fn collapse(mut cmds: Vec<Command>, wrap: fn(Vec<Cmd>) -> Msg) -> Cmd {
    match cmds.len() {
        0 => None,
        1 => cmds.pop(),
        _ => Some(Command::new(move || wrap(cmds.into_iter().map(Some).collect()))),
    }
}

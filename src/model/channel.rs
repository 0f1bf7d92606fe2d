//! Channel bridge: feed commands from background producers into the loop.
//!
//! [`cmd`] is the only command in the core that blocks indefinitely: it waits
//! for the next command on the component's queue, runs it and yields its
//! message. Re-issue it after each delivery to keep draining the queue.

use crossbeam_channel::Receiver;
use thiserror::Error;
use tracing::warn;

use super::Model;
use crate::command::{Cmd, Command};
use crate::message::Msg;

/// A component fed through a queue of commands.
pub trait CmdModel: Model {
    /// The receiving end of the component's command queue.
    fn cmd_chan(&self) -> Receiver<Command>;
}

/// Every sender of a bridged command queue was dropped.
///
/// Delivered as a payload message by [`cmd`] instead of blocking forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("command channel disconnected")]
pub struct Disconnected;

/// A command that waits for the next queued command and runs it.
pub fn cmd<M>(model: &M) -> Cmd
where
    M: CmdModel + ?Sized,
{
    let rx = model.cmd_chan();
    Some(Command::new(move || match rx.recv() {
        Ok(next) => next.run(),
        Err(_) => {
            warn!("command channel disconnected");
            Msg::new(Disconnected)
        }
    }))
}

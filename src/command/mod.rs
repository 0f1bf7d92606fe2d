//! Commands: deferred work that yields exactly one message.
//!
//! A [`Command`] is handed to the host program, which invokes it once (usually
//! on a worker thread) and feeds the resulting [`Msg`] back into `update`. The
//! absence of work is `None`, so every producer returns a [`Cmd`].
//!
//! Commands compose through [`sequence`] and [`batch`]. Their tagged results
//! are turned into the host's native collections by [`filter`].
//!
//! ```rust,ignore
//! use bramble::command::{batch, sequence, Command};
//!
//! let save = Some(Command::message(Saved));
//! let cmd = sequence([save, None, Some(Command::message(Reload))]);
//! ```

mod algebra;
mod filter;

use std::any::Any;
use std::fmt;

use crate::message::Msg;

pub use algebra::{batch, sequence, BatchMsg, SequenceMsg};
pub use filter::{filter, NativeScheduler, Scheduler};

/// A deferred, single-shot operation producing one message.
pub struct Command(Box<dyn FnOnce() -> Msg + Send + 'static>);

/// A command, or `None` for no work.
pub type Cmd = Option<Command>;

impl Command {
    /// Create a command from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> Msg + Send + 'static,
    {
        Self(Box::new(f))
    }

    /// A command that immediately yields `value` as a payload message.
    pub fn message<T: Any + Send>(value: T) -> Self {
        Self::new(move || Msg::new(value))
    }

    /// Invoke the command, consuming it.
    pub fn run(self) -> Msg {
        (self.0)()
    }

    /// Transform the message this command will produce.
    #[must_use]
    pub fn map<F>(self, f: F) -> Self
    where
        F: FnOnce(Msg) -> Msg + Send + 'static,
    {
        Self::new(move || f(self.run()))
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Command(..)")
    }
}

/// A command asking the host program to stop.
///
/// Nested under a child it reaches the parent as a routed message, so only a
/// root-level quit stops the host.
pub fn quit() -> Cmd {
    Some(Command::new(|| Msg::Quit))
}

/// Drop the `None` entries of a command list.
pub(crate) fn compact<I>(cmds: I) -> Vec<Command>
where
    I: IntoIterator<Item = Cmd>,
{
    cmds.into_iter().flatten().collect()
}

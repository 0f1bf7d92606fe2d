//! Runtime: a headless host program driving one root component.
//!
//! The program owns the root model and a bounded crossbeam queue of messages.
//! Every command runs on its own worker thread and sends its message back:
//!
//! ```text
//! ┌──────────────┐   Cmd (spawn)    ┌───────────────┐
//! │              │ ───────────────▶ │ Command thread│
//! │  Update loop │                  └───────┬───────┘
//! │  (Program)   │ ◀─────────────────────── │ Msg
//! │              │                          │
//! └──────┬───────┘ ◀── send()/sender() ─── external producers
//!        │ view()
//!        ▼
//!   output sink (optional)
//! ```
//!
//! One message is fully processed, including all nested routing, before the
//! next is taken from the queue.

mod config;
mod error;
mod program;

pub use config::ProgramConfig;
pub use error::ProgramError;
pub use program::Program;

//! # Bramble
//!
//! Composable terminal components for Elm-style programs.
//!
//! Bramble supplies the plumbing that lets independently written components
//! live in one tree: a command algebra, identity-tagged messages, and a small
//! host program that runs the commands.
//!
//! ## Core Concepts
//!
//! - **Command algebra**: [`sequence`] and [`batch`] combine commands, dropping
//!   empty ones and unwrapping singletons
//! - **Scheduler boundary**: [`filter`] turns collections into whatever a host
//!   scheduler understands, behind the [`Scheduler`] trait
//! - **Identity routing**: [`nest`] tags a child's command with its
//!   [`Identity`] so the parent can route the result back with
//!   [`route_nested`], whatever the child's position
//! - **Capabilities**: ticking, channel-fed commands and focus transfer are
//!   opt-in traits on top of [`Model`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use bramble::{batch, nest, Command, Msg, Program};
//!
//! let load = Command::message("loaded");
//! let save = Command::message("saved");
//! let cmd = nest(&child, batch([Some(load), Some(save)]));
//!
//! let model = Program::new(form).run()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod command;
pub mod message;
pub mod model;
pub mod runtime;
pub mod widget;

// Re-exports for convenience
pub use command::{batch, filter, quit, sequence, BatchMsg, Cmd, Command, NativeScheduler, Scheduler, SequenceMsg};
pub use message::{Msg, NativeMsg};
pub use model::{
    cmd, focus_next, focus_prev, init_nested, nest, nest_with, route_nested, tick, update_nested_model,
    update_tick_model, CmdModel, Disconnected, FocusModel, IdModel, Identity, Model, NestedModel, NestedMsg,
    TickModel, TickMsg,
};
pub use runtime::{Program, ProgramConfig, ProgramError};
pub use widget::{Dimensions, Input, KeyBinding, Text, ValidationError};

//! Component contracts and the tree protocol built on them.
//!
//! Every component implements [`Model`]. Optional capabilities are separate
//! traits a component implements selectively:
//!
//! - [`IdModel`]: has a stable [`Identity`] used to route messages to it
//! - [`NestedModel`]: owns routable children
//! - [`TickModel`]: wants a periodic [`TickMsg`]
//! - [`CmdModel`]: is fed commands through a channel
//! - [`FocusModel`]: takes part in keyboard focus transfer
//!
//! # Routing
//!
//! ```text
//! child.update() ──▶ Cmd ──nest(child)──▶ Msg::Nested{id, msg}
//!                                             │
//!        parent.update() ◀────────────────────┘
//!              │ update_nested_model
//!              ▼
//!        child with matching id
//! ```

mod channel;
mod focus;
mod nested;
mod tick;

use std::fmt;

use uuid::Uuid;

use crate::command::Cmd;
use crate::message::Msg;

pub use channel::{cmd, CmdModel, Disconnected};
pub use focus::{focus_next, focus_prev, FocusModel};
pub use nested::{init_nested, nest, nest_with, route_nested, update_nested_model, NestedModel, NestedMsg};
pub use tick::{tick, update_tick_model, TickModel, TickMsg};

/// A unit of interactive state.
pub trait Model: Send {
    /// Produce the initial command.
    fn init(&mut self) -> Cmd;

    /// Consume a message, updating state in place.
    fn update(&mut self, msg: Msg) -> Cmd;

    /// Render the current state.
    fn view(&self) -> String;
}

/// A component with a routing identity.
pub trait IdModel: Model {
    /// The identity assigned when this component was created.
    fn id(&self) -> Identity;
}

/// Globally unique, immutable routing token for one component instance.
///
/// Identity says nothing about position in a parent's child list, nor about
/// content equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Identity(Uuid);

impl Identity {
    /// Generate a fresh identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The placeholder identity of a component not yet initialised.
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Whether this is the placeholder identity.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// The underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for Identity {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self.0)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<M: Model + ?Sized> Model for Box<M> {
    fn init(&mut self) -> Cmd {
        (**self).init()
    }

    fn update(&mut self, msg: Msg) -> Cmd {
        (**self).update(msg)
    }

    fn view(&self) -> String {
        (**self).view()
    }
}

impl<M: IdModel + ?Sized> IdModel for Box<M> {
    fn id(&self) -> Identity {
        (**self).id()
    }
}

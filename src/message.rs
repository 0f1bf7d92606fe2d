//! Message types flowing through the update loop.
//!
//! The core kinds (collections, routing envelopes, ticks) are closed enum
//! variants so the algebra can recognise them. Anything a component defines
//! for itself travels as an opaque [`Msg::Payload`].

use std::any::Any;
use std::fmt;

use crate::command::{BatchMsg, Command, SequenceMsg};
use crate::model::{NestedMsg, TickMsg};

/// An event or result delivered to a component's `update`.
pub enum Msg {
    /// Commands to run one at a time, in order.
    Sequence(SequenceMsg),
    /// Commands to run independently.
    Batch(BatchMsg),
    /// A message addressed to a child component.
    Nested(NestedMsg),
    /// A periodic tick.
    Tick(TickMsg),
    /// Forces a re-render without any state change.
    Frame,
    /// Asks the host program to stop.
    Quit,
    /// A collection in the host scheduler's own format.
    Native(NativeMsg),
    /// A component-specific value.
    Payload(Box<dyn Any + Send>),
}

impl Msg {
    /// Wrap an arbitrary value as a payload message.
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self::Payload(Box::new(value))
    }

    /// Borrow the payload as `T`, if this is a payload of that type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Payload(value) => value.downcast_ref(),
            _ => None,
        }
    }

    /// Take the payload out as `T`.
    ///
    /// Returns the message unchanged when it is not a payload of that type.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        match self {
            Self::Payload(value) => value.downcast::<T>().map(|v| *v).map_err(Self::Payload),
            other => Err(other),
        }
    }

    /// Whether this is a payload of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    /// Stable variant name for logging.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Sequence(_) => "Sequence",
            Self::Batch(_) => "Batch",
            Self::Nested(_) => "Nested",
            Self::Tick(_) => "Tick",
            Self::Frame => "Frame",
            Self::Quit => "Quit",
            Self::Native(NativeMsg::Sequence(_)) => "NativeSequence",
            Self::Native(NativeMsg::Batch(_)) => "NativeBatch",
            Self::Payload(_) => "Payload",
        }
    }
}

impl fmt::Debug for Msg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence(cmds) => f.debug_tuple("Sequence").field(cmds).finish(),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Nested(nested) => f.debug_tuple("Nested").field(nested).finish(),
            Self::Tick(tick) => f.debug_tuple("Tick").field(tick).finish(),
            Self::Frame => write!(f, "Frame"),
            Self::Quit => write!(f, "Quit"),
            Self::Native(native) => f.debug_tuple("Native").field(native).finish(),
            Self::Payload(_) => write!(f, "Payload(..)"),
        }
    }
}

/// The host scheduler's native multi-command collections.
///
/// Produced by [`NativeScheduler`](crate::command::NativeScheduler) and
/// executed by [`Program`](crate::runtime::Program).
pub enum NativeMsg {
    /// Run in order, each after the previous completes.
    Sequence(Vec<Command>),
    /// Run concurrently.
    Batch(Vec<Command>),
}

impl NativeMsg {
    /// Number of commands in the collection.
    pub fn len(&self) -> usize {
        match self {
            Self::Sequence(cmds) | Self::Batch(cmds) => cmds.len(),
        }
    }

    /// Whether the collection holds no commands.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for NativeMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence(cmds) => write!(f, "Sequence({} cmds)", cmds.len()),
            Self::Batch(cmds) => write!(f, "Batch({} cmds)", cmds.len()),
        }
    }
}

//! Identity-routed nesting.
//!
//! [`nest`] tags everything a child's command eventually produces with the
//! child's [`Identity`]. Collections are unwrapped and every contained command
//! is nested in turn, so composite children keep their routing no matter how
//! deep their own `sequence`/`batch` trees go.

use tracing::trace;

use super::{IdModel, Identity, Model};
use crate::command::{batch, BatchMsg, Cmd, Command, SequenceMsg};
use crate::message::{Msg, NativeMsg};

/// Routing envelope: a message addressed to the child with `id`.
#[derive(Debug)]
pub struct NestedMsg {
    /// Identity of the addressed child.
    pub id: Identity,
    /// The child's message.
    pub msg: Box<Msg>,
}

impl NestedMsg {
    /// Address `msg` to the child with `id`.
    pub fn new(id: Identity, msg: Msg) -> Self {
        Self {
            id,
            msg: Box::new(msg),
        }
    }

    /// Split into identity and inner message.
    pub fn into_parts(self) -> (Identity, Msg) {
        (self.id, *self.msg)
    }
}

/// Nest `cmd` under `model`'s identity.
pub fn nest<M>(model: &M, cmd: Cmd) -> Cmd
where
    M: IdModel + ?Sized,
{
    nest_with(model.id(), cmd)
}

/// Nest `cmd` under an explicit identity.
pub fn nest_with(id: Identity, cmd: Cmd) -> Cmd {
    let cmd = cmd?;
    Some(Command::new(move || rewrap(id, cmd.run())))
}

fn rewrap(id: Identity, msg: Msg) -> Msg {
    let nest_all = |cmds: Vec<Cmd>| -> Vec<Cmd> { cmds.into_iter().map(|c| nest_with(id, c)).collect() };
    match msg {
        Msg::Sequence(SequenceMsg(cmds)) => Msg::Sequence(SequenceMsg(nest_all(cmds))),
        Msg::Batch(BatchMsg(cmds)) => Msg::Batch(BatchMsg(nest_all(cmds))),
        Msg::Native(NativeMsg::Sequence(cmds)) => {
            Msg::Sequence(SequenceMsg(nest_all(cmds.into_iter().map(Some).collect())))
        }
        Msg::Native(NativeMsg::Batch(cmds)) => {
            Msg::Batch(BatchMsg(nest_all(cmds.into_iter().map(Some).collect())))
        }
        other => Msg::Nested(NestedMsg::new(id, other)),
    }
}

/// A component owning routable children.
pub trait NestedModel: Model {
    /// Direct children, in a stable order.
    fn id_models(&self) -> Vec<&dyn IdModel>;

    /// Direct children, mutably, in the same order as [`id_models`](Self::id_models).
    fn id_models_mut(&mut self) -> Vec<&mut dyn IdModel>;

    /// Deliver a routed message to the matching child.
    ///
    /// Implementations usually forward to [`route_nested`].
    fn update_nested_msg(&mut self, msg: NestedMsg) -> Cmd;

    /// Identities of the direct children.
    fn child_ids(&self) -> Vec<Identity> {
        self.id_models().iter().map(|m| m.id()).collect()
    }
}

/// Initialise every child, nesting each command and batching them.
pub fn init_nested<M>(model: &mut M) -> Cmd
where
    M: NestedModel + ?Sized,
{
    let children = model.id_models_mut();
    if children.is_empty() {
        return None;
    }
    let cmds: Vec<Cmd> = children
        .into_iter()
        .map(|child| {
            let cmd = child.init();
            nest(&*child, cmd)
        })
        .collect();
    batch(cmds)
}

/// Generic update entry point of a [`NestedModel`].
///
/// Routed messages go to [`NestedModel::update_nested_msg`]; anything else is
/// the parent's own concern and yields no command here.
pub fn update_nested_model<M>(model: &mut M, msg: Msg) -> Cmd
where
    M: NestedModel + ?Sized,
{
    match msg {
        Msg::Nested(nested) => model.update_nested_msg(nested),
        _ => None,
    }
}

/// Update the child whose identity matches, in place.
///
/// The child's command comes back nested under that child. A message for an
/// identity no longer present is dropped.
pub fn route_nested<C>(children: &mut [C], msg: NestedMsg) -> Cmd
where
    C: IdModel,
{
    let (id, inner) = msg.into_parts();
    let Some(child) = children.iter_mut().find(|c| c.id() == id) else {
        trace!(%id, kind = inner.kind(), "dropping message for unknown child");
        return None;
    };
    trace!(%id, kind = inner.kind(), "routing nested message");
    let cmd = child.update(inner);
    nest(&*child, cmd)
}

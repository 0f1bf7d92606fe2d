//! Focus contract and focus transfer between siblings.

use super::{nest, IdModel};
use crate::command::{batch, Cmd};

/// A component that can hold keyboard focus.
///
/// Correctness of the focus state is up to the component; the returned
/// commands carry side effects such as starting a cursor blink.
pub trait FocusModel: IdModel {
    /// Whether this component currently has focus.
    fn focused(&self) -> bool;

    /// Take focus.
    fn focus(&mut self) -> Cmd;

    /// Release focus.
    fn blur(&mut self) -> Cmd;
}

impl<M: FocusModel + ?Sized> FocusModel for Box<M> {
    fn focused(&self) -> bool {
        (**self).focused()
    }

    fn focus(&mut self) -> Cmd {
        (**self).focus()
    }

    fn blur(&mut self) -> Cmd {
        (**self).blur()
    }
}

/// Move focus to the next sibling, wrapping around.
///
/// With nothing focused the first sibling takes focus. The commands returned
/// by `blur` and `focus` are nested under their components.
pub fn focus_next<F: FocusModel>(models: &mut [F]) -> Cmd {
    let len = models.len();
    transfer(models, |current| current.map_or(0, |i| (i + 1) % len))
}

/// Move focus to the previous sibling, wrapping around.
///
/// With nothing focused the last sibling takes focus.
pub fn focus_prev<F: FocusModel>(models: &mut [F]) -> Cmd {
    let len = models.len();
    transfer(models, |current| current.map_or(len - 1, |i| (i + len - 1) % len))
}

fn transfer<F, S>(models: &mut [F], step: S) -> Cmd
where
    F: FocusModel,
    S: FnOnce(Option<usize>) -> usize,
{
    if models.is_empty() {
        return None;
    }
    let current = models.iter().position(FocusModel::focused);
    let target = step(current);
    if current == Some(target) {
        return None;
    }

    let blurred = current.and_then(|i| {
        let model = &mut models[i];
        let cmd = model.blur();
        nest(&*model, cmd)
    });
    // Blur may refuse, e.g. an input holding an invalid value.
    if current.is_some_and(|i| models[i].focused()) {
        return blurred;
    }

    let model = &mut models[target];
    let cmd = model.focus();
    let focused = nest(&*model, cmd);
    batch([blurred, focused])
}

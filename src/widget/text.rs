//! Text Widget: a single styled line of content.
//!
//! The content sits behind a lock so background threads may update it
//! through a shared reference once the component has been initialised.

use std::sync::{PoisonError, RwLock};

use crossterm::style::ContentStyle;
use unicode_width::UnicodeWidthStr;

use super::traits::Dimensions;
use crate::command::Cmd;
use crate::message::Msg;
use crate::model::{IdModel, Identity, Model};

/// A single line of styled text.
#[derive(Debug, Default)]
pub struct Text {
    /// Style applied to the whole line.
    pub style: ContentStyle,
    /// Assigned on first `init`.
    id: Identity,
    /// Current content.
    content: RwLock<String>,
}

impl Text {
    /// Create a text component with the given content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            style: ContentStyle::new(),
            id: Identity::nil(),
            content: RwLock::new(content.into()),
        }
    }

    /// Set the style.
    #[must_use]
    pub fn with_style(mut self, style: ContentStyle) -> Self {
        self.style = style;
        self
    }

    /// Replace the content.
    pub fn set_content(&self, content: impl Into<String>) {
        *self.content.write().unwrap_or_else(PoisonError::into_inner) = content.into();
    }

    /// The content, flattened to one line.
    pub fn value(&self) -> String {
        let content = self.content.read().unwrap_or_else(PoisonError::into_inner);
        content.lines().collect::<Vec<_>>().join(" ")
    }
}

impl Model for Text {
    fn init(&mut self) -> Cmd {
        if self.id.is_nil() {
            self.id = Identity::new();
        }
        None
    }

    fn update(&mut self, _msg: Msg) -> Cmd {
        None
    }

    fn view(&self) -> String {
        self.style.apply(self.value()).to_string()
    }
}

impl IdModel for Text {
    fn id(&self) -> Identity {
        self.id
    }
}

impl Dimensions for Text {
    fn width(&self) -> usize {
        self.value().width()
    }

    fn height(&self) -> usize {
        1
    }
}

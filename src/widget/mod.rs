//! Widgets: ready-made components built on the model contracts.
//!
//! - [`Text`]: a single styled line whose content can change from any thread
//! - [`Input`]: a focusable single-line editor with validation and suggestions
//!
//! Both report their footprint through [`Dimensions`] and can be nested
//! under any parent that routes by identity.
//!
//! # Example
//!
//! ```rust,ignore
//! use bramble::widget::Input;
//! use bramble::model::FocusModel;
//!
//! let mut name = Input::new().with_prompts("  Name: ", "> Name: ");
//! name.set_width(30);
//! name.focus();
//! ```

mod input;
mod keymap;
mod text;
mod traits;

pub use input::{Input, InputKeyMap, ValidationError, Validator};
pub use keymap::KeyBinding;
pub use text::Text;
pub use traits::Dimensions;

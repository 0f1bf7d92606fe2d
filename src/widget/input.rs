//! Input Widget: single-line text input that takes part in focus transfer.
//!
//! Editing is grapheme-aware. The prompt and style switch with focus and,
//! while focused, with the validity of the current value.

use std::fmt;
use std::sync::Arc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, ContentStyle};
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::keymap::KeyBinding;
use super::traits::Dimensions;
use crate::command::Cmd;
use crate::message::Msg;
use crate::model::{FocusModel, IdModel, Identity, Model};

/// Why a value was rejected by an input's validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    /// Create a validation error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Checks a candidate value.
pub type Validator = Arc<dyn Fn(&str) -> Result<(), ValidationError> + Send + Sync>;

/// Key bindings of an [`Input`].
#[derive(Debug, Clone)]
pub struct InputKeyMap {
    /// Move the cursor one grapheme right.
    pub character_forward: KeyBinding,
    /// Move the cursor one grapheme left.
    pub character_backward: KeyBinding,
    /// Delete the grapheme before the cursor.
    pub delete_backward: KeyBinding,
    /// Delete the grapheme under the cursor.
    pub delete_forward: KeyBinding,
    /// Jump to the start of the line.
    pub line_start: KeyBinding,
    /// Jump to the end of the line.
    pub line_end: KeyBinding,
    /// Replace the value with the current suggestion.
    pub accept_suggestion: KeyBinding,
    /// Cycle to the next suggestion.
    pub next_suggestion: KeyBinding,
    /// Cycle to the previous suggestion.
    pub prev_suggestion: KeyBinding,
    /// Paste. The text itself arrives as a bracketed [`Event::Paste`].
    pub paste: KeyBinding,
}

impl Default for InputKeyMap {
    fn default() -> Self {
        Self {
            character_forward: KeyBinding::key(KeyCode::Right).with_help("→", ""),
            character_backward: KeyBinding::key(KeyCode::Left).with_help("←", ""),
            delete_backward: KeyBinding::key(KeyCode::Backspace).with_help("BS", ""),
            delete_forward: KeyBinding::key(KeyCode::Delete).with_help("DEL", ""),
            line_start: KeyBinding::key(KeyCode::Home).with_help("HOME", ""),
            line_end: KeyBinding::key(KeyCode::End).with_help("END", ""),
            accept_suggestion: KeyBinding::key(KeyCode::Tab).with_help("Tab", "accept"),
            next_suggestion: KeyBinding::key(KeyCode::Down).with_help("↓", ""),
            prev_suggestion: KeyBinding::key(KeyCode::Up).with_help("↑", ""),
            paste: KeyBinding::ctrl(KeyCode::Char('v')).with_help("ctrl+v", "paste"),
        }
    }
}

/// A single-line text input.
pub struct Input {
    /// Prompt shown while blurred.
    pub blur_prompt: String,
    /// Prompt shown while focused.
    pub focus_prompt: String,
    /// Optional value check; invalid values are styled and refused on blur.
    pub validate: Option<Validator>,
    /// Style while blurred.
    pub text_style: ContentStyle,
    /// Style while focused with a valid value.
    pub valid_style: ContentStyle,
    /// Style while focused with an invalid value.
    pub invalid_style: ContentStyle,
    /// Key bindings.
    pub keymap: InputKeyMap,

    id: Identity,
    value: String,
    /// Byte offset, always on a grapheme boundary.
    cursor: usize,
    focused: bool,
    /// Last value accepted by `set_value`.
    cached: String,
    /// Total width including the prompt; 0 means unlimited.
    width: usize,
    show_suggestions: bool,
    suggestions: Vec<String>,
    /// Index into the suggestions matching the current value.
    selected: usize,
}

impl Input {
    /// Create an empty, blurred input with a fresh identity.
    pub fn new() -> Self {
        Self {
            blur_prompt: String::new(),
            focus_prompt: String::from("> "),
            validate: None,
            text_style: ContentStyle::new(),
            valid_style: ContentStyle::new(),
            invalid_style: ContentStyle::new(),
            keymap: InputKeyMap::default(),
            id: Identity::new(),
            value: String::new(),
            cursor: 0,
            focused: false,
            cached: String::new(),
            width: 0,
            show_suggestions: false,
            suggestions: Vec::new(),
            selected: 0,
        }
    }

    /// Set both prompts.
    #[must_use]
    pub fn with_prompts(mut self, blur: impl Into<String>, focus: impl Into<String>) -> Self {
        self.blur_prompt = blur.into();
        self.focus_prompt = focus.into();
        self
    }

    /// Install a validator.
    #[must_use]
    pub fn with_validator<F>(mut self, validate: F) -> Self
    where
        F: Fn(&str) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(validate));
        self
    }

    /// Set the styles for blurred, valid and invalid states.
    #[must_use]
    pub fn with_styles(mut self, text: ContentStyle, valid: ContentStyle, invalid: ContentStyle) -> Self {
        self.text_style = text;
        self.valid_style = valid;
        self.invalid_style = invalid;
        self
    }

    /// The current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value if the validator accepts it.
    ///
    /// An accepted value is also remembered as the fallback restored when the
    /// input is blurred while holding an invalid value.
    pub fn set_value(&mut self, value: impl Into<String>) -> Result<(), ValidationError> {
        let value = value.into();
        self.check(&value)?;
        self.cached.clone_from(&value);
        self.replace_value(value);
        Ok(())
    }

    /// Whether the current value passes validation.
    pub fn is_valid(&self) -> bool {
        self.check(&self.value).is_ok()
    }

    /// Set the total width, prompt included. 0 means unlimited.
    pub fn set_width(&mut self, width: usize) {
        self.width = width;
    }

    /// Show or hide suggestion completion.
    pub fn enable_suggestions(&mut self, enabled: bool) {
        self.show_suggestions = enabled;
    }

    /// Replace the suggestion list.
    pub fn set_suggestions(&mut self, suggestions: Vec<String>) {
        self.suggestions = suggestions;
        self.selected = 0;
    }

    /// The suggestion currently offered for the value, if any.
    pub fn current_suggestion(&self) -> Option<&str> {
        let matches = self.matched_suggestions();
        if matches.is_empty() {
            return None;
        }
        Some(matches[self.selected % matches.len()])
    }

    /// Bindings currently active, in display order.
    pub fn key_bindings(&self) -> Vec<KeyBinding> {
        let km = &self.keymap;
        let mut bindings = vec![km.character_backward, km.character_forward];
        if self.show_suggestions {
            bindings.extend([km.next_suggestion, km.prev_suggestion, km.accept_suggestion]);
        }
        bindings.extend([km.paste, km.delete_backward, km.delete_forward, km.line_start, km.line_end]);
        bindings
    }

    fn check(&self, value: &str) -> Result<(), ValidationError> {
        self.validate.as_ref().map_or(Ok(()), |validate| validate(value))
    }

    fn replace_value(&mut self, value: String) {
        self.value = value;
        self.cursor = self.value.len();
        self.selected = 0;
    }

    fn matched_suggestions(&self) -> Vec<&str> {
        if !self.show_suggestions || self.value.is_empty() {
            return Vec::new();
        }
        let needle = self.value.to_lowercase();
        self.suggestions
            .iter()
            .filter(|s| s.to_lowercase().starts_with(&needle))
            .map(String::as_str)
            .collect()
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        if self.keymap.character_backward.matches(key) {
            self.cursor_left();
        } else if self.keymap.character_forward.matches(key) {
            self.cursor_right();
        } else if self.keymap.delete_backward.matches(key) {
            self.backspace();
        } else if self.keymap.delete_forward.matches(key) {
            self.delete();
        } else if self.keymap.line_start.matches(key) {
            self.cursor = 0;
        } else if self.keymap.line_end.matches(key) {
            self.cursor = self.value.len();
        } else if self.show_suggestions && self.keymap.accept_suggestion.matches(key) {
            if let Some(suggestion) = self.current_suggestion().map(str::to_owned) {
                self.replace_value(suggestion);
            }
        } else if self.show_suggestions && self.keymap.next_suggestion.matches(key) {
            self.selected = self.selected.wrapping_add(1);
        } else if self.show_suggestions && self.keymap.prev_suggestion.matches(key) {
            let len = self.matched_suggestions().len().max(1);
            self.selected = (self.selected % len + len - 1) % len;
        } else if let KeyCode::Char(c) = key.code {
            if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                self.insert_str(c.encode_utf8(&mut [0; 4]));
            }
        }
    }

    /// Insert text at the cursor, dropping control characters.
    fn insert_str(&mut self, text: &str) {
        let clean: String = text.chars().filter(|c| !c.is_control()).collect();
        self.value.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
        self.selected = 0;
    }

    fn prev_boundary(&self) -> usize {
        self.value[..self.cursor]
            .grapheme_indices(true)
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.value[self.cursor..]
            .graphemes(true)
            .next()
            .map_or(self.cursor, |g| self.cursor + g.len())
    }

    fn cursor_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    fn cursor_right(&mut self) {
        self.cursor = self.next_boundary();
    }

    fn backspace(&mut self) {
        let prev = self.prev_boundary();
        self.value.replace_range(prev..self.cursor, "");
        self.cursor = prev;
        self.selected = 0;
    }

    fn delete(&mut self) {
        let next = self.next_boundary();
        self.value.replace_range(self.cursor..next, "");
        self.selected = 0;
    }

    /// Columns left for the value once the prompt and cursor cell are taken.
    fn available(&self, prompt: &str) -> Option<usize> {
        (self.width > 0).then(|| self.width.saturating_sub(prompt.width()).saturating_sub(1).max(1))
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input")
            .field("id", &self.id)
            .field("value", &self.value)
            .field("cursor", &self.cursor)
            .field("focused", &self.focused)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

impl Model for Input {
    fn init(&mut self) -> Cmd {
        None
    }

    fn update(&mut self, msg: Msg) -> Cmd {
        if !self.focused {
            return None;
        }
        if let Some(key) = msg.downcast_ref::<KeyEvent>() {
            self.handle_key(key);
        } else {
            match msg.downcast_ref::<Event>() {
                Some(Event::Key(key)) => self.handle_key(key),
                Some(Event::Paste(text)) => self.insert_str(text),
                _ => {}
            }
        }
        None
    }

    fn view(&self) -> String {
        let (prompt, style) = if self.focused {
            let style = if self.is_valid() { self.valid_style } else { self.invalid_style };
            (self.focus_prompt.as_str(), style)
        } else {
            (self.blur_prompt.as_str(), self.text_style)
        };

        let graphemes: Vec<&str> = self.value.graphemes(true).collect();
        let cursor_index = self.value[..self.cursor].graphemes(true).count();

        // Slide the window so the cursor cell stays visible.
        let (start, end) = match self.available(prompt) {
            None => (0, graphemes.len()),
            Some(available) => {
                let cell = |i: usize| graphemes.get(i).map_or(1, |g| g.width().max(1));
                let mut start = 0;
                let mut used: usize = (0..=cursor_index).map(cell).sum();
                while used > available && start < cursor_index {
                    used -= cell(start);
                    start += 1;
                }
                let mut end = cursor_index;
                let mut used: usize = (start..cursor_index).map(cell).sum();
                while end < graphemes.len() && used + cell(end) <= available {
                    used += cell(end);
                    end += 1;
                }
                (start, end)
            }
        };

        let mut out = String::from(prompt);
        if !self.focused {
            let visible: String = graphemes[start..end].concat();
            out.push_str(&style.apply(visible).to_string());
            return out;
        }

        let mut cursor_style = style;
        cursor_style.attributes.set(Attribute::Reverse);
        let before: String = graphemes[start..cursor_index].concat();
        out.push_str(&style.apply(before).to_string());

        if cursor_index < graphemes.len() {
            out.push_str(&cursor_style.apply(graphemes[cursor_index]).to_string());
            let after: String = graphemes[(cursor_index + 1).min(end)..end].concat();
            out.push_str(&style.apply(after).to_string());
        } else {
            let remainder = self
                .current_suggestion()
                .and_then(|s| s.get(self.value.len()..))
                .unwrap_or_default();
            let mut rest = remainder.graphemes(true);
            out.push_str(&cursor_style.apply(rest.next().unwrap_or(" ")).to_string());
            let hint: String = rest.collect();
            if !hint.is_empty() {
                let mut hint_style = style;
                hint_style.attributes.set(Attribute::Dim);
                out.push_str(&hint_style.apply(hint).to_string());
            }
        }
        out
    }
}

impl IdModel for Input {
    fn id(&self) -> Identity {
        self.id
    }
}

impl FocusModel for Input {
    fn focused(&self) -> bool {
        self.focused
    }

    fn focus(&mut self) -> Cmd {
        self.focused = true;
        None
    }

    fn blur(&mut self) -> Cmd {
        if !self.is_valid() {
            if self.cached.is_empty() {
                return None;
            }
            let cached = self.cached.clone();
            self.replace_value(cached);
        }
        self.focused = false;
        None
    }
}

impl Dimensions for Input {
    /// The configured width, or the natural width of the view when unlimited.
    fn width(&self) -> usize {
        if self.width > 0 {
            return self.width;
        }
        let prompt = if self.focused { &self.focus_prompt } else { &self.blur_prompt };
        prompt.width() + self.value.width() + usize::from(self.focused)
    }

    fn height(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Msg {
        Msg::new(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn typed(input: &mut Input, text: &str) {
        for c in text.chars() {
            input.update(key(KeyCode::Char(c)));
        }
    }

    fn screen(view: &str) -> String {
        let mut parser = vt100::Parser::new(1, 40, 0);
        parser.process(view.as_bytes());
        parser.screen().contents().trim_end().to_owned()
    }

    fn digits_only(value: &str) -> Result<(), ValidationError> {
        if value.chars().all(|c| c.is_ascii_digit()) {
            Ok(())
        } else {
            Err(ValidationError::new("digits only"))
        }
    }

    fn focused_input() -> Input {
        let mut input = Input::new();
        input.focus();
        input
    }

    #[test]
    fn test_typing_and_editing() {
        let mut input = focused_input();
        typed(&mut input, "Hello");
        assert_eq!(input.value(), "Hello");

        input.update(key(KeyCode::Backspace));
        assert_eq!(input.value(), "Hell");

        input.update(key(KeyCode::Home));
        input.update(key(KeyCode::Delete));
        assert_eq!(input.value(), "ell");

        input.update(key(KeyCode::End));
        input.update(key(KeyCode::Left));
        typed(&mut input, "X");
        assert_eq!(input.value(), "elXl");
    }

    #[test]
    fn test_grapheme_aware_cursor() {
        let mut input = focused_input();
        input.update(Msg::new(Event::Paste("e\u{301}🙂".into())));
        assert_eq!(input.value().graphemes(true).count(), 2);

        input.update(key(KeyCode::Left));
        input.update(key(KeyCode::Backspace));
        assert_eq!(input.value(), "🙂");
    }

    #[test]
    fn test_blurred_input_ignores_keys() {
        let mut input = Input::new();
        typed(&mut input, "abc");
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_control_chars_are_not_inserted() {
        let mut input = focused_input();
        input.update(Msg::new(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        input.update(Msg::new(Event::Paste("a\nb".into())));
        assert_eq!(input.value(), "ab");
    }

    #[test]
    fn test_set_value_validates() {
        let mut input = Input::new().with_validator(digits_only);
        assert!(input.set_value("123").is_ok());
        assert_eq!(
            input.set_value("12a"),
            Err(ValidationError::new("digits only"))
        );
        assert_eq!(input.value(), "123");
    }

    #[test]
    fn test_blur_restores_cached_value() {
        let mut input = Input::new().with_validator(digits_only);
        input.set_value("42").expect("valid");
        input.focus();
        typed(&mut input, "x");
        assert!(!input.is_valid());

        input.blur();
        assert!(!input.focused());
        assert_eq!(input.value(), "42");
    }

    #[test]
    fn test_blur_refused_without_cached_value() {
        let mut input = focused_input().with_validator(digits_only);
        typed(&mut input, "x");
        input.blur();
        assert!(input.focused());
        assert_eq!(input.value(), "x");
    }

    #[test]
    fn test_view_switches_prompt() {
        let mut input = Input::new().with_prompts("- ", "> ");
        input.set_value("abc").expect("no validator");
        assert_eq!(screen(&input.view()), "- abc");

        input.focus();
        assert_eq!(screen(&input.view()), "> abc");
    }

    #[test]
    fn test_view_scrolls_to_cursor() {
        let mut input = focused_input().with_prompts("", "> ");
        input.set_width(8);
        typed(&mut input, "abcdefghij");
        // 8 columns - 2 prompt - 1 reserved = 5 value columns
        assert_eq!(screen(&input.view()), "> ghij");

        input.update(key(KeyCode::Home));
        assert_eq!(screen(&input.view()), "> abcde");
    }

    #[test]
    fn test_suggestions() {
        let mut input = focused_input();
        input.enable_suggestions(true);
        input.set_suggestions(vec!["apple".into(), "apricot".into(), "banana".into()]);
        typed(&mut input, "ap");
        assert_eq!(input.current_suggestion(), Some("apple"));
        assert_eq!(screen(&input.view()), "> apple");

        input.update(key(KeyCode::Down));
        assert_eq!(input.current_suggestion(), Some("apricot"));
        input.update(key(KeyCode::Up));
        assert_eq!(input.current_suggestion(), Some("apple"));

        input.update(key(KeyCode::Tab));
        assert_eq!(input.value(), "apple");
    }

    #[test]
    fn test_key_bindings() {
        let mut input = Input::new();
        let plain = input.key_bindings();
        assert_eq!(plain.len(), 7);
        assert_eq!(plain[2].help_key, "ctrl+v");

        input.enable_suggestions(true);
        let bindings = input.key_bindings();
        assert_eq!(bindings.len(), 10);
        assert_eq!(bindings[0].help_key, "←");
        assert_eq!(bindings[4].help_key, "Tab");
        assert_eq!(bindings[5].help_desc, "paste");
    }

    #[test]
    fn test_paste_binding_inserts_nothing_itself() {
        let mut input = focused_input();
        input.update(Msg::new(KeyEvent::new(KeyCode::Char('v'), KeyModifiers::CONTROL)));
        assert_eq!(input.value(), "");
        input.update(Msg::new(Event::Paste("pasted".into())));
        assert_eq!(input.value(), "pasted");
    }

    #[test]
    fn test_dimensions() {
        let mut input = Input::new().with_prompts("", "> ");
        input.set_value("日本").expect("no validator");
        assert_eq!(Dimensions::width(&input), 4);
        input.focus();
        assert_eq!(Dimensions::width(&input), 7);
        input.set_width(20);
        assert_eq!(Dimensions::width(&input), 20);
        assert_eq!(input.height(), 1);
    }

    #[test]
    fn test_identity_assigned_at_construction() {
        assert!(!Input::new().id().is_nil());
        assert_ne!(Input::new().id(), Input::new().id());
    }
}

//! Field state machines backing the form widgets.
//!
//! Each field owns what the user sees (raw text or selected label) plus its
//! validity. Edits return the confirmed value only when it validates; the
//! caller threads that into the applicant draft.

use shared::domain::PLACEHOLDER_LABEL;

use crate::validation::Validator;

#[derive(Debug, Clone)]
pub struct ValidatedField {
    label: &'static str,
    validator: Option<Validator>,
    text: String,
    valid: bool,
}

impl ValidatedField {
    pub fn new(label: &'static str, validator: Validator) -> Self {
        Self {
            label,
            validator: Some(validator),
            text: String::new(),
            valid: false,
        }
    }

    /// A field without a predicate: always shown as invalid, never confirms.
    pub fn display_only(label: &'static str) -> Self {
        Self {
            label,
            validator: None,
            text: String::new(),
            valid: false,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn shows_error(&self) -> bool {
        !self.valid
    }

    /// Returns the new text when it validates.
    pub fn edit(&mut self, text: &str) -> Option<&str> {
        let validator = self.validator?;
        self.text = text.to_string();
        self.valid = validator(text);
        self.valid.then_some(self.text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption<V> {
    pub value: V,
    pub label: String,
    pub disabled: bool,
}

impl<V> SelectOption<V> {
    pub fn new(value: V, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
            disabled: false,
        }
    }

    pub fn disabled(value: V, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
            disabled: true,
        }
    }
}

/// Dropdown resolving labels to typed values. The first option is the
/// sentinel; any selection resolving to its value is invalid.
#[derive(Debug, Clone)]
pub struct SelectableField<V> {
    label: &'static str,
    sentinel: SelectOption<V>,
    options: Vec<SelectOption<V>>,
    selected_label: String,
    valid: bool,
}

impl<V: Clone + PartialEq> SelectableField<V> {
    pub fn new(label: &'static str, sentinel: SelectOption<V>, options: Vec<SelectOption<V>>) -> Self {
        let mut field = Self {
            label,
            selected_label: sentinel.label.clone(),
            sentinel,
            options: Vec::new(),
            valid: false,
        };
        field.set_options(options);
        field
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn options(&self) -> &[SelectOption<V>] {
        &self.options
    }

    pub fn selected_label(&self) -> &str {
        &self.selected_label
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Replaces the options (sentinel first) and resets the selection.
    pub fn set_options(&mut self, options: Vec<SelectOption<V>>) {
        self.options = std::iter::once(self.sentinel.clone())
            .chain(options.into_iter().filter(|option| option.value != self.sentinel.value))
            .collect();
        self.reset();
    }

    pub fn reset(&mut self) {
        self.selected_label = self.sentinel.label.clone();
        self.valid = false;
    }

    /// Returns `(label, value)` when the selection is valid. Disabled options
    /// are refused without touching the current selection.
    pub fn select(&mut self, label: &str) -> Option<(String, V)> {
        let option = self.options.iter().find(|option| option.label == label);
        if option.is_some_and(|option| option.disabled) {
            return None;
        }
        let value = option
            .map(|option| option.value.clone())
            .unwrap_or_else(|| self.sentinel.value.clone());
        self.selected_label = label.to_string();
        self.valid = value != self.sentinel.value;
        self.valid.then(|| (self.selected_label.clone(), value))
    }
}

/// Sentinel option used by both dropdowns of the form.
pub fn placeholder<V>(value: V, disabled: bool) -> SelectOption<V> {
    SelectOption {
        value,
        label: PLACEHOLDER_LABEL.to_string(),
        disabled,
    }
}

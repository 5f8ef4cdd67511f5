//! View renderer: plain view models for the panel plus their HTML rendering.
//!
//! Nothing here holds state between renders. The editor view is rebuilt from a
//! dictionary on every load, select and cancel.

use crate::error::{AdminError, AdminResult};
use crate::strings::STRINGS;
use crate::translations::{language_label, LanguageDictionary, TranslationSet};
use std::fmt;

/// Escape text so it is inserted into HTML as data, never as markup.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }

    result
}

// ==================== Editor ====================

/// One editable translation: the key label and the current text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorField {
    pub key: String,
    pub value: String,
}

/// The rendered translation form. Holds the live, possibly edited values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    language: String,
    fields: Vec<EditorField>,
}

impl EditorView {
    /// Build the form for `language`, one field per key in dictionary order.
    pub fn render(language: &str, dictionary: &LanguageDictionary) -> Self {
        let fields = dictionary
            .iter()
            .map(|(key, value)| EditorField {
                key: key.clone(),
                value: value.clone(),
            })
            .collect();

        Self {
            language: language.to_string(),
            fields,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Heading text: the language code upper-cased
    pub fn heading(&self) -> String {
        self.language.to_uppercase()
    }

    pub fn fields(&self) -> &[EditorField] {
        &self.fields
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.key == key)
            .map(|field| field.value.as_str())
    }

    /// Replace the text of an existing field.
    ///
    /// The form has no way to add keys, so an unknown key is rejected.
    pub fn set_value(&mut self, key: &str, value: impl Into<String>) -> AdminResult<()> {
        match self.fields.iter_mut().find(|field| field.key == key) {
            Some(field) => {
                field.value = value.into();
                Ok(())
            }
            None => Err(AdminError::Validation(format!(
                "unknown translation key '{}'",
                key
            ))),
        }
    }

    /// Current values of every field, edited or not, in form order.
    pub fn collect(&self) -> LanguageDictionary {
        self.fields
            .iter()
            .map(|field| (field.key.clone(), field.value.clone()))
            .collect()
    }

    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<h3 id=\"current-language\">{}</h3>\n<div id=\"translation-fields\">\n",
            escape_html(&self.heading())
        );

        for field in &self.fields {
            let key = escape_html(&field.key);
            html.push_str(&format!(
                "<div class=\"translation-field\">\n\
                 <label for=\"trans_{key}\">{label}</label>\n\
                 <div class=\"field-key\">{key}</div>\n\
                 <textarea id=\"trans_{key}\" name=\"{key}\">{value}</textarea>\n\
                 </div>\n",
                key = key,
                label = escape_html(STRINGS.field_label),
                value = escape_html(&field.value),
            ));
        }

        html.push_str("</div>\n");
        html
    }
}

// ==================== Language selector ====================

/// One entry of the language selector; the placeholder has an empty code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageOption {
    pub code: String,
    pub label: String,
}

/// Selector options: placeholder first, then every loaded language in order.
pub fn language_options(translations: &TranslationSet) -> Vec<LanguageOption> {
    let placeholder = LanguageOption {
        code: String::new(),
        label: STRINGS.language_placeholder.to_string(),
    };

    std::iter::once(placeholder)
        .chain(translations.keys().map(|code| LanguageOption {
            code: code.clone(),
            label: language_label(code),
        }))
        .collect()
}

// ==================== Status ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Warning,
}

impl StatusKind {
    fn color(self) -> &'static str {
        match self {
            StatusKind::Success => "green",
            StatusKind::Error => "red",
            StatusKind::Warning => "orange",
        }
    }
}

/// Result box content. Lines are separated by `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusLine {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Warning,
            text: text.into(),
        }
    }

    pub fn to_html(&self) -> String {
        let body = self
            .text
            .lines()
            .map(escape_html)
            .collect::<Vec<_>>()
            .join("<br/>");

        format!("<div style=\"color: {};\">{}</div>", self.kind.color(), body)
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// ==================== Controls ====================

/// A submit control that is disabled while its request is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: String,
    pub disabled: bool,
}

impl SubmitButton {
    pub fn idle(label: &str) -> Self {
        Self {
            label: label.to_string(),
            disabled: false,
        }
    }

    pub fn busy(label: &str) -> Self {
        Self {
            label: label.to_string(),
            disabled: true,
        }
    }
}

//! Form field data model
//!
//! A [`Field`] is the crate-side description of one form control: widget
//! kind, current value(s), choices, and HTML attributes. The frontend builds
//! fields, threads them through the [`filters`](super::filters), and renders
//! them into its page templates.

use askama::Template;

/// Widget kind a field renders as
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    TextInput,
    Textarea,
    Select { multiple: bool },
    Checkbox,
}

/// One selectable option of a select widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// One form control with its widget, values and attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub(crate) name: String,
    pub(crate) widget: Widget,
    pub(crate) label: Option<String>,
    pub(crate) values: Vec<String>,
    pub(crate) choices: Vec<Choice>,
    pub(crate) required: bool,
    pub(crate) readonly: bool,
    pub(crate) checked: bool,
    // name/value pairs; an empty value renders as a bare attribute
    pub(crate) attrs: Vec<(String, String)>,
}

impl Field {
    fn new(name: impl Into<String>, widget: Widget) -> Self {
        Self {
            name: name.into(),
            widget,
            label: None,
            values: Vec::new(),
            choices: Vec::new(),
            required: false,
            readonly: false,
            checked: false,
            attrs: Vec::new(),
        }
    }

    /// A single-line text input
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, Widget::TextInput)
    }

    /// A multi-line text area
    pub fn textarea(name: impl Into<String>) -> Self {
        Self::new(name, Widget::Textarea)
    }

    /// A single-choice select
    pub fn select(name: impl Into<String>, choices: Vec<Choice>) -> Self {
        let mut field = Self::new(name, Widget::Select { multiple: false });
        field.choices = choices;
        field
    }

    /// A multiple-choice select
    pub fn multi_select(name: impl Into<String>, choices: Vec<Choice>) -> Self {
        let mut field = Self::new(name, Widget::Select { multiple: true });
        field.choices = choices;
        field
    }

    /// A checkbox
    pub fn checkbox(name: impl Into<String>) -> Self {
        Self::new(name, Widget::Checkbox)
    }

    /// Set the current (or initial) value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.values = vec![value.into()];
        self
    }

    /// Set several current values (multi-selects)
    pub fn with_values(mut self, values: Vec<String>) -> Self {
        self.values = values;
        self
    }

    /// Override the label text derived from the field name
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Mark the field required
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Mark the field read-only
    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    /// Set the checkbox checked state
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element id, `id_<name>`
    pub fn id(&self) -> String {
        format!("id_{}", self.name)
    }

    /// Current value, if any
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Set or replace an attribute; an empty value means a bare attribute
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Some(existing) = self.attrs.iter_mut().find(|(n, _)| n == name) {
            existing.1 = value.to_string();
        } else {
            self.attrs.push((name.to_string(), value.to_string()));
        }
    }

    /// Current value of an attribute, if set
    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Render this field's widget to HTML
    pub fn render(&self) -> Result<String, askama::Error> {
        let mut attrs = Vec::new();

        match &self.widget {
            Widget::TextInput | Widget::Checkbox => {
                attrs.push(AttrPair::valued("name", self.name.as_str()));
                attrs.push(AttrPair::valued("id", self.id()));
                if self.widget == Widget::Checkbox {
                    if self.checked {
                        attrs.push(AttrPair::bare("checked"));
                    }
                } else if let Some(value) = self.value() {
                    attrs.push(AttrPair::valued("value", value));
                }
                self.push_common_attrs(&mut attrs);

                let kind = if self.widget == Widget::Checkbox {
                    "checkbox"
                } else {
                    "text"
                };
                InputTemplate {
                    kind,
                    attrs: &attrs,
                }
                .render()
            }
            Widget::Textarea => {
                attrs.push(AttrPair::valued("name", self.name.as_str()));
                attrs.push(AttrPair::valued("id", self.id()));
                self.push_common_attrs(&mut attrs);

                TextareaTemplate {
                    attrs: &attrs,
                    value: self.value().unwrap_or(""),
                }
                .render()
            }
            Widget::Select { multiple } => {
                attrs.push(AttrPair::valued("name", self.name.as_str()));
                attrs.push(AttrPair::valued("id", self.id()));
                if *multiple {
                    attrs.push(AttrPair::bare("multiple"));
                }
                self.push_common_attrs(&mut attrs);

                let options: Vec<OptionItem> = self
                    .choices
                    .iter()
                    .map(|choice| OptionItem {
                        value: choice.value.clone(),
                        label: choice.label.clone(),
                        selected: self.values.iter().any(|v| v == &choice.value),
                    })
                    .collect();

                SelectTemplate {
                    attrs: &attrs,
                    options: &options,
                }
                .render()
            }
        }
    }

    fn push_common_attrs(&self, attrs: &mut Vec<AttrPair>) {
        if self.required {
            attrs.push(AttrPair::bare("required"));
        }
        if self.readonly {
            attrs.push(AttrPair::bare("readonly"));
        }
        for (name, value) in &self.attrs {
            if value.is_empty() {
                attrs.push(AttrPair::bare(name.clone()));
            } else {
                attrs.push(AttrPair::valued(name.clone(), value.clone()));
            }
        }
    }
}

/// One rendered HTML attribute
pub(crate) struct AttrPair {
    pub name: String,
    pub value: String,
    pub has_value: bool,
}

impl AttrPair {
    fn valued(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            has_value: true,
        }
    }

    fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            has_value: false,
        }
    }
}

/// One rendered select option
pub(crate) struct OptionItem {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "forms/input.html")]
struct InputTemplate<'a> {
    kind: &'a str,
    attrs: &'a [AttrPair],
}

#[derive(Template)]
#[template(path = "forms/textarea.html")]
struct TextareaTemplate<'a> {
    attrs: &'a [AttrPair],
    value: &'a str,
}

#[derive(Template)]
#[template(path = "forms/select.html")]
struct SelectTemplate<'a> {
    attrs: &'a [AttrPair],
    options: &'a [OptionItem],
}

/// Rendered `<label>` element
#[derive(Template)]
#[template(path = "forms/label.html")]
pub(crate) struct LabelTemplate<'a> {
    pub id: &'a str,
    pub text: &'a str,
}

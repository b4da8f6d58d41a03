//! Form field filters
//!
//! The helper set the frontend's page templates apply to [`Field`]s before
//! rendering: attribute injection (`placeholder`, `classes`, `attr`), label
//! and value extraction (`label`, `label_text`, `value_text`, `values_text`),
//! and widget predicates (`optional`, `is_checkbox`, `is_readonly`,
//! `is_multiple`).

use askama::Template;

use super::fields::{Field, LabelTemplate, Widget};

/// Set the `placeholder` attribute
pub fn placeholder(mut field: Field, text: &str) -> Field {
    field.set_attr("placeholder", text);
    field
}

/// Render the field's `<label>` element
pub fn label(field: &Field) -> Result<String, askama::Error> {
    label_with_text(field, None)
}

/// Render the field's `<label>` element with overridden text
pub fn label_override(field: &Field, text: &str) -> Result<String, askama::Error> {
    label_with_text(field, Some(text))
}

fn label_with_text(field: &Field, text: Option<&str>) -> Result<String, askama::Error> {
    let derived;
    let text = match text {
        Some(text) => text,
        None => {
            derived = label_text(field);
            &derived
        }
    };
    LabelTemplate {
        id: &field.id(),
        text,
    }
    .render()
}

/// The field's default label text, derived from its name unless overridden
pub fn label_text(field: &Field) -> String {
    if let Some(label) = &field.label {
        return label.clone();
    }

    let spaced = field.name().replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}

/// Human-readable current value
///
/// For choice widgets the matching choice label is returned rather than the
/// raw submitted value.
pub fn value_text(field: &Field) -> String {
    field
        .value()
        .map(|value| display_value(field, value))
        .unwrap_or_default()
}

/// Human-readable values of a multiple select
pub fn values_text(field: &Field) -> Vec<String> {
    field
        .values
        .iter()
        .map(|value| display_value(field, value))
        .collect()
}

fn display_value(field: &Field, value: &str) -> String {
    field
        .choices
        .iter()
        .find(|choice| choice.value == value)
        .map(|choice| choice.label.clone())
        .unwrap_or_else(|| value.to_string())
}

/// Add CSS classes, appending when a class attribute is already set
pub fn classes(mut field: Field, class_names: &str) -> Field {
    let combined = match field.attr_value("class") {
        Some(existing) if !existing.is_empty() => format!("{existing} {class_names}"),
        _ => class_names.to_string(),
    };
    field.set_attr("class", &combined);
    field
}

/// Set an arbitrary attribute from `"name:value"`, or a bare attribute from
/// just `"name"`
pub fn attr(mut field: Field, definition: &str) -> Field {
    match definition.split_once(':') {
        Some((name, value)) => field.set_attr(name, value),
        None => field.set_attr(definition, ""),
    }
    field
}

/// A non-required field should be marked optional in the UI
pub fn optional(field: &Field) -> bool {
    !field.required
}

/// Check whether the field renders as a checkbox
pub fn is_checkbox(field: &Field) -> bool {
    field.widget == Widget::Checkbox
}

/// Check whether the field is read-only
pub fn is_readonly(field: &Field) -> bool {
    field.readonly
}

/// Check whether the field renders as a multiple select
pub fn is_multiple(field: &Field) -> bool {
    matches!(field.widget, Widget::Select { multiple: true })
}

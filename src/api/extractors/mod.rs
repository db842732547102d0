//! Request extractors that validate their payload before a handler runs.

mod validated_form;
mod validated_json;
mod validated_query;

pub use validated_form::ValidatedForm;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;

/// Flatten validator errors into one message, falling back to
/// "<field> is invalid" when a rule carries no message.
pub(crate) fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

use validator::ValidationErrors;

/// Flattens field errors into user-facing messages, ordered by field name.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    validation_messages_in(errors, &[])
}

/// Like [`validation_messages`], but fields listed in `order` come first, in that order.
pub fn validation_messages_in(errors: &ValidationErrors, order: &[&str]) -> Vec<String> {
    let rank = |field: &str| order.iter().position(|f| *f == field).unwrap_or(order.len());

    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| rank(a).cmp(&rank(b)).then_with(|| a.cmp(b)));

    fields
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| match error.code.as_ref() {
                        "email" => "Enter a valid email address".to_string(),
                        "length" => format!("{field} has an invalid length"),
                        "must_match" => format!("{field} does not match"),
                        _ => format!("Invalid {field}"),
                    })
            })
        })
        .collect()
}

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

/// Highest rating a product can carry
pub const MAX_RATING: f64 = 5.0;

/// Parse a submitted number, rejecting NaN and infinities
pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Prices: a finite number that is zero or greater
pub fn validate_non_negative_number(value: &str) -> Result<(), ValidationError> {
    match parse_number(value) {
        Some(n) if n >= 0.0 => Ok(()),
        _ => Err(ValidationError::new("non_negative_number")
            .with_message(Cow::from("must be a number greater than or equal to 0"))),
    }
}

/// Ratings: a finite number between 0 and 5 inclusive
pub fn validate_rating(value: &str) -> Result<(), ValidationError> {
    match parse_number(value) {
        Some(n) if (0.0..=MAX_RATING).contains(&n) => Ok(()),
        _ => Err(ValidationError::new("rating_range")
            .with_message(Cow::from("must be a number between 0 and 5"))),
    }
}

/// Flatten validator output into "field: message" lines, sorted by field
pub fn collect_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect()
}

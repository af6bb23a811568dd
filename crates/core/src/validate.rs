//! Shared validation and codec primitives.
//!
//! Small pure helpers the section validators are built from. Each helper
//! decodes one raw form value into its typed representation, recording a
//! message against the field on failure. Messages match the wording the
//! intake forms were built around.

use api_shared::wire::FieldErrors;
use chrono::{NaiveDate, NaiveDateTime};
use intake_types::{NonEmptyText, UnknownToken};

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_INVALID_CHOICE: &str = "Select a valid choice.";
pub const MSG_INVALID_DATE: &str = "Enter a valid date.";
pub const MSG_INVALID_DATETIME: &str = "Enter a valid date/time.";
pub const MSG_INVALID_WHOLE_NUMBER: &str = "Enter a whole number.";
pub const MSG_INVALID_NUMBER: &str = "Enter a number.";

/// Input format for date fields.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
/// Input format for datetime-local fields.
pub const DATETIME_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Decodes a required text field, trimming surrounding whitespace.
pub fn required_text(errors: &mut FieldErrors, field: &str, value: &str) -> Option<NonEmptyText> {
    match NonEmptyText::new(value) {
        Ok(text) => Some(text),
        Err(_) => {
            errors.add_field(field, MSG_REQUIRED);
            None
        }
    }
}

/// Trims an optional text field; blank input becomes the empty string.
pub fn optional_text(value: &str) -> String {
    value.trim().to_owned()
}

/// Trims an optional text field; blank input becomes `None`.
pub fn optional_text_or_none(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Decodes a required closed-vocabulary field.
pub fn required_choice<T>(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    decode: impl FnOnce(&str) -> Result<T, UnknownToken>,
) -> Option<T> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add_field(field, MSG_REQUIRED);
        return None;
    }
    match decode(trimmed) {
        Ok(decoded) => Some(decoded),
        Err(_) => {
            errors.add_field(field, MSG_INVALID_CHOICE);
            None
        }
    }
}

/// Decodes an optional closed-vocabulary field; blank input is `None`.
pub fn optional_choice<T>(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    decode: impl FnOnce(&str) -> Result<T, UnknownToken>,
) -> Option<T> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match decode(trimmed) {
        Ok(decoded) => Some(decoded),
        Err(_) => {
            errors.add_field(field, MSG_INVALID_CHOICE);
            None
        }
    }
}

/// Decodes an optional `YYYY-MM-DD` date field.
pub fn optional_date(errors: &mut FieldErrors, field: &str, value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(trimmed, DATE_INPUT_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add_field(field, MSG_INVALID_DATE);
            None
        }
    }
}

/// Decodes a required `YYYY-MM-DDTHH:MM` datetime field.
pub fn required_datetime(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add_field(field, MSG_REQUIRED);
        return None;
    }
    parse_datetime(errors, field, trimmed)
}

/// Decodes an optional `YYYY-MM-DDTHH:MM` datetime field.
pub fn optional_datetime(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    parse_datetime(errors, field, trimmed)
}

fn parse_datetime(errors: &mut FieldErrors, field: &str, value: &str) -> Option<NaiveDateTime> {
    match NaiveDateTime::parse_from_str(value, DATETIME_INPUT_FORMAT) {
        Ok(datetime) => Some(datetime),
        Err(_) => {
            errors.add_field(field, MSG_INVALID_DATETIME);
            None
        }
    }
}

/// Decodes an optional whole-number field.
pub fn optional_u32(errors: &mut FieldErrors, field: &str, value: &str) -> Option<u32> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<u32>() {
        Ok(number) => Some(number),
        Err(_) => {
            errors.add_field(field, MSG_INVALID_WHOLE_NUMBER);
            None
        }
    }
}

/// Decodes an optional decimal-number field.
pub fn optional_f64(errors: &mut FieldErrors, field: &str, value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() => Some(number),
        _ => {
            errors.add_field(field, MSG_INVALID_NUMBER);
            None
        }
    }
}

/// Decodes a checkbox value; browsers send `on`, other clients vary.
pub fn checkbox(value: &str) -> bool {
    matches!(value.trim(), "on" | "true" | "1" | "yes")
}

/// Encodes a checkbox back to its form value.
pub fn encode_checkbox(flag: bool) -> String {
    if flag {
        "on".to_owned()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_types::Gender;

    #[test]
    fn test_required_text_records_missing_fields() {
        let mut errors = FieldErrors::default();
        assert!(required_text(&mut errors, "patient_name", "  ").is_none());
        assert_eq!(
            errors.fields.get("patient_name"),
            Some(&vec![MSG_REQUIRED.to_string()])
        );
    }

    #[test]
    fn test_required_choice_distinguishes_blank_from_unknown() {
        let mut errors = FieldErrors::default();
        assert!(required_choice(&mut errors, "gender", "", Gender::from_token).is_none());
        assert_eq!(
            errors.fields.get("gender"),
            Some(&vec![MSG_REQUIRED.to_string()])
        );

        let mut errors = FieldErrors::default();
        assert!(required_choice(&mut errors, "gender", "unknown", Gender::from_token).is_none());
        assert_eq!(
            errors.fields.get("gender"),
            Some(&vec![MSG_INVALID_CHOICE.to_string()])
        );
    }

    #[test]
    fn test_optional_numbers_pass_blank_and_reject_garbage() {
        let mut errors = FieldErrors::default();
        assert_eq!(optional_u32(&mut errors, "breathing_spo2", ""), None);
        assert!(errors.is_empty(), "blank numeric input is not an error");

        assert_eq!(optional_u32(&mut errors, "breathing_spo2", " 97 "), Some(97));
        assert!(errors.is_empty());

        assert_eq!(optional_u32(&mut errors, "breathing_spo2", "9o"), None);
        assert_eq!(
            errors.fields.get("breathing_spo2"),
            Some(&vec![MSG_INVALID_WHOLE_NUMBER.to_string()])
        );
    }

    #[test]
    fn test_optional_f64_rejects_non_finite() {
        let mut errors = FieldErrors::default();
        assert_eq!(optional_f64(&mut errors, "temperature", "36.8"), Some(36.8));
        assert_eq!(optional_f64(&mut errors, "temperature", "NaN"), None);
        assert_eq!(
            errors.fields.get("temperature"),
            Some(&vec![MSG_INVALID_NUMBER.to_string()])
        );
    }

    #[test]
    fn test_datetime_parsing_uses_the_datetime_local_format() {
        let mut errors = FieldErrors::default();
        let parsed = required_datetime(&mut errors, "request_datetime", "2026-02-11T14:30");
        assert!(parsed.is_some(), "datetime-local input should parse");
        assert!(errors.is_empty());

        let parsed = required_datetime(&mut errors, "request_datetime", "11/02/2026 14:30");
        assert!(parsed.is_none());
        assert_eq!(
            errors.fields.get("request_datetime"),
            Some(&vec![MSG_INVALID_DATETIME.to_string()])
        );
    }

    #[test]
    fn test_checkbox_round_trip() {
        assert!(checkbox("on"));
        assert!(checkbox("true"));
        assert!(!checkbox(""));
        assert!(!checkbox("off"));
        assert!(checkbox(&encode_checkbox(true)));
        assert!(!checkbox(&encode_checkbox(false)));
    }
}

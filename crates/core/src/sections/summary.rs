//! Section C — clinical summary. One required free-text field.

use api_shared::wire::{FieldErrors, SectionCForm};
use intake_types::NonEmptyText;

use crate::validate::required_text;

/// Validates a Section C submission.
pub fn validate(form: &SectionCForm) -> Result<NonEmptyText, FieldErrors> {
    let mut errors = FieldErrors::default();
    match required_text(&mut errors, "clinical_summary", &form.clinical_summary) {
        Some(summary) => Ok(summary),
        None => Err(errors),
    }
}

/// Encodes the stored summary back into the raw form.
pub fn prefill(summary: Option<&NonEmptyText>) -> SectionCForm {
    SectionCForm {
        clinical_summary: summary.map(|text| text.to_string()).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::MSG_REQUIRED;

    #[test]
    fn test_blank_summary_is_required() {
        let form = SectionCForm {
            clinical_summary: "   ".to_string(),
        };
        let errors = validate(&form).expect_err("should fail");
        assert_eq!(
            errors.fields.get("clinical_summary"),
            Some(&vec![MSG_REQUIRED.to_string()])
        );
    }

    #[test]
    fn test_summary_round_trips_through_prefill() {
        let form = SectionCForm {
            clinical_summary: "72F, community acquired pneumonia, worsening hypoxia.".to_string(),
        };
        let summary = validate(&form).expect("should validate");
        let again = validate(&prefill(Some(&summary))).expect("prefill should re-validate");
        assert_eq!(again, summary);
    }
}

//! Section B — reason for the ICU consult.

use api_shared::wire::{FieldErrors, SectionBForm};
use intake_types::ReasonTag;

use crate::record::ReasonForConsult;
use crate::validate::{MSG_INVALID_CHOICE, MSG_REQUIRED};

pub const MSG_OTHER_REASON: &str = "Please specify the \"Other\" reason.";

/// Validates a Section B submission.
///
/// At least one reason must be ticked. When the `other` tag is among them,
/// the free-text detail must be filled in; that failure is attached to
/// `reason_other` specifically so the rest of the section still reads as
/// individually valid.
pub fn validate(form: &SectionBForm) -> Result<ReasonForConsult, FieldErrors> {
    let mut errors = FieldErrors::default();

    let mut chosen = Vec::new();
    for token in &form.reason {
        match ReasonTag::from_token(token.trim()) {
            Ok(tag) => {
                if !chosen.contains(&tag) {
                    chosen.push(tag);
                }
            }
            Err(_) => errors.add_field("reason", MSG_INVALID_CHOICE),
        }
    }
    if form.reason.is_empty() {
        errors.add_field("reason", MSG_REQUIRED);
    }

    // Stored order is the vocabulary's presentation order, not tick order.
    let reason: Vec<ReasonTag> = ReasonTag::ALL
        .iter()
        .copied()
        .filter(|tag| chosen.contains(tag))
        .collect();

    if reason.contains(&ReasonTag::Other) && form.reason_other.trim().is_empty() {
        errors.add_field("reason_other", MSG_OTHER_REASON);
    }

    if errors.is_empty() {
        Ok(ReasonForConsult {
            reason,
            reason_other: form.reason_other.clone(),
        })
    } else {
        Err(errors)
    }
}

/// Encodes the stored reason back into the raw form. An unvisited section
/// prefills as the empty form.
pub fn prefill(reason: Option<&ReasonForConsult>) -> SectionBForm {
    match reason {
        Some(reason) => SectionBForm {
            reason: reason
                .reason
                .iter()
                .map(|tag| tag.as_token().to_owned())
                .collect(),
            reason_other: reason.reason_other.clone(),
        },
        None => SectionBForm::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_reason_validates_without_other_detail() {
        let form = SectionBForm {
            reason: vec!["sepsis_syndrome".to_string()],
            reason_other: String::new(),
        };
        let reason = validate(&form).expect("should validate");
        assert_eq!(reason.reason, vec![ReasonTag::SepsisSyndrome]);
        assert_eq!(reason.reason_other, "");
    }

    #[test]
    fn test_empty_reason_set_errors_on_reason() {
        let form = SectionBForm::default();
        let errors = validate(&form).expect_err("should fail");
        assert_eq!(
            errors.fields.get("reason"),
            Some(&vec![MSG_REQUIRED.to_string()])
        );
    }

    #[test]
    fn test_other_without_detail_errors_on_reason_other_only() {
        let form = SectionBForm {
            reason: vec!["other".to_string()],
            reason_other: "  ".to_string(),
        };
        let errors = validate(&form).expect_err("should fail");
        assert_eq!(
            errors.fields.get("reason_other"),
            Some(&vec![MSG_OTHER_REASON.to_string()])
        );
        assert!(
            !errors.fields.contains_key("reason"),
            "the ticked reasons themselves are valid"
        );
        assert!(errors.form.is_empty(), "not a form-level error");
    }

    #[test]
    fn test_unknown_tag_errors_on_reason() {
        let form = SectionBForm {
            reason: vec!["cardiac_arrest".to_string()],
            reason_other: String::new(),
        };
        let errors = validate(&form).expect_err("should fail");
        assert_eq!(
            errors.fields.get("reason"),
            Some(&vec![MSG_INVALID_CHOICE.to_string()])
        );
    }

    #[test]
    fn test_tags_stored_in_vocabulary_order_and_deduplicated() {
        let form = SectionBForm {
            reason: vec![
                "other".to_string(),
                "haemodynamic_instability".to_string(),
                "respiratory_failure".to_string(),
                "haemodynamic_instability".to_string(),
            ],
            reason_other: "family request".to_string(),
        };
        let reason = validate(&form).expect("should validate");
        assert_eq!(
            reason.reason,
            vec![
                ReasonTag::HaemodynamicInstability,
                ReasonTag::RespiratoryFailure,
                ReasonTag::Other,
            ]
        );
    }

    #[test]
    fn test_prefill_round_trips_through_validate() {
        let form = SectionBForm {
            reason: vec!["multi_organ_dysfunction".to_string(), "other".to_string()],
            reason_other: "post arrest".to_string(),
        };
        let reason = validate(&form).expect("should validate");
        let prefilled = prefill(Some(&reason));
        let again = validate(&prefilled).expect("prefill should re-validate");
        assert_eq!(again, reason);
    }
}

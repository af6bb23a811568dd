//! Section G — the ICU doctor's assessment and decision.
//!
//! The terminal clinical section: decision, consultant name, signature and
//! the decision datetime are required; the narrative fields are not.
//! Saving G makes the record eligible for submission but does not submit.

use api_shared::wire::{FieldErrors, SectionGForm};
use intake_types::Decision;

use crate::record::Assessment;
use crate::validate::{
    optional_text, required_choice, required_datetime, required_text, DATETIME_INPUT_FORMAT,
};

/// Validates a Section G submission.
pub fn validate(form: &SectionGForm) -> Result<Assessment, FieldErrors> {
    let mut errors = FieldErrors::default();

    let decision = required_choice(&mut errors, "decision", &form.decision, Decision::from_token);
    let consultant_name = required_text(&mut errors, "consultant_name", &form.consultant_name);
    let signature = required_text(&mut errors, "signature", &form.signature);
    let datetime = required_datetime(&mut errors, "datetime", &form.datetime);

    match (decision, consultant_name, signature, datetime) {
        (Some(decision), Some(consultant_name), Some(signature), Some(datetime))
            if errors.is_empty() =>
        {
            Ok(Assessment {
                assessment: optional_text(&form.assessment),
                decision,
                plan_comments: optional_text(&form.plan_comments),
                consultant_name,
                signature,
                datetime,
                contact_no: optional_text(&form.contact_no),
            })
        }
        _ => Err(errors),
    }
}

/// Encodes the stored assessment back into the raw form.
pub fn prefill(assessment: Option<&Assessment>) -> SectionGForm {
    match assessment {
        Some(assessment) => SectionGForm {
            assessment: assessment.assessment.clone(),
            decision: assessment.decision.as_token().to_owned(),
            plan_comments: assessment.plan_comments.clone(),
            consultant_name: assessment.consultant_name.to_string(),
            signature: assessment.signature.to_string(),
            datetime: assessment
                .datetime
                .format(DATETIME_INPUT_FORMAT)
                .to_string(),
            contact_no: assessment.contact_no.clone(),
        },
        None => SectionGForm::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{MSG_INVALID_CHOICE, MSG_REQUIRED};

    fn complete_form() -> SectionGForm {
        SectionGForm {
            assessment: "Septic shock with single organ support need.".to_string(),
            decision: "admit".to_string(),
            plan_comments: "Bed 4, start lines on arrival.".to_string(),
            consultant_name: "Dr N Dlamini".to_string(),
            signature: "ND".to_string(),
            datetime: "2026-02-11T15:05".to_string(),
            contact_no: "71234".to_string(),
        }
    }

    #[test]
    fn test_complete_form_validates() {
        let assessment = validate(&complete_form()).expect("should validate");
        assert_eq!(assessment.decision, Decision::Admit);
        assert_eq!(assessment.consultant_name.as_str(), "Dr N Dlamini");
    }

    #[test]
    fn test_missing_required_fields_are_field_errors() {
        let mut form = complete_form();
        form.decision = String::new();
        form.consultant_name = "  ".to_string();
        form.signature = String::new();
        form.datetime = String::new();
        let errors = validate(&form).expect_err("should fail");
        for field in ["decision", "consultant_name", "signature", "datetime"] {
            assert_eq!(
                errors.fields.get(field),
                Some(&vec![MSG_REQUIRED.to_string()]),
                "{field} should be required"
            );
        }
    }

    #[test]
    fn test_unknown_decision_is_a_field_error() {
        let mut form = complete_form();
        form.decision = "discharge".to_string();
        let errors = validate(&form).expect_err("should fail");
        assert_eq!(
            errors.fields.get("decision"),
            Some(&vec![MSG_INVALID_CHOICE.to_string()])
        );
    }

    #[test]
    fn test_optional_fields_may_be_blank() {
        let mut form = complete_form();
        form.assessment = String::new();
        form.plan_comments = String::new();
        form.contact_no = String::new();
        let assessment = validate(&form).expect("should validate");
        assert_eq!(assessment.assessment, "");
        assert_eq!(assessment.plan_comments, "");
        assert_eq!(assessment.contact_no, "");
    }

    #[test]
    fn test_prefill_round_trips_through_validate() {
        let assessment = validate(&complete_form()).expect("should validate");
        let again = validate(&prefill(Some(&assessment))).expect("prefill should re-validate");
        assert_eq!(again, assessment);
    }
}

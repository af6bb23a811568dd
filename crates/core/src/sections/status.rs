//! Section D — current clinical status.
//!
//! A flat bag of independently optional observations: nothing is required,
//! nothing is cross-checked. Yes/no questions go through the tri-state
//! codec, which passes unrecognised tokens through as unset rather than
//! rejecting them; numeric vitals, by contrast, reject unparseable input —
//! silently dropping a mistyped SpO2 would be worse than asking again.

use api_shared::wire::{FieldErrors, SectionDForm};
use intake_types::{FluidType, TriState};

use crate::record::ClinicalStatus;
use crate::validate::{
    checkbox, encode_checkbox, optional_choice, optional_f64, optional_text, optional_u32,
};

/// Validates a Section D submission.
pub fn validate(form: &SectionDForm) -> Result<ClinicalStatus, FieldErrors> {
    let mut errors = FieldErrors::default();

    let breathing_spo2 = optional_u32(&mut errors, "breathing_spo2", &form.breathing_spo2);
    let bp_systolic = optional_u32(&mut errors, "bp_systolic", &form.bp_systolic);
    let bp_diastolic = optional_u32(&mut errors, "bp_diastolic", &form.bp_diastolic);
    let heart_rate = optional_u32(&mut errors, "heart_rate", &form.heart_rate);
    let fluid_urine_output =
        optional_f64(&mut errors, "fluid_urine_output", &form.fluid_urine_output);
    let temperature = optional_f64(&mut errors, "temperature", &form.temperature);
    let fluid_type = optional_choice(
        &mut errors,
        "fluid_type",
        &form.fluid_type,
        FluidType::from_token,
    );

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ClinicalStatus {
        airway_patent: checkbox(&form.airway_patent),
        airway_threatened: checkbox(&form.airway_threatened),
        intubated: TriState::decode(&form.intubated),
        breathing_spo2,
        breathing_distress: TriState::decode(&form.breathing_distress),
        breathing_device: optional_text(&form.breathing_device),
        bp_systolic,
        bp_diastolic,
        circulation_inotropes: TriState::decode(&form.circulation_inotropes),
        circulation_anti_hpt: TriState::decode(&form.circulation_anti_hpt),
        heart_rate,
        heart_rhythm: optional_text(&form.heart_rhythm),
        fluid_type,
        fluid_urine_output,
        temperature,
        measures: optional_text(&form.measures),
        gcs: optional_text(&form.gcs),
        sedation: TriState::decode(&form.sedation),
        pupil_left_size: optional_text(&form.pupil_left_size),
        pupil_left_reactivity: optional_text(&form.pupil_left_reactivity),
        pupil_right_size: optional_text(&form.pupil_right_size),
        pupil_right_reactivity: optional_text(&form.pupil_right_reactivity),
    })
}

/// Encodes the stored clinical status back into the raw form.
pub fn prefill(status: &ClinicalStatus) -> SectionDForm {
    SectionDForm {
        airway_patent: encode_checkbox(status.airway_patent),
        airway_threatened: encode_checkbox(status.airway_threatened),
        intubated: status.intubated.encode().to_owned(),
        breathing_spo2: encode_u32(status.breathing_spo2),
        breathing_distress: status.breathing_distress.encode().to_owned(),
        breathing_device: status.breathing_device.clone(),
        bp_systolic: encode_u32(status.bp_systolic),
        bp_diastolic: encode_u32(status.bp_diastolic),
        circulation_inotropes: status.circulation_inotropes.encode().to_owned(),
        circulation_anti_hpt: status.circulation_anti_hpt.encode().to_owned(),
        heart_rate: encode_u32(status.heart_rate),
        heart_rhythm: status.heart_rhythm.clone(),
        fluid_type: status
            .fluid_type
            .map(|fluid| fluid.as_token().to_owned())
            .unwrap_or_default(),
        fluid_urine_output: encode_f64(status.fluid_urine_output),
        temperature: encode_f64(status.temperature),
        measures: status.measures.clone(),
        gcs: status.gcs.clone(),
        sedation: status.sedation.encode().to_owned(),
        pupil_left_size: status.pupil_left_size.clone(),
        pupil_left_reactivity: status.pupil_left_reactivity.clone(),
        pupil_right_size: status.pupil_right_size.clone(),
        pupil_right_reactivity: status.pupil_right_reactivity.clone(),
    }
}

fn encode_u32(value: Option<u32>) -> String {
    value.map(|number| number.to_string()).unwrap_or_default()
}

fn encode_f64(value: Option<f64>) -> String {
    value.map(|number| number.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{MSG_INVALID_CHOICE, MSG_INVALID_WHOLE_NUMBER};

    #[test]
    fn test_all_empty_form_validates_to_default_status() {
        let status = validate(&SectionDForm::default()).expect("empty form should validate");
        assert_eq!(status, ClinicalStatus::default());
    }

    #[test]
    fn test_unrecognised_tristate_tokens_pass_through_as_unset() {
        let form = SectionDForm {
            intubated: "yes".to_string(),
            breathing_distress: "NO".to_string(),
            sedation: "maybe".to_string(),
            ..SectionDForm::default()
        };
        let status = validate(&form).expect("should validate");
        assert_eq!(status.intubated, TriState::Yes);
        assert_eq!(status.breathing_distress, TriState::Unset);
        assert_eq!(status.sedation, TriState::Unset);
    }

    #[test]
    fn test_garbage_numeric_input_is_a_field_error() {
        let form = SectionDForm {
            breathing_spo2: "9o".to_string(),
            ..SectionDForm::default()
        };
        let errors = validate(&form).expect_err("should fail");
        assert_eq!(
            errors.fields.get("breathing_spo2"),
            Some(&vec![MSG_INVALID_WHOLE_NUMBER.to_string()])
        );
    }

    #[test]
    fn test_unknown_fluid_type_is_a_field_error() {
        let form = SectionDForm {
            fluid_type: "colloid".to_string(),
            ..SectionDForm::default()
        };
        let errors = validate(&form).expect_err("should fail");
        assert_eq!(
            errors.fields.get("fluid_type"),
            Some(&vec![MSG_INVALID_CHOICE.to_string()])
        );
    }

    #[test]
    fn test_populated_form_round_trips_through_prefill() {
        let form = SectionDForm {
            airway_patent: "on".to_string(),
            intubated: "yes".to_string(),
            breathing_spo2: "92".to_string(),
            breathing_distress: "no".to_string(),
            breathing_device: "non-rebreather".to_string(),
            bp_systolic: "88".to_string(),
            bp_diastolic: "54".to_string(),
            circulation_inotropes: "yes".to_string(),
            heart_rate: "128".to_string(),
            heart_rhythm: "sinus tach".to_string(),
            fluid_type: "fluid_type2".to_string(),
            fluid_urine_output: "12.5".to_string(),
            temperature: "38.9".to_string(),
            gcs: "10/15".to_string(),
            sedation: "no".to_string(),
            pupil_left_size: "3mm".to_string(),
            pupil_left_reactivity: "brisk".to_string(),
            pupil_right_size: "3mm".to_string(),
            pupil_right_reactivity: "brisk".to_string(),
            ..SectionDForm::default()
        };
        let status = validate(&form).expect("should validate");
        let again = validate(&prefill(&status)).expect("prefill should re-validate");
        assert_eq!(again, status);
    }
}

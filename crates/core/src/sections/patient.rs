//! Section A — patient and requesting team details.
//!
//! The only section that creates a record, and the only one with a
//! cross-field rule: age is derived from the date of birth whenever one is
//! supplied, overwriting any manually typed age. The overwrite is surfaced
//! to the caller because a successful save responds with the normalized
//! prefill of this section.

use api_shared::wire::{FieldErrors, SectionAForm};
use chrono::{Datelike, NaiveDate};
use intake_types::{Discipline, Gender, Ward};

use crate::record::PatientDetails;
use crate::validate::{
    optional_date, optional_text_or_none, optional_u32, required_choice, required_datetime,
    required_text, DATETIME_INPUT_FORMAT, DATE_INPUT_FORMAT,
};

pub const MSG_AGE_OR_DOB: &str = "Please provide either Age or Date of Birth.";
pub const MSG_DOB_IN_FUTURE: &str = "Date of birth cannot be in the future.";

/// Full years elapsed from `dob` to `today`.
///
/// The year difference is decremented by one while the anniversary is still
/// ahead in the calendar year, so the boundary lands exactly on the
/// birthday: `N` years on the day itself, `N - 1` the day before.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let before_anniversary = (today.month(), today.day()) < (dob.month(), dob.day());
    today.year() - dob.year() - i32::from(before_anniversary)
}

/// Validates a Section A submission against the given calendar date.
///
/// # Errors
///
/// Returns the accumulated `FieldErrors` when any field fails; the single
/// form-level message [`MSG_AGE_OR_DOB`] is used when both age and date of
/// birth were left blank.
pub fn validate(form: &SectionAForm, today: NaiveDate) -> Result<PatientDetails, FieldErrors> {
    let mut errors = FieldErrors::default();

    let patient_name = required_text(&mut errors, "patient_name", &form.patient_name);
    let date_of_birth = optional_date(&mut errors, "date_of_birth", &form.date_of_birth);
    let manual_age = optional_u32(&mut errors, "age", &form.age);
    let gender = required_choice(&mut errors, "gender", &form.gender, Gender::from_token);
    let hospital_number = required_text(&mut errors, "hospital_number", &form.hospital_number);
    let ward = required_choice(&mut errors, "ward", &form.ward, Ward::from_token);
    let request_datetime =
        required_datetime(&mut errors, "request_datetime", &form.request_datetime);
    let requesting_discipline = required_choice(
        &mut errors,
        "requesting_discipline",
        &form.requesting_discipline,
        Discipline::from_token,
    );

    let mut age = manual_age;
    match date_of_birth {
        Some(dob) if dob > today => {
            errors.add_field("date_of_birth", MSG_DOB_IN_FUTURE);
        }
        Some(dob) => {
            // Derived age overwrites whatever was typed.
            age = Some(age_on(dob, today) as u32);
        }
        None => {
            if form.date_of_birth.trim().is_empty() && form.age.trim().is_empty() {
                errors.add_form(MSG_AGE_OR_DOB);
            }
        }
    }

    match (
        patient_name,
        gender,
        hospital_number,
        ward,
        request_datetime,
        requesting_discipline,
    ) {
        (
            Some(patient_name),
            Some(gender),
            Some(hospital_number),
            Some(ward),
            Some(request_datetime),
            Some(requesting_discipline),
        ) if errors.is_empty() => Ok(PatientDetails {
            patient_name,
            date_of_birth,
            age,
            gender,
            hospital_number,
            ward,
            request_datetime,
            requesting_discipline,
            requesting_dr: optional_text_or_none(&form.requesting_dr),
            requesting_dr_contact: optional_text_or_none(&form.requesting_dr_contact),
            requesting_dr_speed_dial: optional_text_or_none(&form.requesting_dr_speed_dial),
        }),
        _ => Err(errors),
    }
}

/// Encodes the stored patient details back into the raw form.
pub fn prefill(patient: &PatientDetails) -> SectionAForm {
    SectionAForm {
        patient_name: patient.patient_name.to_string(),
        date_of_birth: patient
            .date_of_birth
            .map(|dob| dob.format(DATE_INPUT_FORMAT).to_string())
            .unwrap_or_default(),
        age: patient.age.map(|age| age.to_string()).unwrap_or_default(),
        gender: patient.gender.as_token().to_owned(),
        hospital_number: patient.hospital_number.to_string(),
        ward: patient.ward.as_token().to_owned(),
        request_datetime: patient
            .request_datetime
            .format(DATETIME_INPUT_FORMAT)
            .to_string(),
        requesting_discipline: patient.requesting_discipline.as_token().to_owned(),
        requesting_dr: patient.requesting_dr.clone().unwrap_or_default(),
        requesting_dr_contact: patient.requesting_dr_contact.clone().unwrap_or_default(),
        requesting_dr_speed_dial: patient
            .requesting_dr_speed_dial
            .clone()
            .unwrap_or_default(),
    }
}

//! Section E — investigations. Three optional free-text blocks plus an
//! optional timestamp for when the tests were done.

use api_shared::wire::{FieldErrors, SectionEForm};

use crate::record::Investigations;
use crate::validate::{optional_datetime, optional_text, DATETIME_INPUT_FORMAT};

/// Validates a Section E submission. The only thing that can fail is the
/// syntax of `time_tests_done`.
pub fn validate(form: &SectionEForm) -> Result<Investigations, FieldErrors> {
    let mut errors = FieldErrors::default();
    let time_tests_done = optional_datetime(&mut errors, "time_tests_done", &form.time_tests_done);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Investigations {
        latest_abg: optional_text(&form.latest_abg),
        key_labs: optional_text(&form.key_labs),
        imaging_findings: optional_text(&form.imaging_findings),
        time_tests_done,
    })
}

/// Encodes the stored investigations back into the raw form.
pub fn prefill(investigations: &Investigations) -> SectionEForm {
    SectionEForm {
        latest_abg: investigations.latest_abg.clone(),
        key_labs: investigations.key_labs.clone(),
        imaging_findings: investigations.imaging_findings.clone(),
        time_tests_done: investigations
            .time_tests_done
            .map(|when| when.format(DATETIME_INPUT_FORMAT).to_string())
            .unwrap_or_default(),
    }
}

//! Section F — current and planned interventions. Six independently
//! optional free-text fields; a pure pass-through store.

use api_shared::wire::{FieldErrors, SectionFForm};

use crate::record::Interventions;
use crate::validate::optional_text;

/// Validates a Section F submission. Nothing can fail; the `Result` keeps
/// the section contract uniform across the wizard.
pub fn validate(form: &SectionFForm) -> Result<Interventions, FieldErrors> {
    Ok(Interventions {
        airway: optional_text(&form.airway),
        ventilation: optional_text(&form.ventilation),
        iv_fluids: optional_text(&form.iv_fluids),
        inotropes: optional_text(&form.inotropes),
        antibiotics: optional_text(&form.antibiotics),
        other_interventions: optional_text(&form.other_interventions),
    })
}

/// Encodes the stored interventions back into the raw form.
pub fn prefill(interventions: &Interventions) -> SectionFForm {
    SectionFForm {
        airway: interventions.airway.clone(),
        ventilation: interventions.ventilation.clone(),
        iv_fluids: interventions.iv_fluids.clone(),
        inotropes: interventions.inotropes.clone(),
        antibiotics: interventions.antibiotics.clone(),
        other_interventions: interventions.other_interventions.clone(),
    }
}

//! Raw form and view types exchanged with clients.
//!
//! Every section of the wizard has a form type whose fields are plain
//! strings, exactly as an HTML form would submit them: missing keys default
//! to the empty value, multi-selects are lists of tokens, and checkboxes are
//! truthy tokens. The core validators decode these into typed record fields;
//! prefill encodes stored values back so that re-submitting a prefilled form
//! validates unchanged.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Validation messages for one section.
///
/// `form` carries errors attached to the section as a whole; `fields` maps a
/// field name to the messages attached to it. A default value means the
/// section validated cleanly.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldErrors {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub form: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    /// Attaches a message to the section as a whole.
    pub fn add_form(&mut self, message: impl Into<String>) {
        self.form.push(message.into());
    }

    /// Attaches a message to a named field.
    pub fn add_field(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// True when no message has been recorded.
    pub fn is_empty(&self) -> bool {
        self.form.is_empty() && self.fields.is_empty()
    }
}

/// Section A — patient and requesting team details.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SectionAForm {
    pub patient_name: String,
    /// `YYYY-MM-DD`, or empty when the date of birth is not known.
    pub date_of_birth: String,
    /// Whole number of years; recomputed from `date_of_birth` when that is
    /// supplied.
    pub age: String,
    pub gender: String,
    pub hospital_number: String,
    pub ward: String,
    /// `YYYY-MM-DDTHH:MM`.
    pub request_datetime: String,
    pub requesting_discipline: String,
    pub requesting_dr: String,
    pub requesting_dr_contact: String,
    pub requesting_dr_speed_dial: String,
}

/// Section B — reason for the ICU consult.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SectionBForm {
    /// Ticked reason tokens, any order.
    pub reason: Vec<String>,
    /// Free-text detail, required only when the `other` tag is ticked.
    pub reason_other: String,
}

/// Section C — clinical summary.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SectionCForm {
    pub clinical_summary: String,
}

/// Section D — current clinical status. Every field is optional.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SectionDForm {
    pub airway_patent: String,
    pub airway_threatened: String,
    pub intubated: String,
    pub breathing_spo2: String,
    pub breathing_distress: String,
    pub breathing_device: String,
    pub bp_systolic: String,
    pub bp_diastolic: String,
    pub circulation_inotropes: String,
    pub circulation_anti_hpt: String,
    pub heart_rate: String,
    pub heart_rhythm: String,
    pub fluid_type: String,
    pub fluid_urine_output: String,
    pub temperature: String,
    pub measures: String,
    pub gcs: String,
    pub sedation: String,
    pub pupil_left_size: String,
    pub pupil_left_reactivity: String,
    pub pupil_right_size: String,
    pub pupil_right_reactivity: String,
}

/// Section E — investigations.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SectionEForm {
    pub latest_abg: String,
    pub key_labs: String,
    pub imaging_findings: String,
    /// `YYYY-MM-DDTHH:MM`, or empty.
    pub time_tests_done: String,
}

/// Section F — current and planned interventions.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SectionFForm {
    pub airway: String,
    pub ventilation: String,
    pub iv_fluids: String,
    pub inotropes: String,
    pub antibiotics: String,
    pub other_interventions: String,
}

/// Section G — ICU doctor's assessment and decision.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SectionGForm {
    pub assessment: String,
    pub decision: String,
    pub plan_comments: String,
    pub consultant_name: String,
    pub signature: String,
    /// `YYYY-MM-DDTHH:MM`.
    pub datetime: String,
    pub contact_no: String,
}

/// The render triple for one wizard section: which consult it belongs to
/// (none for a blank Section A), the raw fields to display, the stage the
/// client should move to after a successful save, and any validation
/// messages to annotate the fields with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[aliases(
    SectionAView = SectionView<SectionAForm>,
    SectionBView = SectionView<SectionBForm>,
    SectionCView = SectionView<SectionCForm>,
    SectionDView = SectionView<SectionDForm>,
    SectionEView = SectionView<SectionEForm>,
    SectionFView = SectionView<SectionFForm>,
    SectionGView = SectionView<SectionGForm>
)]
pub struct SectionView<F> {
    pub consult_id: Option<u64>,
    /// Stage this view renders, e.g. `"a"`.
    pub section: String,
    pub fields: F,
    /// Stage to continue with after a successful save, e.g. `"b"`.
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,
}

/// Read-only projection of a full consult record, used by the summary and
/// review endpoints. Sections not yet visited render as their empty forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConsultView {
    pub consult_id: u64,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    pub submitted: bool,
    pub patient: SectionAForm,
    pub reason: SectionBForm,
    pub clinical_summary: SectionCForm,
    pub clinical_status: SectionDForm,
    pub investigations: SectionEForm,
    pub interventions: SectionFForm,
    pub assessment: SectionGForm,
}

/// One row of the public listing of submitted consults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConsultListItem {
    pub consult_id: u64,
    pub patient_name: String,
    /// Resolved age in years (derived from date of birth when available).
    pub age: Option<u32>,
    pub ward: String,
    /// `YYYY-MM-DD HH:MM`, for display.
    pub request_datetime: String,
    /// Decision token, or empty while no assessment has been recorded.
    pub decision: String,
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

//! The consult record and its per-section field groups.
//!
//! One [`ConsultRecord`] represents a single ICU consultation request as it
//! moves through the intake wizard. Section A's fields are present from
//! creation (a record only comes into existence through a successful
//! Section A save); the remaining sections start out empty and are filled
//! in one at a time. Sections never share fields, so each owns a plain
//! struct rather than anything polymorphic.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use intake_types::{
    Decision, Discipline, FluidType, Gender, NonEmptyText, ReasonTag, TriState, Ward,
};
use serde::{Deserialize, Serialize};

/// Stable identifier of one consult record.
///
/// Ids are allocated monotonically by the store, so descending id order is
/// newest-created-first. Immutable once assigned.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ConsultId(u64);

impl ConsultId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ConsultId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ConsultId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

/// Section A — patient and requesting team details.
///
/// After a successful Section A save at least one of `age` /
/// `date_of_birth` is always present; when both are, `age` is the value
/// derived from the date of birth, not whatever was typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientDetails {
    pub patient_name: NonEmptyText,
    pub date_of_birth: Option<NaiveDate>,
    pub age: Option<u32>,
    pub gender: Gender,
    pub hospital_number: NonEmptyText,
    pub ward: Ward,
    pub request_datetime: NaiveDateTime,
    pub requesting_discipline: Discipline,
    pub requesting_dr: Option<String>,
    pub requesting_dr_contact: Option<String>,
    pub requesting_dr_speed_dial: Option<String>,
}

/// Section B — reason for the consult.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasonForConsult {
    /// Non-empty, stored in vocabulary declaration order.
    pub reason: Vec<ReasonTag>,
    /// Verbatim free text; meaningful only when `reason` contains `other`.
    pub reason_other: String,
}

/// Section D — current clinical status. A flat bag of independently
/// optional observations; vitals are rarely all available at consult time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClinicalStatus {
    pub airway_patent: bool,
    pub airway_threatened: bool,
    pub intubated: TriState,
    pub breathing_spo2: Option<u32>,
    pub breathing_distress: TriState,
    pub breathing_device: String,
    pub bp_systolic: Option<u32>,
    pub bp_diastolic: Option<u32>,
    pub circulation_inotropes: TriState,
    pub circulation_anti_hpt: TriState,
    pub heart_rate: Option<u32>,
    pub heart_rhythm: String,
    pub fluid_type: Option<FluidType>,
    pub fluid_urine_output: Option<f64>,
    pub temperature: Option<f64>,
    pub measures: String,
    pub gcs: String,
    pub sedation: TriState,
    pub pupil_left_size: String,
    pub pupil_left_reactivity: String,
    pub pupil_right_size: String,
    pub pupil_right_reactivity: String,
}

/// Section E — investigations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Investigations {
    pub latest_abg: String,
    pub key_labs: String,
    pub imaging_findings: String,
    pub time_tests_done: Option<NaiveDateTime>,
}

/// Section F — current and planned interventions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interventions {
    pub airway: String,
    pub ventilation: String,
    pub iv_fluids: String,
    pub inotropes: String,
    pub antibiotics: String,
    pub other_interventions: String,
}

/// Section G — the ICU doctor's assessment and decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub assessment: String,
    pub decision: Decision,
    pub plan_comments: String,
    pub consultant_name: NonEmptyText,
    pub signature: NonEmptyText,
    pub datetime: NaiveDateTime,
    pub contact_no: String,
}

/// One ICU consultation request.
///
/// Lives in exactly one of two lifecycle states: draft (`submitted` false)
/// or final (`submitted` true). The transition is one-way and happens only
/// through the submission gate, never through a section save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultRecord {
    pub id: ConsultId,
    pub created_at: DateTime<Utc>,
    pub patient: PatientDetails,
    #[serde(default)]
    pub reason: Option<ReasonForConsult>,
    #[serde(default)]
    pub clinical_summary: Option<NonEmptyText>,
    #[serde(default)]
    pub clinical_status: ClinicalStatus,
    #[serde(default)]
    pub investigations: Investigations,
    #[serde(default)]
    pub interventions: Interventions,
    #[serde(default)]
    pub assessment: Option<Assessment>,
    #[serde(default)]
    pub submitted: bool,
}

impl ConsultRecord {
    /// Creates a fresh draft from a validated Section A field set.
    pub fn new(id: ConsultId, created_at: DateTime<Utc>, patient: PatientDetails) -> Self {
        Self {
            id,
            created_at,
            patient,
            reason: None,
            clinical_summary: None,
            clinical_status: ClinicalStatus::default(),
            investigations: Investigations::default(),
            interventions: Interventions::default(),
            assessment: None,
            submitted: false,
        }
    }
}

//! The wizard state machine and submission gate.
//!
//! Sections run strictly A through G with a single forward edge per stage;
//! there is no skipping and no branching on data. Section A creates the
//! record; sections B–G load it by id and fail with `NotFound` when the id
//! does not resolve — a lookup failure, never an implicit creation. A save
//! writes the record only after its whole section validated, so a failed
//! save leaves the stored record exactly as it was.
//!
//! There is no session-like "current consult" state anywhere: every B–G
//! call carries the record id explicitly.

use chrono::Utc;

use api_shared::wire::{
    ConsultListItem, ConsultView, FieldErrors, SectionAForm, SectionBForm, SectionCForm,
    SectionDForm, SectionEForm, SectionFForm, SectionGForm,
};

use crate::error::IntakeResult;
use crate::record::{ConsultId, ConsultRecord};
use crate::sections;
use crate::store::ConsultStore;

/// Stages of the wizard, in visit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    SectionA,
    SectionB,
    SectionC,
    SectionD,
    SectionE,
    SectionF,
    SectionG,
    Summary,
    Complete,
}

impl Stage {
    /// The single forward edge; `Complete` is terminal.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::SectionA => Some(Stage::SectionB),
            Stage::SectionB => Some(Stage::SectionC),
            Stage::SectionC => Some(Stage::SectionD),
            Stage::SectionD => Some(Stage::SectionE),
            Stage::SectionE => Some(Stage::SectionF),
            Stage::SectionF => Some(Stage::SectionG),
            Stage::SectionG => Some(Stage::Summary),
            Stage::Summary => Some(Stage::Complete),
            Stage::Complete => None,
        }
    }

    /// Stable name used in routes and view payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::SectionA => "a",
            Stage::SectionB => "b",
            Stage::SectionC => "c",
            Stage::SectionD => "d",
            Stage::SectionE => "e",
            Stage::SectionF => "f",
            Stage::SectionG => "g",
            Stage::Summary => "summary",
            Stage::Complete => "complete",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of attempting to save one section.
///
/// Validation failure is data, not an error: the caller re-renders the same
/// stage with the echoed fields and their messages, and the stored record is
/// untouched. On success `fields` carries the *normalized* prefill, so any
/// correction made during validation (the derived age overwriting a typed
/// one) is visible to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome<F> {
    Saved {
        consult_id: ConsultId,
        next: Stage,
        fields: F,
    },
    Invalid {
        fields: F,
        errors: FieldErrors,
    },
}

/// Orchestrates the intake flow over a [`ConsultStore`].
pub struct ConsultWizard {
    store: ConsultStore,
}

impl ConsultWizard {
    pub fn new(store: ConsultStore) -> Self {
        Self { store }
    }

    /// Entry into Section A: a blank form, no record id yet.
    pub fn blank_patient(&self) -> SectionAForm {
        SectionAForm::default()
    }

    /// Saves Section A, creating the record on success.
    pub fn save_patient(&self, form: &SectionAForm) -> IntakeResult<SaveOutcome<SectionAForm>> {
        match sections::patient::validate(form, Utc::now().date_naive()) {
            Ok(patient) => {
                let record = self.store.create(patient)?;
                tracing::info!(consult_id = %record.id, "consult created from section A");
                Ok(SaveOutcome::Saved {
                    consult_id: record.id,
                    next: Stage::SectionB,
                    fields: sections::patient::prefill(&record.patient),
                })
            }
            Err(errors) => Ok(SaveOutcome::Invalid {
                fields: form.clone(),
                errors,
            }),
        }
    }

    /// Revisiting Section A redisplays the stored fields.
    pub fn prefill_patient(&self, id: ConsultId) -> IntakeResult<SectionAForm> {
        let record = self.store.get(id)?;
        Ok(sections::patient::prefill(&record.patient))
    }

    pub fn prefill_reason(&self, id: ConsultId) -> IntakeResult<SectionBForm> {
        let record = self.store.get(id)?;
        Ok(sections::reason::prefill(record.reason.as_ref()))
    }

    pub fn save_reason(
        &self,
        id: ConsultId,
        form: &SectionBForm,
    ) -> IntakeResult<SaveOutcome<SectionBForm>> {
        self.store.get(id)?;
        match sections::reason::validate(form) {
            Ok(reason) => {
                let record = self.store.update(id, |record| record.reason = Some(reason))?;
                Ok(SaveOutcome::Saved {
                    consult_id: id,
                    next: Stage::SectionC,
                    fields: sections::reason::prefill(record.reason.as_ref()),
                })
            }
            Err(errors) => Ok(SaveOutcome::Invalid {
                fields: form.clone(),
                errors,
            }),
        }
    }

    pub fn prefill_summary(&self, id: ConsultId) -> IntakeResult<SectionCForm> {
        let record = self.store.get(id)?;
        Ok(sections::summary::prefill(record.clinical_summary.as_ref()))
    }

    pub fn save_summary(
        &self,
        id: ConsultId,
        form: &SectionCForm,
    ) -> IntakeResult<SaveOutcome<SectionCForm>> {
        self.store.get(id)?;
        match sections::summary::validate(form) {
            Ok(summary) => {
                let record = self
                    .store
                    .update(id, |record| record.clinical_summary = Some(summary))?;
                Ok(SaveOutcome::Saved {
                    consult_id: id,
                    next: Stage::SectionD,
                    fields: sections::summary::prefill(record.clinical_summary.as_ref()),
                })
            }
            Err(errors) => Ok(SaveOutcome::Invalid {
                fields: form.clone(),
                errors,
            }),
        }
    }

    pub fn prefill_status(&self, id: ConsultId) -> IntakeResult<SectionDForm> {
        let record = self.store.get(id)?;
        Ok(sections::status::prefill(&record.clinical_status))
    }

    pub fn save_status(
        &self,
        id: ConsultId,
        form: &SectionDForm,
    ) -> IntakeResult<SaveOutcome<SectionDForm>> {
        self.store.get(id)?;
        match sections::status::validate(form) {
            Ok(status) => {
                let record = self
                    .store
                    .update(id, |record| record.clinical_status = status)?;
                Ok(SaveOutcome::Saved {
                    consult_id: id,
                    next: Stage::SectionE,
                    fields: sections::status::prefill(&record.clinical_status),
                })
            }
            Err(errors) => Ok(SaveOutcome::Invalid {
                fields: form.clone(),
                errors,
            }),
        }
    }

    pub fn prefill_investigations(&self, id: ConsultId) -> IntakeResult<SectionEForm> {
        let record = self.store.get(id)?;
        Ok(sections::investigations::prefill(&record.investigations))
    }

    pub fn save_investigations(
        &self,
        id: ConsultId,
        form: &SectionEForm,
    ) -> IntakeResult<SaveOutcome<SectionEForm>> {
        self.store.get(id)?;
        match sections::investigations::validate(form) {
            Ok(investigations) => {
                let record = self
                    .store
                    .update(id, |record| record.investigations = investigations)?;
                Ok(SaveOutcome::Saved {
                    consult_id: id,
                    next: Stage::SectionF,
                    fields: sections::investigations::prefill(&record.investigations),
                })
            }
            Err(errors) => Ok(SaveOutcome::Invalid {
                fields: form.clone(),
                errors,
            }),
        }
    }

    pub fn prefill_interventions(&self, id: ConsultId) -> IntakeResult<SectionFForm> {
        let record = self.store.get(id)?;
        Ok(sections::interventions::prefill(&record.interventions))
    }

    pub fn save_interventions(
        &self,
        id: ConsultId,
        form: &SectionFForm,
    ) -> IntakeResult<SaveOutcome<SectionFForm>> {
        self.store.get(id)?;
        match sections::interventions::validate(form) {
            Ok(interventions) => {
                let record = self
                    .store
                    .update(id, |record| record.interventions = interventions)?;
                Ok(SaveOutcome::Saved {
                    consult_id: id,
                    next: Stage::SectionG,
                    fields: sections::interventions::prefill(&record.interventions),
                })
            }
            Err(errors) => Ok(SaveOutcome::Invalid {
                fields: form.clone(),
                errors,
            }),
        }
    }

    pub fn prefill_assessment(&self, id: ConsultId) -> IntakeResult<SectionGForm> {
        let record = self.store.get(id)?;
        Ok(sections::assessment::prefill(record.assessment.as_ref()))
    }

    pub fn save_assessment(
        &self,
        id: ConsultId,
        form: &SectionGForm,
    ) -> IntakeResult<SaveOutcome<SectionGForm>> {
        self.store.get(id)?;
        match sections::assessment::validate(form) {
            Ok(assessment) => {
                let record = self
                    .store
                    .update(id, |record| record.assessment = Some(assessment))?;
                Ok(SaveOutcome::Saved {
                    consult_id: id,
                    next: Stage::Summary,
                    fields: sections::assessment::prefill(record.assessment.as_ref()),
                })
            }
            Err(errors) => Ok(SaveOutcome::Invalid {
                fields: form.clone(),
                errors,
            }),
        }
    }

    /// Read-only projection of the full record. Available at any time given
    /// a valid id — not gated on having completed Section G — and reflects
    /// whatever has been saved so far.
    pub fn summary(&self, id: ConsultId) -> IntakeResult<ConsultView> {
        Ok(consult_view(self.store.get(id)?))
    }

    /// The submission gate: marks the record final and publicly listable.
    ///
    /// Idempotent — submitting an already-submitted record is a no-op
    /// success. There is no un-submit.
    pub fn submit(&self, id: ConsultId) -> IntakeResult<ConsultView> {
        let record = self.store.update(id, |record| record.submitted = true)?;
        tracing::info!(consult_id = %id, "consult submitted");
        Ok(consult_view(record))
    }

    /// The public listing: submitted records only, newest first.
    pub fn list_submitted(&self) -> IntakeResult<Vec<ConsultListItem>> {
        let records = self.store.list_submitted()?;
        Ok(records.into_iter().map(list_item).collect())
    }
}

/// Assembles the read-only projection from a record: every section encoded
/// through its prefill, so the summary shows exactly what a revisit of each
/// section would show.
fn consult_view(record: ConsultRecord) -> ConsultView {
    ConsultView {
        consult_id: record.id.as_u64(),
        created_at: record.created_at.to_rfc3339(),
        submitted: record.submitted,
        patient: sections::patient::prefill(&record.patient),
        reason: sections::reason::prefill(record.reason.as_ref()),
        clinical_summary: sections::summary::prefill(record.clinical_summary.as_ref()),
        clinical_status: sections::status::prefill(&record.clinical_status),
        investigations: sections::investigations::prefill(&record.investigations),
        interventions: sections::interventions::prefill(&record.interventions),
        assessment: sections::assessment::prefill(record.assessment.as_ref()),
    }
}

fn list_item(record: ConsultRecord) -> ConsultListItem {
    ConsultListItem {
        consult_id: record.id.as_u64(),
        patient_name: record.patient.patient_name.to_string(),
        age: record.patient.age,
        ward: record.patient.ward.as_token().to_owned(),
        request_datetime: record
            .patient
            .request_datetime
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        decision: record
            .assessment
            .as_ref()
            .map(|assessment| assessment.decision.as_token().to_owned())
            .unwrap_or_default(),
    }
}

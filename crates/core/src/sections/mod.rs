//! Per-section validation and prefill.
//!
//! One module per wizard section. Each owns two pure functions: `validate`
//! decodes a raw form into the typed fields stored on the record (or a
//! `FieldErrors` map — no partial success), and `prefill` encodes stored
//! values back into the raw form so a saved section redisplays as valid
//! input for the same validator.

pub mod assessment;
pub mod interventions;
pub mod investigations;
pub mod patient;
pub mod reason;
pub mod status;
pub mod summary;

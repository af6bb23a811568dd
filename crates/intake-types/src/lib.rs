//! # Intake Types
//!
//! Leaf crate of validated primitive types and controlled vocabularies for
//! the ICU intake system.
//!
//! Contains:
//! - [`NonEmptyText`], a trimmed, guaranteed non-blank string newtype
//! - The closed clinical vocabularies ([`Gender`], [`Ward`], [`Discipline`],
//!   [`ReasonTag`], [`FluidType`], [`Decision`]) with stable wire tokens
//! - [`TriState`], the yes/no/unset type used by optional clinical flags
//!
//! No storage, HTTP, or validation-flow concerns live here; those belong in
//! `intake-core` and the API crates.

mod text;
mod vocab;

pub use text::{NonEmptyText, TextError};
pub use vocab::{
    Decision, Discipline, FluidType, Gender, ReasonTag, TriState, UnknownToken, Ward,
};

//! Controlled clinical vocabularies.
//!
//! Every choice field on a consult record is a closed enumeration with a
//! stable lowercase wire token. Decoding goes through [`from_token`] so an
//! out-of-vocabulary value can never reach storage; encoding via
//! [`as_token`] preserves the token the forms were built around.
//!
//! [`from_token`]: Gender::from_token
//! [`as_token`]: Gender::as_token

use serde::de::Error as _;

/// A supplied token did not match any value of a closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{token:?} is not a valid {vocabulary} token")]
pub struct UnknownToken {
    /// Name of the vocabulary the token was checked against.
    pub vocabulary: &'static str,
    /// The offending token, verbatim.
    pub token: String,
}

/// Implements token-based `Display`, `FromStr` and serde for a vocabulary.
///
/// Relies on the type providing `ALL` and `as_token`; decoding scans `ALL`
/// so the token table and the enum can never drift apart.
macro_rules! token_vocabulary {
    ($ty:ident, $name:literal) => {
        impl $ty {
            /// Decodes a wire token into the vocabulary value.
            ///
            /// # Errors
            ///
            /// Returns [`UnknownToken`] if the token matches no value.
            pub fn from_token(token: &str) -> Result<Self, UnknownToken> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|value| value.as_token() == token)
                    .ok_or_else(|| UnknownToken {
                        vocabulary: $name,
                        token: token.to_owned(),
                    })
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_token())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = UnknownToken;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_token(s)
            }
        }

        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_token())
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let token = String::deserialize(deserializer)?;
                Self::from_token(&token).map_err(D::Error::custom)
            }
        }
    };
}

/// Patient gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// All values, in presentation order.
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// Returns the stable wire token.
    pub fn as_token(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

token_vocabulary!(Gender, "gender");

/// Hospital ward the consult request originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ward {
    EmergencyUnit,
    WardA,
    WardB,
    WardC,
    WardD,
    WardE,
    WardF,
    WardG,
    WardH,
    WardI,
    WardJ,
    WardK,
    WardL,
    WardM,
    WardN,
    WardO,
    WardP,
    WardQ,
    WardR,
    WardS,
    WardT,
}

impl Ward {
    /// All values, in presentation order.
    pub const ALL: [Ward; 21] = [
        Ward::EmergencyUnit,
        Ward::WardA,
        Ward::WardB,
        Ward::WardC,
        Ward::WardD,
        Ward::WardE,
        Ward::WardF,
        Ward::WardG,
        Ward::WardH,
        Ward::WardI,
        Ward::WardJ,
        Ward::WardK,
        Ward::WardL,
        Ward::WardM,
        Ward::WardN,
        Ward::WardO,
        Ward::WardP,
        Ward::WardQ,
        Ward::WardR,
        Ward::WardS,
        Ward::WardT,
    ];

    /// Returns the stable wire token.
    pub fn as_token(&self) -> &'static str {
        match self {
            Ward::EmergencyUnit => "emergency unit",
            Ward::WardA => "ward a",
            Ward::WardB => "ward b",
            Ward::WardC => "ward c",
            Ward::WardD => "ward d",
            Ward::WardE => "ward e",
            Ward::WardF => "ward f",
            Ward::WardG => "ward g",
            Ward::WardH => "ward h",
            Ward::WardI => "ward i",
            Ward::WardJ => "ward j",
            Ward::WardK => "ward k",
            Ward::WardL => "ward l",
            Ward::WardM => "ward m",
            Ward::WardN => "ward n",
            Ward::WardO => "ward o",
            Ward::WardP => "ward p",
            Ward::WardQ => "ward q",
            Ward::WardR => "ward r",
            Ward::WardS => "ward s",
            Ward::WardT => "ward t",
        }
    }
}

token_vocabulary!(Ward, "ward");

/// Discipline of the team requesting the consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    Anaesthesia,
    Cardiology,
    CardiothoracicSurgery,
    Dermatology,
    EntSurgery,
    GastroenterologySurgery,
    GeneralSurgery,
    InternalMedicine,
    MaxillofacialSurgery,
    Nephrology,
    Neurology,
    Neurosurgery,
    ObstetricsAndGynaecology,
    Oncology,
    OrthopaedicsSurgery,
    Paediatrics,
    Urology,
}

impl Discipline {
    /// All values, in presentation order.
    pub const ALL: [Discipline; 17] = [
        Discipline::Anaesthesia,
        Discipline::Cardiology,
        Discipline::CardiothoracicSurgery,
        Discipline::Dermatology,
        Discipline::EntSurgery,
        Discipline::GastroenterologySurgery,
        Discipline::GeneralSurgery,
        Discipline::InternalMedicine,
        Discipline::MaxillofacialSurgery,
        Discipline::Nephrology,
        Discipline::Neurology,
        Discipline::Neurosurgery,
        Discipline::ObstetricsAndGynaecology,
        Discipline::Oncology,
        Discipline::OrthopaedicsSurgery,
        Discipline::Paediatrics,
        Discipline::Urology,
    ];

    /// Returns the stable wire token.
    pub fn as_token(&self) -> &'static str {
        match self {
            Discipline::Anaesthesia => "anaesthesia",
            Discipline::Cardiology => "cardiology",
            Discipline::CardiothoracicSurgery => "cardiothoracic surgery",
            Discipline::Dermatology => "dermatology",
            Discipline::EntSurgery => "ent surgery",
            Discipline::GastroenterologySurgery => "gastroenterology surgery",
            Discipline::GeneralSurgery => "general surgery",
            Discipline::InternalMedicine => "internal medicine",
            Discipline::MaxillofacialSurgery => "maxillofacial surgery",
            Discipline::Nephrology => "nephrology",
            Discipline::Neurology => "neurology",
            Discipline::Neurosurgery => "neurosurgery",
            Discipline::ObstetricsAndGynaecology => "obstetrics and gynaecology",
            Discipline::Oncology => "oncology",
            Discipline::OrthopaedicsSurgery => "orthopaedics surgery",
            Discipline::Paediatrics => "paediatrics",
            Discipline::Urology => "urology",
        }
    }
}

token_vocabulary!(Discipline, "requesting discipline");

/// Reason a consult was requested. Multiple tags may apply to one consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonTag {
    HaemodynamicInstability,
    RespiratoryFailure,
    AlteredLevelOfConsciousness,
    PostOpManagement,
    SepsisSyndrome,
    MultiOrganDysfunction,
    Other,
}

impl ReasonTag {
    /// All values, in presentation order. Stored reason lists follow this
    /// order regardless of the order tags were ticked in.
    pub const ALL: [ReasonTag; 7] = [
        ReasonTag::HaemodynamicInstability,
        ReasonTag::RespiratoryFailure,
        ReasonTag::AlteredLevelOfConsciousness,
        ReasonTag::PostOpManagement,
        ReasonTag::SepsisSyndrome,
        ReasonTag::MultiOrganDysfunction,
        ReasonTag::Other,
    ];

    /// Returns the stable wire token.
    pub fn as_token(&self) -> &'static str {
        match self {
            ReasonTag::HaemodynamicInstability => "haemodynamic_instability",
            ReasonTag::RespiratoryFailure => "respiratory_failure",
            ReasonTag::AlteredLevelOfConsciousness => "altered_level_of_consciousness",
            ReasonTag::PostOpManagement => "post_op_management",
            ReasonTag::SepsisSyndrome => "sepsis_syndrome",
            ReasonTag::MultiOrganDysfunction => "multi_organ_dysfunction",
            ReasonTag::Other => "other",
        }
    }
}

token_vocabulary!(ReasonTag, "reason");

/// Fluid type currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FluidType {
    FluidType1,
    FluidType2,
    FluidType3,
}

impl FluidType {
    /// All values, in presentation order.
    pub const ALL: [FluidType; 3] = [
        FluidType::FluidType1,
        FluidType::FluidType2,
        FluidType::FluidType3,
    ];

    /// Returns the stable wire token.
    pub fn as_token(&self) -> &'static str {
        match self {
            FluidType::FluidType1 => "fluid_type1",
            FluidType::FluidType2 => "fluid_type2",
            FluidType::FluidType3 => "fluid_type3",
        }
    }
}

token_vocabulary!(FluidType, "fluid type");

/// Terminal clinical decision recorded in the assessment section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Admit,
    NotForIcu,
    ReviewLater,
}

impl Decision {
    /// All values, in presentation order.
    pub const ALL: [Decision; 3] = [Decision::Admit, Decision::NotForIcu, Decision::ReviewLater];

    /// Returns the stable wire token.
    pub fn as_token(&self) -> &'static str {
        match self {
            Decision::Admit => "admit",
            Decision::NotForIcu => "not_for_icu",
            Decision::ReviewLater => "review_later",
        }
    }
}

token_vocabulary!(Decision, "decision");

/// A yes/no question that may be left unanswered.
///
/// Clinical flag fields distinguish "answered no" from "not recorded", so a
/// plain `bool` cannot model them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriState {
    Yes,
    No,
    #[default]
    Unset,
}

impl TriState {
    /// Decodes a form token.
    ///
    /// Exactly `"yes"` and `"no"` (case-sensitive) decode to answers; every
    /// other token, including the empty string of an untouched radio group,
    /// decodes to [`TriState::Unset`] without error.
    pub fn decode(token: &str) -> Self {
        match token {
            "yes" => TriState::Yes,
            "no" => TriState::No,
            _ => TriState::Unset,
        }
    }

    /// Encodes back to the form token; `Unset` becomes the empty value.
    pub fn encode(&self) -> &'static str {
        match self {
            TriState::Yes => "yes",
            TriState::No => "no",
            TriState::Unset => "",
        }
    }

    /// Returns the answer as a boolean, or `None` when unset.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TriState::Yes => Some(true),
            TriState::No => Some(false),
            TriState::Unset => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_vocabulary_token_round_trips() {
        for gender in Gender::ALL {
            assert_eq!(Gender::from_token(gender.as_token()), Ok(gender));
        }
        for ward in Ward::ALL {
            assert_eq!(Ward::from_token(ward.as_token()), Ok(ward));
        }
        for discipline in Discipline::ALL {
            assert_eq!(Discipline::from_token(discipline.as_token()), Ok(discipline));
        }
        for tag in ReasonTag::ALL {
            assert_eq!(ReasonTag::from_token(tag.as_token()), Ok(tag));
        }
        for fluid in FluidType::ALL {
            assert_eq!(FluidType::from_token(fluid.as_token()), Ok(fluid));
        }
        for decision in Decision::ALL {
            assert_eq!(Decision::from_token(decision.as_token()), Ok(decision));
        }
    }

    #[test]
    fn test_from_token_rejects_unknown_values() {
        let err = Ward::from_token("ward z").expect_err("unknown ward should fail");
        assert_eq!(err.vocabulary, "ward");
        assert_eq!(err.token, "ward z");
    }

    #[test]
    fn test_vocabulary_serde_uses_wire_tokens() {
        let json = serde_json::to_string(&Ward::EmergencyUnit).expect("should serialize");
        assert_eq!(json, "\"emergency unit\"");

        let decision: Decision =
            serde_json::from_str("\"not_for_icu\"").expect("should deserialize");
        assert_eq!(decision, Decision::NotForIcu);
    }

    #[test]
    fn test_tristate_decodes_exact_tokens_only() {
        assert_eq!(TriState::decode("yes"), TriState::Yes);
        assert_eq!(TriState::decode("no"), TriState::No);
        assert_eq!(TriState::decode("YES"), TriState::Unset);
        assert_eq!(TriState::decode("maybe"), TriState::Unset);
        assert_eq!(TriState::decode(""), TriState::Unset);
    }

    #[test]
    fn test_tristate_encode_decode_round_trips() {
        for state in [TriState::Yes, TriState::No, TriState::Unset] {
            assert_eq!(TriState::decode(state.encode()), state);
        }
    }
}

//! Closed value sets for enum-typed parameters and model fields.
//!
//! Each enum maps a symbolic Rust variant to the exact literal the service
//! expects on the wire. Serialization (query strings and JSON bodies) always
//! goes through that literal, so an out-of-set value cannot be sent.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use thiserror::Error;

/// A string that is not one of an enum's declared wire values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{value:?} is not a valid {enum_name} (expected one of: {expected})")]
pub struct UnknownEnumValue {
    pub enum_name: &'static str,
    pub value: String,
    pub expected: String,
}

/// Shared behavior of generated closed-set enums.
pub trait WireEnum: Copy + Debug + IntoEnumIterator + Into<&'static str> + 'static {
    /// Type name used in validation messages.
    const NAME: &'static str;

    /// The literal sent to the service.
    fn wire_value(self) -> &'static str {
        self.into()
    }

    /// All declared variants, in declaration order.
    fn variants() -> Vec<Self> {
        Self::iter().collect()
    }

    /// Whether `value` is one of the declared wire literals (case-sensitive).
    fn is_member(value: &str) -> bool {
        Self::iter().any(|variant| variant.wire_value() == value)
    }

    /// Validate an arbitrary string against the declared set.
    fn parse_wire(value: &str) -> Result<Self, UnknownEnumValue> {
        Self::iter()
            .find(|variant| variant.wire_value() == value)
            .ok_or_else(|| UnknownEnumValue {
                enum_name: Self::NAME,
                value: value.to_string(),
                expected: Self::iter()
                    .map(|variant| variant.wire_value())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Status filter accepted by `PetApi::find_pets_by_status`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FindPetsByStatusStatus {
    Available,
    Pending,
    Sold,
}

impl WireEnum for FindPetsByStatusStatus {
    const NAME: &'static str = "FindPetsByStatusStatus";
}

/// Pet status in the store.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PetStatus {
    Available,
    Pending,
    Sold,
}

impl WireEnum for PetStatus {
    const NAME: &'static str = "PetStatus";
}

impl From<PetStatus> for FindPetsByStatusStatus {
    fn from(status: PetStatus) -> Self {
        match status {
            PetStatus::Available => FindPetsByStatusStatus::Available,
            PetStatus::Pending => FindPetsByStatusStatus::Pending,
            PetStatus::Sold => FindPetsByStatusStatus::Sold,
        }
    }
}

/// Order status.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrderStatus {
    Placed,
    Approved,
    Delivered,
}

impl WireEnum for OrderStatus {
    const NAME: &'static str = "OrderStatus";
}

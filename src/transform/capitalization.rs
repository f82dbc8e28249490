//! Case conversion applied before duplication.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Case conversion requested by the `capitalization` query parameter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Capitalization {
    /// Convert the message to uppercase.
    #[strum(serialize = "UPPER")]
    Upper,
    /// Convert the message to lowercase.
    #[strum(serialize = "LOWER")]
    Lower,
}

impl Capitalization {
    /// Interpret a raw query value.
    ///
    /// Only the exact names `UPPER` and `LOWER` select a conversion. Anything
    /// else, including an empty value or `None`, means "leave the case alone".
    pub fn from_query(raw: Option<&str>) -> Option<Self> {
        raw.and_then(|value| value.parse().ok())
    }

    /// Apply the conversion to `text`.
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Upper => text.to_uppercase(),
            Self::Lower => text.to_lowercase(),
        }
    }
}

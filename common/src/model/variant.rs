use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Which of the four services a process is running as.
///
/// Each variant pairs `Person` with one parent kind and one query endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceVariant {
    /// Address parent; lists the children living at an address.
    ChildAlert,
    /// City parent; lists the residents of a city.
    CommunityEmail,
    /// FireStation parent; lists covered residents with adult/child counts.
    FireStation,
    /// Medication parent (many-to-many); looks people up by name.
    PersonInfo,
}

impl ServiceVariant {
    pub const ALL: [ServiceVariant; 4] = [
        ServiceVariant::ChildAlert,
        ServiceVariant::CommunityEmail,
        ServiceVariant::FireStation,
        ServiceVariant::PersonInfo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ChildAlert => "child_alert",
            Self::CommunityEmail => "community_email",
            Self::FireStation => "fire_station",
            Self::PersonInfo => "person_info",
        }
    }

    /// Whether a person in this variant must carry a free-text address.
    pub fn person_requires_address(self) -> bool {
        !matches!(self, Self::ChildAlert)
    }

    /// Whether a person in this variant must carry an email.
    pub fn person_requires_email(self) -> bool {
        matches!(self, Self::CommunityEmail)
    }
}

impl Display for ServiceVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "unknown service variant `{0}` (expected one of child_alert, community_email, fire_station, person_info)"
)]
pub struct UnknownVariant(pub String);

impl FromStr for ServiceVariant {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|variant| variant.as_str() == normalized)
            .ok_or_else(|| UnknownVariant(value.to_string()))
    }
}

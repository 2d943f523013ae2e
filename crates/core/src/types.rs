//! Identifier and timestamp types shared across crates.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::SubsecRound;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Canonical hyphenated UUID, matched case-insensitively.
pub const UUID_PATTERN: &str =
    r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$";

static UUID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(UUID_PATTERN).expect("valid regex"));

/// Current time truncated to microseconds, the precision PostgreSQL keeps.
pub fn now() -> Timestamp {
    chrono::Utc::now().trunc_subsecs(6)
}

fn parse_uuid(value: &str, field: &'static str) -> Result<Uuid, CoreError> {
    if !UUID_RE.is_match(value) {
        return Err(CoreError::validation(
            field,
            format!("Invalid UUID format: '{value}'"),
        ));
    }
    Uuid::parse_str(value)
        .map_err(|e| CoreError::validation(field, format!("Invalid UUID '{value}': {e}")))
}

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Parse a canonical hyphenated UUID string. The stored value is
            /// lowercase regardless of input case.
            pub fn parse(value: &str) -> Result<Self, CoreError> {
                parse_uuid(value, $field).map(Self)
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0.hyphenated())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

uuid_id!(
    /// Identity of a template.
    TemplateId,
    "id"
);

uuid_id!(
    /// Identity of a user as issued by the identity provider.
    UserId,
    "user_id"
);

impl TemplateId {
    /// Generate a fresh random (v4) template id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

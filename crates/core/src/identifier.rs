use std::fmt;
use uuid::{Uuid, Variant};

/// Identifier passed to a single-property lookup.
///
/// The original string is kept as given (including case) since it is what
/// ends up in the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyIdentifier {
    /// Canonical hyphenated RFC 4122 UUID, versions 1 to 5
    Uuid(String),
    /// Anything else, looked up as an MLS code (e.g. "cr-001")
    Code(String),
}

impl PropertyIdentifier {
    pub fn classify(raw: &str) -> Self {
        if is_canonical_uuid(raw) {
            Self::Uuid(raw.to_string())
        } else {
            Self::Code(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Uuid(raw) | Self::Code(raw) => raw,
        }
    }

    pub fn is_uuid(&self) -> bool {
        matches!(self, Self::Uuid(_))
    }
}

impl From<&str> for PropertyIdentifier {
    fn from(raw: &str) -> Self {
        Self::classify(raw)
    }
}

impl fmt::Display for PropertyIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$`, case-insensitive
fn is_canonical_uuid(raw: &str) -> bool {
    // 36 bytes rules out the simple, braced and urn forms the parser also accepts
    if raw.len() != 36 {
        return false;
    }
    match Uuid::try_parse(raw) {
        Ok(uuid) => {
            matches!(uuid.get_version_num(), 1..=5) && uuid.get_variant() == Variant::RFC4122
        }
        Err(_) => false,
    }
}

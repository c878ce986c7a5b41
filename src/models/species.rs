use serde::{Deserialize, Serialize};

/// Species bucket selecting which taper curve and correction formulas apply.
///
/// The Finnish taper models cover four groups; callers must resolve their
/// own species codes into one of these before cross-cutting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeciesBucket {
    Pine,
    Spruce,
    Birch,
    /// Alder, and any broadleaf without a curve of its own.
    AlnusOther,
}

impl Default for SpeciesBucket {
    /// Birch is the conventional fallback for species with no dedicated curve.
    fn default() -> Self {
        SpeciesBucket::Birch
    }
}

impl std::fmt::Display for SpeciesBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpeciesBucket::Pine => write!(f, "pine"),
            SpeciesBucket::Spruce => write!(f, "spruce"),
            SpeciesBucket::Birch => write!(f, "birch"),
            SpeciesBucket::AlnusOther => write!(f, "alnus"),
        }
    }
}

impl std::str::FromStr for SpeciesBucket {
    type Err = crate::error::BuckingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pine" => Ok(SpeciesBucket::Pine),
            "spruce" => Ok(SpeciesBucket::Spruce),
            "birch" => Ok(SpeciesBucket::Birch),
            "alnus" | "alder" | "other" => Ok(SpeciesBucket::AlnusOther),
            _ => Err(crate::error::BuckingError::ParseError(format!(
                "Unknown species bucket: '{s}'"
            ))),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    /// Parses an optional intensity where an empty string means "not set".
    pub fn parse_optional(s: &str) -> Result<Option<Self>, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intensity::Low => write!(f, "Low"),
            Intensity::Medium => write!(f, "Medium"),
            Intensity::High => write!(f, "High"),
        }
    }
}

impl FromStr for Intensity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Intensity::Low),
            "medium" => Ok(Intensity::Medium),
            "high" => Ok(Intensity::High),
            _ => Err(format!(
                "Invalid intensity '{}'. Valid options: Low, Medium, High",
                s
            )),
        }
    }
}

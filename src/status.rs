//! Status classifier: three-tier banding of percent-to-target.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Green,
    Amber,
    Red,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Green => "green",
            Status::Amber => "amber",
            Status::Red => "red",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bands a percent-to-target value. Boundaries are closed at 100 and 80:
/// ties go to the higher band.
pub fn classify(percent_to_target: f64) -> Status {
    if percent_to_target >= 100.0 {
        Status::Green
    } else if percent_to_target >= 80.0 {
        Status::Amber
    } else {
        Status::Red
    }
}

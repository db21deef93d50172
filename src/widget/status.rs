use serde::{Deserialize, Serialize};

use crate::core::geo::LatLng;

/// What the user should currently see about their last submission
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WidgetStatus {
    #[default]
    Idle,
    Pending {
        address: String,
    },
    Located {
        address: String,
        location: LatLng,
    },
    NotFound {
        address: String,
    },
    Failed {
        address: String,
        reason: String,
    },
}

impl WidgetStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, WidgetStatus::Pending { .. })
    }
}

impl std::fmt::Display for WidgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WidgetStatus::Idle => Ok(()),
            WidgetStatus::Pending { address } => write!(f, "Looking up \"{address}\"..."),
            WidgetStatus::Located { address, location } => {
                write!(f, "Found \"{address}\" at {location}")
            }
            WidgetStatus::NotFound { address } => write!(f, "No match for \"{address}\""),
            WidgetStatus::Failed { address, reason } => {
                write!(f, "Could not look up \"{address}\": {reason}")
            }
        }
    }
}

/// How a single geocoding completion was applied
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The first candidate was added to the map
    Located(LatLng),
    /// The service had no candidates; map and bounds untouched
    NotFound,
    /// The lookup failed; map and bounds untouched
    Failed(String),
    /// A newer submission started before this one completed
    Superseded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(WidgetStatus::Idle.to_string(), "");
        assert_eq!(
            WidgetStatus::NotFound {
                address: "zzzzzznotaplace".into()
            }
            .to_string(),
            "No match for \"zzzzzznotaplace\""
        );
        assert!(WidgetStatus::Pending { address: String::new() }.is_pending());
    }

    #[test]
    fn test_status_serializes_with_tag() {
        let json = serde_json::to_value(WidgetStatus::Located {
            address: "a".into(),
            location: LatLng::new(1.0, 2.0),
        })
        .unwrap();
        assert_eq!(json["state"], "located");
        assert_eq!(json["location"]["lng"], 2.0);
    }
}

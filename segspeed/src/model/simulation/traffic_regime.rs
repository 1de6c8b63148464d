use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// named traffic conditions over the course of a day.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TrafficRegime {
    Night,
    MorningRush,
    EveningRush,
    OffPeak,
}

impl TrafficRegime {
    pub fn is_rush(&self) -> bool {
        matches!(self, TrafficRegime::MorningRush | TrafficRegime::EveningRush)
    }
}

impl Display for TrafficRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TrafficRegime::Night => "night",
            TrafficRegime::MorningRush => "morning_rush",
            TrafficRegime::EveningRush => "evening_rush",
            TrafficRegime::OffPeak => "off_peak",
        };
        write!(f, "{s}")
    }
}

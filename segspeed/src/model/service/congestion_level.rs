use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// congestion class of a predicted speed, used to color segments on the map.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CongestionLevel {
    Heavy,
    Moderate,
    FreeFlow,
}

impl CongestionLevel {
    /// speeds below this are heavy congestion
    pub const HEAVY_BELOW_KMH: f64 = 15.0;
    /// speeds below this (and not heavy) are moderate congestion
    pub const MODERATE_BELOW_KMH: f64 = 30.0;

    pub fn from_speed(speed_kmh: f64) -> CongestionLevel {
        if speed_kmh < Self::HEAVY_BELOW_KMH {
            CongestionLevel::Heavy
        } else if speed_kmh < Self::MODERATE_BELOW_KMH {
            CongestionLevel::Moderate
        } else {
            CongestionLevel::FreeFlow
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            CongestionLevel::Heavy => "red",
            CongestionLevel::Moderate => "orange",
            CongestionLevel::FreeFlow => "green",
        }
    }
}

impl Display for CongestionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CongestionLevel::Heavy => "heavy",
            CongestionLevel::Moderate => "moderate",
            CongestionLevel::FreeFlow => "free_flow",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(CongestionLevel::from_speed(5.0), CongestionLevel::Heavy);
        assert_eq!(CongestionLevel::from_speed(15.0), CongestionLevel::Moderate);
        assert_eq!(CongestionLevel::from_speed(29.9), CongestionLevel::Moderate);
        assert_eq!(CongestionLevel::from_speed(30.0), CongestionLevel::FreeFlow);
        assert_eq!(CongestionLevel::Moderate.color(), "orange");
        assert_eq!(
            serde_json::to_string(&CongestionLevel::FreeFlow).unwrap(),
            "\"free_flow\""
        );
    }
}

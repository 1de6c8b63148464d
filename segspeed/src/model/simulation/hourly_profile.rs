use super::{HourBand, SimulationError, TrafficRegime};
use segspeed_core::observation::Hour;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// time-of-day speed curve. each hour belongs to exactly one regime: one of the three
/// configured bands, or off-peak otherwise. the curve is applied as a multiplier on the
/// free-flow speed of a segment.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct HourlyProfile {
    /// lightest traffic, at or above free-flow (multiplier >= 1)
    pub night: HourBand,
    pub morning_rush: HourBand,
    pub evening_rush: HourBand,
    /// multiplier for every hour not covered by a band
    pub off_peak_multiplier: f64,
    /// amplitude of the hour-dependent variation around the off-peak multiplier
    pub off_peak_ripple: f64,
}

impl Default for HourlyProfile {
    fn default() -> Self {
        Self {
            night: HourBand::new(0, 5, 1.0),
            morning_rush: HourBand::new(7, 9, 0.36),
            evening_rush: HourBand::new(16, 19, 0.45),
            off_peak_multiplier: 0.9,
            off_peak_ripple: 0.05,
        }
    }
}

impl HourlyProfile {
    pub fn regime(&self, hour: Hour) -> TrafficRegime {
        if self.night.contains(hour) {
            TrafficRegime::Night
        } else if self.morning_rush.contains(hour) {
            TrafficRegime::MorningRush
        } else if self.evening_rush.contains(hour) {
            TrafficRegime::EveningRush
        } else {
            TrafficRegime::OffPeak
        }
    }

    /// speed multiplier at this hour.
    pub fn multiplier(&self, hour: Hour) -> f64 {
        match self.regime(hour) {
            TrafficRegime::Night => self.night.multiplier,
            TrafficRegime::MorningRush => self.morning_rush.multiplier,
            TrafficRegime::EveningRush => self.evening_rush.multiplier,
            TrafficRegime::OffPeak => {
                let phase = hour.value() as f64 * PI / 12.0;
                self.off_peak_multiplier + self.off_peak_ripple * phase.sin()
            }
        }
    }

    /// the larger (milder) of the two rush-hour multipliers.
    pub fn max_rush_multiplier(&self) -> f64 {
        self.morning_rush.multiplier.max(self.evening_rush.multiplier)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        let bands = [
            ("night", &self.night),
            ("morning_rush", &self.morning_rush),
            ("evening_rush", &self.evening_rush),
        ];
        for (name, band) in bands.iter() {
            band.validate(name)
                .map_err(SimulationError::InvalidConfiguration)?;
        }
        for (i, (name_a, a)) in bands.iter().enumerate() {
            for (name_b, b) in bands.iter().skip(i + 1) {
                if a.overlaps(b) {
                    return Err(SimulationError::InvalidConfiguration(format!(
                        "{name_a} and {name_b} bands overlap"
                    )));
                }
            }
        }
        if self.night.multiplier < 1.0 {
            return Err(SimulationError::InvalidConfiguration(format!(
                "night multiplier must be >= 1, found {}",
                self.night.multiplier
            )));
        }
        for (name, band) in bands.iter().skip(1) {
            if band.multiplier >= 1.0 {
                return Err(SimulationError::InvalidConfiguration(format!(
                    "{name} multiplier must be < 1, found {}",
                    band.multiplier
                )));
            }
        }
        if !self.off_peak_ripple.is_finite() || self.off_peak_ripple < 0.0 {
            return Err(SimulationError::InvalidConfiguration(format!(
                "off_peak_ripple must be non-negative, found {}",
                self.off_peak_ripple
            )));
        }
        if !self.off_peak_multiplier.is_finite()
            || self.off_peak_multiplier - self.off_peak_ripple <= 0.0
        {
            return Err(SimulationError::InvalidConfiguration(format!(
                "off-peak multiplier must stay positive, found {} with ripple {}",
                self.off_peak_multiplier, self.off_peak_ripple
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hour(h: i64) -> Hour {
        Hour::try_from(h).unwrap()
    }

    #[test]
    fn test_default_regimes() {
        let profile = HourlyProfile::default();
        assert_eq!(profile.regime(hour(3)), TrafficRegime::Night);
        assert_eq!(profile.regime(hour(8)), TrafficRegime::MorningRush);
        assert_eq!(profile.regime(hour(17)), TrafficRegime::EveningRush);
        assert_eq!(profile.regime(hour(12)), TrafficRegime::OffPeak);
        assert_eq!(profile.regime(hour(23)), TrafficRegime::OffPeak);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_rush_slower_than_off_peak_slower_than_night() {
        let profile = HourlyProfile::default();
        let night = profile.multiplier(hour(3));
        for h in Hour::all() {
            let m = profile.multiplier(h);
            match profile.regime(h) {
                TrafficRegime::MorningRush | TrafficRegime::EveningRush => assert!(m < 0.5),
                TrafficRegime::OffPeak => assert!(m > 0.8 && m < night),
                TrafficRegime::Night => assert_eq!(m, 1.0),
            }
        }
    }

    #[test]
    fn test_rejects_overlapping_bands() {
        let profile = HourlyProfile {
            morning_rush: HourBand::new(5, 9, 0.4),
            ..Default::default()
        };
        assert!(matches!(
            profile.validate(),
            Err(SimulationError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_slow_night_and_fast_rush() {
        let slow_night = HourlyProfile {
            night: HourBand::new(0, 5, 0.8),
            ..Default::default()
        };
        assert!(slow_night.validate().is_err());
        let fast_rush = HourlyProfile {
            evening_rush: HourBand::new(16, 19, 1.2),
            ..Default::default()
        };
        assert!(fast_rush.validate().is_err());
    }
}

use segspeed_core::observation::{Hour, HOURS_PER_DAY};
use serde::{Deserialize, Serialize};

/// an inclusive range of hours with a speed multiplier. a band where `start_hour` is
/// greater than `end_hour` wraps past midnight, e.g. 22..=5.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HourBand {
    pub start_hour: u8,
    pub end_hour: u8,
    /// multiplier applied to the free-flow speed during this band
    pub multiplier: f64,
}

impl HourBand {
    pub fn new(start_hour: u8, end_hour: u8, multiplier: f64) -> HourBand {
        HourBand {
            start_hour,
            end_hour,
            multiplier,
        }
    }

    pub fn contains(&self, hour: Hour) -> bool {
        let h = hour.value();
        if self.start_hour <= self.end_hour {
            self.start_hour <= h && h <= self.end_hour
        } else {
            h >= self.start_hour || h <= self.end_hour
        }
    }

    pub fn hours(&self) -> impl Iterator<Item = Hour> + '_ {
        Hour::all().filter(|h| self.contains(*h))
    }

    pub fn overlaps(&self, other: &HourBand) -> bool {
        self.hours().any(|h| other.contains(h))
    }

    pub fn validate(&self, name: &str) -> Result<(), String> {
        if self.start_hour >= HOURS_PER_DAY || self.end_hour >= HOURS_PER_DAY {
            return Err(format!(
                "{name} band hours must be in [0, 23], found {}..={}",
                self.start_hour, self.end_hour
            ));
        }
        if !self.multiplier.is_finite() || self.multiplier <= 0.0 {
            return Err(format!(
                "{name} multiplier must be positive, found {}",
                self.multiplier
            ));
        }
        Ok(())
    }
}

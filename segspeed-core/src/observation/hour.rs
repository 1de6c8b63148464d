use super::ObservationError;
use serde::{de, Serialize};
use std::fmt::Display;

pub const HOURS_PER_DAY: u8 = 24;

/// an hour of the day in [0, 23].
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Hour(u8);

impl Hour {
    pub const MIDNIGHT: Hour = Hour(0);

    pub fn value(&self) -> u8 {
        self.0
    }

    /// all 24 hours in order.
    pub fn all() -> impl Iterator<Item = Hour> + Clone {
        (0..HOURS_PER_DAY).map(Hour)
    }

    /// parses "8", "08" or the clock form "08:00".
    pub fn parse(value: &str) -> Result<Hour, ObservationError> {
        let trimmed = value.trim();
        let hour_part = match trimmed.split_once(':') {
            Some((h, m)) if m.chars().all(|c| c.is_ascii_digit()) => h,
            Some(_) => return Err(ObservationError::InvalidHourFormat(value.to_string())),
            None => trimmed,
        };
        let hour = hour_part
            .parse::<i64>()
            .map_err(|_| ObservationError::InvalidHourFormat(value.to_string()))?;
        Hour::try_from(hour)
    }
}

impl TryFrom<i64> for Hour {
    type Error = ObservationError;

    /// rejects values outside [0, 23]; there is no wraparound.
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (0..HOURS_PER_DAY as i64).contains(&value) {
            Ok(Hour(value as u8))
        } else {
            Err(ObservationError::InvalidHour(value))
        }
    }
}

impl Display for Hour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

/// accepts either an integer hour or a "HH:00" string.
impl<'de> de::Deserialize<'de> for Hour {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct HourVisitor;

        impl de::Visitor<'_> for HourVisitor {
            type Value = Hour;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("an integer hour in [0, 23] or a string 'HH:00'")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                let hour = i64::try_from(v).unwrap_or(i64::MAX);
                Hour::try_from(hour).map_err(de::Error::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Hour::try_from(v).map_err(de::Error::custom)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Hour::parse(v).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(HourVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert_eq!(Hour::try_from(0).unwrap().value(), 0);
        assert_eq!(Hour::try_from(23).unwrap().value(), 23);
        assert!(matches!(
            Hour::try_from(24),
            Err(ObservationError::InvalidHour(24))
        ));
        assert!(matches!(
            Hour::try_from(-1),
            Err(ObservationError::InvalidHour(-1))
        ));
    }

    #[test]
    fn test_parse_clock_format() {
        assert_eq!(Hour::parse("08:00").unwrap().value(), 8);
        assert_eq!(Hour::parse("17").unwrap().value(), 17);
        assert!(Hour::parse("24:00").is_err());
        assert!(Hour::parse("noon").is_err());
        assert!(Hour::parse("8:x").is_err());
    }

    #[test]
    fn test_deserialize_json() {
        let from_int: Hour = serde_json::from_str("8").unwrap();
        let from_str: Hour = serde_json::from_str("\"08:00\"").unwrap();
        assert_eq!(from_int, from_str);
        assert!(serde_json::from_str::<Hour>("-1").is_err());
        assert_eq!(serde_json::to_string(&from_int).unwrap(), "8");
    }

    #[test]
    fn test_all_hours() {
        let hours = Hour::all().collect::<Vec<_>>();
        assert_eq!(hours.len(), 24);
        assert_eq!(hours[0], Hour::MIDNIGHT);
        assert_eq!(hours[23].value(), 23);
    }
}

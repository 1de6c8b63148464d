use super::{FreeFlowPolicy, HourlyProfile, NoiseModel, SimulationError};
use serde::{Deserialize, Serialize};

/// parameters of the generative traffic model.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub free_flow: FreeFlowPolicy,
    pub profile: HourlyProfile,
    pub noise: NoiseModel,
    /// lower bound of any simulated speed
    pub min_speed_kmh: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            free_flow: FreeFlowPolicy::default(),
            profile: HourlyProfile::default(),
            noise: NoiseModel::default(),
            min_speed_kmh: 5.0,
        }
    }
}

impl SimulationConfig {
    /// free-flow speeds must lie strictly above this value. above it, the slowest
    /// possible night speed (`free_flow - noise`) stays above both the speed floor and the
    /// fastest possible rush-hour speed (`free_flow * rush + noise`), so every segment is
    /// slower in rush hour than at night whatever the noise draws.
    pub fn min_free_flow_kmh(&self) -> f64 {
        let bound = self.noise.bound();
        let rush_gap = 1.0 - self.profile.max_rush_multiplier();
        (self.min_speed_kmh + bound).max(2.0 * bound / rush_gap)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.min_speed_kmh.is_finite() || self.min_speed_kmh <= 0.0 {
            return Err(SimulationError::InvalidConfiguration(format!(
                "min_speed_kmh must be positive, found {}",
                self.min_speed_kmh
            )));
        }
        self.free_flow.validate()?;
        self.profile.validate()?;
        self.noise.validate()?;
        let slowest = self.free_flow.slowest_kmh();
        let floor = self.min_free_flow_kmh();
        if slowest <= floor {
            return Err(SimulationError::InvalidConfiguration(format!(
                "free-flow speeds down to {slowest} km/h are too slow: with min_speed_kmh {} and a noise bound of {} km/h they must exceed {floor:.2} km/h",
                self.min_speed_kmh,
                self.noise.bound()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_free_flow_floor() {
        let config = SimulationConfig::default();
        // noise bound 7.5 km/h, milder rush multiplier 0.45
        assert!((config.min_free_flow_kmh() - 15.0 / 0.55).abs() < 1e-9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_without_noise_floor_is_min_speed() {
        let config = SimulationConfig {
            noise: NoiseModel::None,
            ..Default::default()
        };
        assert_eq!(config.min_free_flow_kmh(), 5.0);
    }

    #[test]
    fn test_slow_policies_are_rejected() {
        let slow_fixed = SimulationConfig {
            free_flow: FreeFlowPolicy::Fixed { speed_kmh: 20.0 },
            ..Default::default()
        };
        assert!(matches!(
            slow_fixed.validate(),
            Err(SimulationError::InvalidConfiguration(_))
        ));
        let slow_scaled = SimulationConfig {
            free_flow: FreeFlowPolicy::LengthScaled {
                min_kmh: 10.0,
                max_kmh: 90.0,
                reference_length_m: 800.0,
            },
            ..Default::default()
        };
        assert!(matches!(
            slow_scaled.validate(),
            Err(SimulationError::InvalidConfiguration(_))
        ));
    }
}

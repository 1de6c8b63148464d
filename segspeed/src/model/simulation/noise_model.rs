use super::SimulationError;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// bounded random deviation added to each simulated speed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum NoiseModel {
    /// gaussian noise truncated at `max_sigma` standard deviations
    Gaussian { std_dev_kmh: f64, max_sigma: f64 },
    /// noise drawn uniformly from [-half_width_kmh, half_width_kmh]
    Uniform { half_width_kmh: f64 },
    None,
}

impl Default for NoiseModel {
    fn default() -> Self {
        NoiseModel::Gaussian {
            std_dev_kmh: 3.0,
            max_sigma: 2.5,
        }
    }
}

impl NoiseModel {
    /// largest absolute deviation this model can produce.
    pub fn bound(&self) -> f64 {
        match self {
            NoiseModel::Gaussian {
                std_dev_kmh,
                max_sigma,
            } => std_dev_kmh * max_sigma,
            NoiseModel::Uniform { half_width_kmh } => *half_width_kmh,
            NoiseModel::None => 0.0,
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        match self {
            NoiseModel::Gaussian {
                std_dev_kmh,
                max_sigma,
            } if !valid(*std_dev_kmh) || !valid(*max_sigma) => {
                Err(SimulationError::InvalidConfiguration(format!(
                    "gaussian noise requires non-negative std_dev_kmh and max_sigma, found {std_dev_kmh}, {max_sigma}"
                )))
            }
            NoiseModel::Uniform { half_width_kmh } if !valid(*half_width_kmh) => {
                Err(SimulationError::InvalidConfiguration(format!(
                    "uniform noise requires non-negative half_width_kmh, found {half_width_kmh}"
                )))
            }
            _ => Ok(()),
        }
    }

    /// draws one deviation in km/h from this model.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Result<f64, SimulationError> {
        match self {
            NoiseModel::Gaussian {
                std_dev_kmh,
                max_sigma,
            } => {
                if *std_dev_kmh == 0.0 {
                    return Ok(0.0);
                }
                let normal = Normal::new(0.0, *std_dev_kmh).map_err(|e| {
                    SimulationError::InvalidConfiguration(format!("gaussian noise: {e}"))
                })?;
                let bound = std_dev_kmh * max_sigma;
                Ok(normal.sample(rng).clamp(-bound, bound))
            }
            NoiseModel::Uniform { half_width_kmh } => {
                if *half_width_kmh == 0.0 {
                    return Ok(0.0);
                }
                Ok(rng.random_range(-*half_width_kmh..=*half_width_kmh))
            }
            NoiseModel::None => Ok(0.0),
        }
    }
}

use super::SimulationError;
use segspeed_core::segment::RoadSegment;
use serde::{Deserialize, Serialize};

/// how the free-flow (uncongested) speed of a segment is chosen when the segment
/// does not carry its own `free_flow_kmh` attribute.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum FreeFlowPolicy {
    /// the same speed on every segment
    Fixed { speed_kmh: f64 },
    /// longer segments are faster, approaching `max_kmh` as the length grows past
    /// `reference_length_m`. short urban links stay close to `min_kmh`.
    LengthScaled {
        min_kmh: f64,
        max_kmh: f64,
        reference_length_m: f64,
    },
}

impl Default for FreeFlowPolicy {
    fn default() -> Self {
        FreeFlowPolicy::Fixed { speed_kmh: 50.0 }
    }
}

impl FreeFlowPolicy {
    pub fn validate(&self) -> Result<(), SimulationError> {
        match self {
            FreeFlowPolicy::Fixed { speed_kmh } => {
                if !(speed_kmh.is_finite() && *speed_kmh > 0.0) {
                    return Err(SimulationError::InvalidConfiguration(format!(
                        "fixed free-flow speed_kmh must be positive, found {speed_kmh}"
                    )));
                }
                Ok(())
            }
            FreeFlowPolicy::LengthScaled {
                min_kmh,
                max_kmh,
                reference_length_m,
            } => {
                if !(min_kmh.is_finite() && *min_kmh > 0.0 && max_kmh.is_finite()) {
                    return Err(SimulationError::InvalidConfiguration(format!(
                        "length-scaled speeds must be positive, found min_kmh {min_kmh} and max_kmh {max_kmh}"
                    )));
                }
                if !(reference_length_m.is_finite() && *reference_length_m > 0.0) {
                    return Err(SimulationError::InvalidConfiguration(format!(
                        "reference_length_m must be positive, found {reference_length_m}"
                    )));
                }
                if min_kmh > max_kmh {
                    return Err(SimulationError::InvalidConfiguration(format!(
                        "min_kmh {min_kmh} exceeds max_kmh {max_kmh}"
                    )));
                }
                Ok(())
            }
        }
    }

    /// lowest free-flow speed this policy assigns to a segment without its own attribute.
    pub fn slowest_kmh(&self) -> f64 {
        match self {
            FreeFlowPolicy::Fixed { speed_kmh } => *speed_kmh,
            FreeFlowPolicy::LengthScaled { min_kmh, .. } => *min_kmh,
        }
    }

    /// free-flow speed for a segment. the segment attribute wins over the policy.
    /// the result must be a positive real number.
    pub fn free_flow_speed(&self, segment: &RoadSegment) -> Result<f64, SimulationError> {
        let speed = match (segment.free_flow_kmh, self) {
            (Some(speed), _) => speed,
            (None, FreeFlowPolicy::Fixed { speed_kmh }) => *speed_kmh,
            (
                None,
                FreeFlowPolicy::LengthScaled {
                    min_kmh,
                    max_kmh,
                    reference_length_m,
                },
            ) => {
                let saturation = 1.0 - (-segment.length_m / reference_length_m).exp();
                min_kmh + (max_kmh - min_kmh) * saturation
            }
        };
        if !speed.is_finite() || speed <= 0.0 {
            return Err(SimulationError::InvalidInput(
                segment.id.clone(),
                format!("free-flow speed must be positive, found {speed}"),
            ));
        }
        Ok(speed)
    }
}

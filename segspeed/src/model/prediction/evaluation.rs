use super::{ModelError, PredictionModel};
use crate::model::encoding::EncodedSample;
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// holdout evaluation settings. a share of the samples is withheld from training and used
/// to measure the mean absolute error of the trained model.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct EvaluationConfig {
    /// share of samples held out for testing, in (0, 1)
    pub test_fraction: f64,
    /// shuffle seed
    pub seed: u64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

impl EvaluationConfig {
    pub fn validate(&self) -> Result<(), ModelError> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(ModelError::InvalidInput(format!(
                "test_fraction must be in (0, 1), found {}",
                self.test_fraction
            )));
        }
        Ok(())
    }
}

/// shuffles the samples with the configured seed and splits them into (train, test). both
/// sides receive at least one sample.
pub fn holdout_split(
    samples: &[EncodedSample],
    config: &EvaluationConfig,
) -> Result<(Vec<EncodedSample>, Vec<EncodedSample>), ModelError> {
    config.validate()?;
    let n = samples.len();
    if n < 2 {
        return Err(ModelError::InvalidInput(format!(
            "holdout evaluation needs at least 2 samples, found {n}"
        )));
    }
    let test_count = ((n as f64 * config.test_fraction).round() as usize).clamp(1, n - 1);
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    indices.shuffle(&mut rng);
    let test = indices[..test_count].iter().map(|i| samples[*i]).collect();
    let train = indices[test_count..].iter().map(|i| samples[*i]).collect();
    Ok((train, test))
}

/// mean absolute difference between predicted and observed speeds.
pub fn mean_absolute_error(
    model: &PredictionModel,
    samples: &[EncodedSample],
) -> Result<f64, ModelError> {
    if samples.is_empty() {
        return Err(ModelError::InvalidInput(String::from(
            "cannot evaluate a model without samples",
        )));
    }
    let mut total = 0.0;
    for sample in samples.iter() {
        let predicted = model.predict_hour(sample.segment_code, sample.hour)?;
        total += (predicted - sample.speed).abs();
    }
    Ok(total / samples.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use segspeed_core::observation::Hour;

    fn samples(n: usize) -> Vec<EncodedSample> {
        (0..n)
            .map(|i| EncodedSample::new(i / 24, Hour::all().nth(i % 24).unwrap(), i as f64))
            .collect()
    }

    #[test]
    fn test_split_sizes_and_disjointness() {
        let all = samples(48);
        let (train, test) = holdout_split(&all, &EvaluationConfig::default()).unwrap();
        assert_eq!(test.len(), 10);
        assert_eq!(train.len(), 38);
        let mut speeds: Vec<f64> = train.iter().chain(test.iter()).map(|s| s.speed).collect();
        speeds.sort_by(|a, b| a.total_cmp(b));
        let expected: Vec<f64> = (0..48).map(|i| i as f64).collect();
        assert_eq!(speeds, expected);
    }

    #[test]
    fn test_split_is_seeded() {
        let all = samples(48);
        let config = EvaluationConfig::default();
        assert_eq!(
            holdout_split(&all, &config).unwrap(),
            holdout_split(&all, &config).unwrap()
        );
    }

    #[test]
    fn test_small_and_invalid_splits() {
        let (train, test) = holdout_split(&samples(2), &EvaluationConfig::default()).unwrap();
        assert_eq!((train.len(), test.len()), (1, 1));
        assert!(holdout_split(&samples(1), &EvaluationConfig::default()).is_err());
        let bad = EvaluationConfig {
            test_fraction: 1.0,
            ..Default::default()
        };
        assert!(holdout_split(&samples(10), &bad).is_err());
    }
}

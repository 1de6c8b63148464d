use super::{SimulationConfig, SimulationError};
use kdam::tqdm;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use segspeed_core::{
    observation::{Hour, TrafficObservation},
    segment::{RoadSegment, SegmentCatalog, SegmentId},
    util::fingerprint,
};
use std::collections::BTreeSet;

/// synthesizes hourly speed observations for the segments of a catalog.
///
/// the speed of a segment at an hour is `free_flow * multiplier(hour) + noise`, clamped
/// to `[min_speed_kmh, free_flow]`. the noise for each (seed, segment, hour) triple comes
/// from its own random stream, so results do not depend on catalog order or on which
/// other hours are simulated.
pub struct TrafficSimulator {
    config: SimulationConfig,
}

impl TrafficSimulator {
    pub fn new(config: SimulationConfig) -> Result<TrafficSimulator, SimulationError> {
        config.validate()?;
        Ok(TrafficSimulator { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// simulates one observation per segment and requested hour, in catalog order and
    /// then hour order. an empty catalog produces no observations.
    ///
    /// # Arguments
    ///
    /// * `catalog`  - road segments to simulate
    /// * `hours`    - hours of the day to simulate
    /// * `rng_seed` - seed for the noise. when omitted, a seed is drawn and logged.
    ///
    /// # Returns
    ///
    /// * the observations, or the first invalid segment encountered
    pub fn simulate(
        &self,
        catalog: &SegmentCatalog,
        hours: &BTreeSet<Hour>,
        rng_seed: Option<u64>,
    ) -> Result<Vec<TrafficObservation>, SimulationError> {
        let seed = match rng_seed {
            Some(seed) => seed,
            None => {
                let seed: u64 = rand::rng().random();
                log::info!("no simulation seed provided, using seed {seed}");
                seed
            }
        };
        log::info!(
            "simulating {} hours for {} road segments",
            hours.len(),
            catalog.len()
        );

        let mut observations = Vec::with_capacity(catalog.len() * hours.len());
        let segments = tqdm!(
            catalog.iter(),
            total = catalog.len(),
            desc = "simulate traffic"
        );
        for (idx, segment) in segments.enumerate() {
            if idx > 0 && idx % 1000 == 0 {
                log::debug!("simulated {} of {} segments", idx, catalog.len());
            }
            for hour in hours.iter() {
                let speed_kmh = self.speed(segment, *hour, seed)?;
                observations.push(TrafficObservation::new(
                    segment.id.clone(),
                    *hour,
                    speed_kmh,
                ));
            }
        }
        eprintln!();
        Ok(observations)
    }

    /// simulates all 24 hours of the day.
    pub fn simulate_day(
        &self,
        catalog: &SegmentCatalog,
        rng_seed: Option<u64>,
    ) -> Result<Vec<TrafficObservation>, SimulationError> {
        let hours = Hour::all().collect::<BTreeSet<_>>();
        self.simulate(catalog, &hours, rng_seed)
    }

    /// simulated speed of one segment at one hour.
    ///
    /// a segment whose free-flow speed is not above
    /// [`SimulationConfig::min_free_flow_kmh`] is invalid input: its rush-hour and night
    /// speeds could not be told apart at the configured noise level.
    pub fn speed(
        &self,
        segment: &RoadSegment,
        hour: Hour,
        seed: u64,
    ) -> Result<f64, SimulationError> {
        let free_flow = self.config.free_flow.free_flow_speed(segment)?;
        let floor = self.config.min_free_flow_kmh();
        if free_flow <= floor {
            return Err(SimulationError::InvalidInput(
                segment.id.clone(),
                format!(
                    "free-flow speed {free_flow} km/h must exceed {floor:.2} km/h for the configured speed floor and noise"
                ),
            ));
        }
        let expected = free_flow * self.config.profile.multiplier(hour);
        let mut rng = ChaCha8Rng::seed_from_u64(observation_seed(seed, &segment.id, hour));
        let noise = self.config.noise.sample(&mut rng)?;
        let min_speed = self.config.min_speed_kmh;
        Ok((expected + noise).clamp(min_speed, free_flow))
    }
}

/// derives the random stream for a (seed, segment, hour) triple.
fn observation_seed(seed: u64, segment_id: &SegmentId, hour: Hour) -> u64 {
    let segment_hash = fingerprint::fnv1a([segment_id.as_str().as_bytes()]);
    let key = fingerprint::mix64(segment_hash ^ fingerprint::mix64(hour.value() as u64));
    fingerprint::mix64(seed ^ key)
}

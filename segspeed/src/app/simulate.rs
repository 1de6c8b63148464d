use super::{AppError, PipelineConfig};
use crate::model::simulation::TrafficSimulator;
use itertools::{Itertools, MinMaxResult};
use segspeed_core::{observation::write_observations, segment::SegmentCatalog};
use std::path::Path;

/// simulates all 24 hours for every catalog segment and writes the observation table.
/// returns the number of observations written.
pub fn run(
    segments_file: &Path,
    output_file: &Path,
    config: &PipelineConfig,
    seed: Option<u64>,
) -> Result<usize, AppError> {
    let catalog = SegmentCatalog::from_csv(segments_file)?;
    let simulator = TrafficSimulator::new(config.simulation.clone())?;
    let observations = simulator.simulate_day(&catalog, seed)?;
    if let MinMaxResult::MinMax(lo, hi) = observations.iter().map(|o| o.speed_kmh).minmax() {
        log::info!("simulated speeds range from {lo:.1} to {hi:.1} km/h");
    }
    write_observations(&observations, output_file)?;
    Ok(observations.len())
}

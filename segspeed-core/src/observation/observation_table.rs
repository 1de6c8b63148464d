use super::{Hour, ObservationError, TrafficObservation, HOURS_PER_DAY};
use crate::{segment::SegmentId, util::fs_utils};
use itertools::Itertools;
use std::{
    collections::HashMap,
    io::{Read, Write},
    path::Path,
};

/// reads an observation table (segment_id, hour, speed_kmh) from a CSV file, optionally gzipped.
/// extra columns such as `road_name` are ignored. a (segment_id, hour) pair may appear only
/// once; coverage of the full day is checked separately by [`check_coverage`].
pub fn read_observations(filepath: &Path) -> Result<Vec<TrafficObservation>, ObservationError> {
    let name = filepath.to_string_lossy().to_string();
    let reader = fs_utils::open_reader(filepath)
        .map_err(|e| ObservationError::ReadError(name.clone(), e.to_string()))?;
    let observations = read_observations_from(reader, &name)?;
    log::info!("loaded {} observations from {name}", observations.len());
    Ok(observations)
}

pub fn read_observations_from<R: Read>(
    reader: R,
    source: &str,
) -> Result<Vec<TrafficObservation>, ObservationError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);
    let mut observations = vec![];
    let mut first_rows: HashMap<(SegmentId, Hour), usize> = HashMap::new();
    for (row_idx, row) in csv_reader.deserialize::<TrafficObservation>().enumerate() {
        let obs = row.map_err(|e| {
            ObservationError::ReadError(source.to_string(), format!("row {row_idx}: {e}"))
        })?;
        if !obs.speed_kmh.is_finite() || obs.speed_kmh <= 0.0 {
            return Err(ObservationError::ReadError(
                source.to_string(),
                format!(
                    "row {row_idx}: speed_kmh must be positive, found {}",
                    obs.speed_kmh
                ),
            ));
        }
        if let Some(first_row) = first_rows.insert((obs.segment_id.clone(), obs.hour), row_idx) {
            return Err(ObservationError::DuplicateObservation {
                row: row_idx,
                first_row,
                segment_id: obs.segment_id.to_string(),
                hour: obs.hour.to_string(),
            });
        }
        observations.push(obs);
    }
    Ok(observations)
}

/// writes the observation table as CSV, gzipped when the path ends in ".gz".
pub fn write_observations(
    observations: &[TrafficObservation],
    filepath: &Path,
) -> Result<(), ObservationError> {
    let name = filepath.to_string_lossy().to_string();
    let writer = fs_utils::create_writer(filepath)
        .map_err(|e| ObservationError::WriteError(name.clone(), e.to_string()))?;
    write_observations_to(observations, writer, &name)?;
    log::info!("wrote {} observations to {name}", observations.len());
    Ok(())
}

pub fn write_observations_to<W: Write>(
    observations: &[TrafficObservation],
    writer: W,
    destination: &str,
) -> Result<(), ObservationError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);
    for obs in observations.iter() {
        csv_writer
            .serialize(obs)
            .map_err(|e| ObservationError::WriteError(destination.to_string(), e.to_string()))?;
    }
    csv_writer
        .flush()
        .map_err(|e| ObservationError::WriteError(destination.to_string(), e.to_string()))
}

/// confirms that every segment in the table has an observation for each of the 24 hours.
/// with duplicates already rejected on read, a count of 24 means full coverage.
pub fn check_coverage(observations: &[TrafficObservation]) -> Result<(), ObservationError> {
    let counts = observations.iter().map(|o| &o.segment_id).counts();
    let incomplete = counts
        .iter()
        .filter(|(_, count)| **count != HOURS_PER_DAY as usize)
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .collect::<Vec<_>>();
    match incomplete.first() {
        None => Ok(()),
        Some((segment_id, count)) => {
            log::error!(
                "{} of {} segments do not have exactly {} hourly observations",
                incomplete.len(),
                counts.len(),
                HOURS_PER_DAY
            );
            Err(ObservationError::IncompleteCoverage {
                segment_id: segment_id.to_string(),
                count: **count,
                expected: HOURS_PER_DAY as usize,
            })
        }
    }
}

use super::AppError;
use crate::model::service::{PredictionRequest, PredictionResponse, PredictionService};
use rayon::prelude::*;
use segspeed_core::util::fs_utils;
use std::{
    io::{BufRead, BufReader, Read},
    path::Path,
};

/// answers every request of a newline-delimited JSON query file against one shared
/// service. responses keep the order of the requests.
///
/// # Arguments
///
/// * `service` - loaded prediction service
/// * `query_file` - one [`PredictionRequest`] per line, optionally gzipped
/// * `parallelism` - number of rayon worker threads, the global pool when absent
pub fn run(
    service: &PredictionService,
    query_file: &Path,
    parallelism: Option<usize>,
) -> Result<Vec<PredictionResponse>, AppError> {
    let reader = fs_utils::open_reader(query_file).map_err(|e| {
        AppError::IoError(format!(
            "failure reading {}: {e}",
            query_file.to_string_lossy()
        ))
    })?;
    let requests = read_requests(reader)?;
    log::info!("answering {} prediction requests", requests.len());

    let answer = || -> Vec<PredictionResponse> {
        requests.par_iter().map(|r| service.handle(r)).collect()
    };
    let responses = match parallelism {
        None => answer(),
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| AppError::ConfigurationError(format!("failure building thread pool: {e}")))?;
            pool.install(answer)
        }
    };
    let failed = responses.iter().filter(|r| !r.is_success()).count();
    if failed > 0 {
        log::warn!("{} of {} requests failed", failed, responses.len());
    }
    Ok(responses)
}

/// parses newline-delimited requests. blank lines are skipped.
pub fn read_requests<R: Read>(reader: R) -> Result<Vec<PredictionRequest>, AppError> {
    let mut requests = vec![];
    for (idx, line) in BufReader::new(reader).lines().enumerate() {
        let line = line.map_err(|e| AppError::IoError(e.to_string()))?;
        if line.trim().is_empty() {
            continue;
        }
        let request = serde_json::from_str(&line).map_err(|e| AppError::InvalidQuery {
            line: idx + 1,
            message: e.to_string(),
        })?;
        requests.push(request);
    }
    Ok(requests)
}

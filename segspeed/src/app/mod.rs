//! command line operations of the segspeed pipeline: simulate, train, predict, batch and
//! segments.
mod app_error;
pub mod batch;
mod pipeline_config;
pub mod predict;
pub mod segments;
pub mod simulate;
pub mod train;

pub use app_error::AppError;
pub use pipeline_config::PipelineConfig;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        forest::ForestConfig,
        service::{PredictionResponse, PredictionService},
    };
    use std::path::PathBuf;

    const CATALOG: &str = "segment_id,name,length_m,geometry
seg_1,Marszałkowska,120.5,\"LINESTRING (21.0122 52.2297, 21.0130 52.2301)\"
seg_2,,80.0,\"LINESTRING (21.0130 52.2301, 21.0141 52.2305)\"
seg_3,Aleje Jerozolimskie,,\"LINESTRING (21.0141 52.2305, 21.0160 52.2310)\"
";

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("segspeed-pipeline-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_pipeline_end_to_end() {
        let dir = temp_dir();
        let segments_file = dir.join("segments.csv");
        let observations_file = dir.join("observations.csv.gz");
        let model_file = dir.join("model.json");
        let encoder_file = dir.join("encoder.json");
        let query_file = dir.join("queries.jsonl");
        std::fs::write(&segments_file, CATALOG).unwrap();

        let config = PipelineConfig {
            forest: ForestConfig {
                tree_count: 15,
                ..Default::default()
            },
            ..Default::default()
        };
        let written = simulate::run(&segments_file, &observations_file, &config, Some(7)).unwrap();
        assert_eq!(written, 72);

        let trained = train::run(&observations_file, &model_file, &encoder_file, &config).unwrap();
        assert_eq!(trained.encoder().len(), 3);

        let response = predict::run(&segments_file, &model_file, &encoder_file, "seg_3", 8).unwrap();
        assert!(response.is_success());

        std::fs::write(
            &query_file,
            "{\"segment_id\": \"seg_1\", \"hour\": 3}\n{\"segment_id\": \"nope\", \"hour\": 3}\n",
        )
        .unwrap();
        let service = PredictionService::load(&segments_file, &model_file, &encoder_file).unwrap();
        let responses = batch::run(&service, &query_file, Some(2)).unwrap();
        assert_eq!(responses.len(), 2);
        assert!(responses[0].is_success());
        match &responses[1] {
            PredictionResponse::Failure(f) => assert_eq!(f.error.kind, "not_found"),
            PredictionResponse::Success(_) => panic!("expected a failure for an unknown segment"),
        }

        let names = segments::run(&segments_file).unwrap();
        assert_eq!(
            names,
            vec![
                String::from("Aleje Jerozolimskie (seg_3)"),
                String::from("Marszałkowska (seg_1)"),
            ]
        );
        std::fs::remove_dir_all(dir).unwrap();
    }
}

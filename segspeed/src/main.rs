use clap::{Parser, Subcommand};
use segspeed::{
    app::{batch, predict, segments, simulate, train, AppError, PipelineConfig},
    model::service::PredictionService,
};
use std::{
    io::{BufWriter, Write},
    path::Path,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct SegspeedArguments {
    #[command(subcommand)]
    app: App,
}

#[derive(Subcommand)]
pub enum App {
    /// generate 24 hours of synthetic speeds for every catalog segment
    Simulate {
        #[arg(long, help = "segment catalog CSV")]
        segments_file: String,
        #[arg(long, help = "output path for the observation table (.csv or .csv.gz)")]
        output_file: String,
        #[arg(long, help = "path to .toml or .json file with segspeed parameters")]
        config_file: Option<String>,
        #[arg(long, help = "random seed, drawn at random when absent")]
        seed: Option<u64>,
    },
    /// fit the segment encoder and the speed model on an observation table
    Train {
        #[arg(long, help = "observation table written by simulate")]
        observations_file: String,
        #[arg(long, help = "output path for the model")]
        model_file: String,
        #[arg(long, help = "output path for the encoder paired with the model")]
        encoder_file: String,
        #[arg(long, help = "path to .toml or .json file with segspeed parameters")]
        config_file: Option<String>,
    },
    /// predict the speed of one segment at one hour
    Predict {
        #[arg(long, help = "segment catalog CSV")]
        segments_file: String,
        #[arg(long)]
        model_file: String,
        #[arg(long)]
        encoder_file: String,
        #[arg(long)]
        segment_id: String,
        #[arg(long, allow_negative_numbers = true, help = "hour of the day, 0-23")]
        hour: i64,
    },
    /// answer newline-delimited JSON requests, writing one JSON response per line
    Batch {
        #[arg(long, help = "segment catalog CSV")]
        segments_file: String,
        #[arg(long)]
        model_file: String,
        #[arg(long)]
        encoder_file: String,
        #[arg(long, help = "file with one {\"segment_id\", \"hour\"} request per line")]
        query_file: String,
        #[arg(long, help = "number of worker threads")]
        parallelism: Option<usize>,
    },
    /// list the named segments of a catalog
    Segments {
        #[arg(long, help = "segment catalog CSV")]
        segments_file: String,
    },
}

pub fn run(app: &App) -> Result<(), AppError> {
    env_logger::init();
    match app {
        App::Simulate {
            segments_file,
            output_file,
            config_file,
            seed,
        } => {
            let config = PipelineConfig::from_optional_file(config_file.as_ref())?;
            simulate::run(
                Path::new(segments_file),
                Path::new(output_file),
                &config,
                *seed,
            )?;
            eprintln!("finished.");
            Ok(())
        }
        App::Train {
            observations_file,
            model_file,
            encoder_file,
            config_file,
        } => {
            let config = PipelineConfig::from_optional_file(config_file.as_ref())?;
            let model = train::run(
                Path::new(observations_file),
                Path::new(model_file),
                Path::new(encoder_file),
                &config,
            )?;
            if let Some(mae) = model.model().metadata().mean_absolute_error {
                eprintln!("holdout mean absolute error: {mae:.3} km/h");
            }
            eprintln!("finished.");
            Ok(())
        }
        App::Predict {
            segments_file,
            model_file,
            encoder_file,
            segment_id,
            hour,
        } => {
            let response = predict::run(
                Path::new(segments_file),
                Path::new(model_file),
                Path::new(encoder_file),
                segment_id,
                *hour,
            )?;
            let json = serde_json::to_string_pretty(&response)
                .map_err(|e| AppError::IoError(format!("failure encoding response: {e}")))?;
            println!("{json}");
            Ok(())
        }
        App::Batch {
            segments_file,
            model_file,
            encoder_file,
            query_file,
            parallelism,
        } => {
            let service = PredictionService::load(
                Path::new(segments_file),
                Path::new(model_file),
                Path::new(encoder_file),
            )?;
            let responses = batch::run(&service, Path::new(query_file), *parallelism)?;
            let stdout = std::io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            for response in responses.iter() {
                let line = serde_json::to_string(response)
                    .map_err(|e| AppError::IoError(format!("failure encoding response: {e}")))?;
                writeln!(out, "{line}").map_err(|e| AppError::IoError(e.to_string()))?;
            }
            out.flush().map_err(|e| AppError::IoError(e.to_string()))
        }
        App::Segments { segments_file } => {
            for name in segments::run(Path::new(segments_file))? {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn main() {
    let args = SegspeedArguments::parse();
    if let Err(e) = run(&args.app) {
        log::error!("segspeed failed: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}

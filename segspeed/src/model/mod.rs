pub mod encoding;
pub mod forest;
pub mod prediction;
pub mod service;
pub mod simulation;

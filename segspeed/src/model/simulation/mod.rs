mod free_flow_policy;
mod hour_band;
mod hourly_profile;
mod noise_model;
mod simulation_config;
mod simulation_error;
mod traffic_regime;
mod traffic_simulator;

pub use free_flow_policy::FreeFlowPolicy;
pub use hour_band::HourBand;
pub use hourly_profile::HourlyProfile;
pub use noise_model::NoiseModel;
pub use simulation_config::SimulationConfig;
pub use simulation_error::SimulationError;
pub use traffic_regime::TrafficRegime;
pub use traffic_simulator::TrafficSimulator;

mod hour;
mod observation_error;
mod observation_table;
mod traffic_observation;

pub use hour::{Hour, HOURS_PER_DAY};
pub use observation_error::ObservationError;
pub use observation_table::{check_coverage, read_observations, write_observations};
pub use traffic_observation::TrafficObservation;

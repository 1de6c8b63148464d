pub mod observation;
pub mod segment;
pub mod util;

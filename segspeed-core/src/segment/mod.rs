mod catalog_error;
mod catalog_row;
mod road_segment;
mod segment_catalog;
mod segment_id;

pub use catalog_error::CatalogError;
pub use catalog_row::CatalogRow;
pub use road_segment::{RoadSegment, UNNAMED_ROAD};
pub use segment_catalog::SegmentCatalog;
pub use segment_id::SegmentId;

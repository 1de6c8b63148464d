use super::AppError;
use segspeed_core::segment::SegmentCatalog;
use std::path::Path;

/// display names of the named catalog segments, sorted by street name.
pub fn run(segments_file: &Path) -> Result<Vec<String>, AppError> {
    let catalog = SegmentCatalog::from_csv(segments_file)?;
    let names = catalog
        .named_segments()
        .iter()
        .map(|s| s.display_name())
        .collect();
    Ok(names)
}

use super::{CatalogError, CatalogRow, RoadSegment, SegmentId};
use crate::util::fs_utils;
use std::{collections::HashMap, io::Read, path::Path};

/// immutable collection of road segments, kept in input order with lookup by id.
#[derive(Clone, Debug, Default)]
pub struct SegmentCatalog {
    segments: Vec<RoadSegment>,
    lookup: HashMap<SegmentId, usize>,
}

impl SegmentCatalog {
    /// builds a catalog. when an id appears more than once, the first segment is kept.
    pub fn new(segments: Vec<RoadSegment>) -> SegmentCatalog {
        let mut kept: Vec<RoadSegment> = Vec::with_capacity(segments.len());
        let mut lookup: HashMap<SegmentId, usize> = HashMap::with_capacity(segments.len());
        let mut duplicates = 0;
        for segment in segments {
            if lookup.contains_key(&segment.id) {
                duplicates += 1;
                continue;
            }
            lookup.insert(segment.id.clone(), kept.len());
            kept.push(segment);
        }
        if duplicates > 0 {
            log::warn!("dropped {duplicates} road segments with duplicate segment ids");
        }
        SegmentCatalog {
            segments: kept,
            lookup,
        }
    }

    /// reads a catalog CSV file (optionally gzipped). see [`CatalogRow`] for the columns.
    pub fn from_csv(filepath: &Path) -> Result<SegmentCatalog, CatalogError> {
        let name = filepath.to_string_lossy().to_string();
        let reader = fs_utils::open_reader(filepath)
            .map_err(|e| CatalogError::ReadError(name.clone(), e.to_string()))?;
        let catalog = Self::from_reader(reader, &name)?;
        log::info!("loaded {} road segments from {name}", catalog.len());
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R, source: &str) -> Result<SegmentCatalog, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        let mut segments = vec![];
        for (row_idx, row) in csv_reader.deserialize::<CatalogRow>().enumerate() {
            let row = row.map_err(|e| CatalogError::ReadError(source.to_string(), e.to_string()))?;
            segments.push(row.into_segment(row_idx)?);
        }
        Ok(SegmentCatalog::new(segments))
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoadSegment> {
        self.segments.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &SegmentId> {
        self.segments.iter().map(|s| &s.id)
    }

    pub fn get(&self, id: &SegmentId) -> Option<&RoadSegment> {
        self.lookup.get(id).and_then(|idx| self.segments.get(*idx))
    }

    pub fn find(&self, id: &SegmentId) -> Result<&RoadSegment, CatalogError> {
        self.get(id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    pub fn contains(&self, id: &SegmentId) -> bool {
        self.lookup.contains_key(id)
    }

    /// segments with a street name, sorted by name and then id, for selection lists.
    pub fn named_segments(&self) -> Vec<&RoadSegment> {
        let mut named = self
            .segments
            .iter()
            .filter(|s| s.name.is_some())
            .collect::<Vec<_>>();
        named.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        named
    }
}

use super::EncoderError;
use segspeed_core::{segment::SegmentId, util::fingerprint};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// bijection between segment ids and dense integer codes `0..k`, used to feed segment
/// identity to the regression model. codes follow the order in which ids first appear
/// in the fitted sequence, so fitting the same sequence always yields the same codes.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(try_from = "SegmentEncoderRecord", into = "SegmentEncoderRecord")]
pub struct SegmentEncoder {
    segment_ids: Vec<SegmentId>,
    lookup: HashMap<SegmentId, usize>,
    fingerprint: String,
}

/// stored form of a [`SegmentEncoder`].
#[derive(Serialize, Deserialize)]
struct SegmentEncoderRecord {
    fingerprint: String,
    segment_ids: Vec<SegmentId>,
}

impl SegmentEncoder {
    /// fits an encoder to a sequence of ids. repeated ids keep the code of their
    /// first appearance.
    pub fn fit<'a, I>(segment_ids: I) -> SegmentEncoder
    where
        I: IntoIterator<Item = &'a SegmentId>,
    {
        let mut ids: Vec<SegmentId> = vec![];
        let mut lookup: HashMap<SegmentId, usize> = HashMap::new();
        for id in segment_ids {
            if !lookup.contains_key(id) {
                lookup.insert(id.clone(), ids.len());
                ids.push(id.clone());
            }
        }
        let fingerprint = fingerprint_of(&ids);
        log::debug!("fitted segment encoder with {} codes", ids.len());
        SegmentEncoder {
            segment_ids: ids,
            lookup,
            fingerprint,
        }
    }

    pub fn encode(&self, segment_id: &SegmentId) -> Result<usize, EncoderError> {
        self.lookup
            .get(segment_id)
            .copied()
            .ok_or_else(|| EncoderError::UnknownSegment(segment_id.clone()))
    }

    pub fn decode(&self, code: usize) -> Result<&SegmentId, EncoderError> {
        self.segment_ids.get(code).ok_or(EncoderError::InvalidCode {
            code,
            size: self.segment_ids.len(),
        })
    }

    pub fn contains(&self, segment_id: &SegmentId) -> bool {
        self.lookup.contains_key(segment_id)
    }

    /// number of codes, i.e. distinct fitted ids.
    pub fn len(&self) -> usize {
        self.segment_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segment_ids.is_empty()
    }

    pub fn segment_ids(&self) -> &[SegmentId] {
        &self.segment_ids
    }

    /// content fingerprint of the ordered id list. a model records the fingerprint of
    /// the encoder it was trained with.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn fingerprint_of(ids: &[SegmentId]) -> String {
    fingerprint::fingerprint(ids.iter().map(|id| id.as_str()))
}

impl From<SegmentEncoder> for SegmentEncoderRecord {
    fn from(value: SegmentEncoder) -> Self {
        SegmentEncoderRecord {
            fingerprint: value.fingerprint,
            segment_ids: value.segment_ids,
        }
    }
}

impl TryFrom<SegmentEncoderRecord> for SegmentEncoder {
    type Error = EncoderError;

    fn try_from(record: SegmentEncoderRecord) -> Result<Self, Self::Error> {
        let mut lookup = HashMap::with_capacity(record.segment_ids.len());
        for (code, id) in record.segment_ids.iter().enumerate() {
            if lookup.insert(id.clone(), code).is_some() {
                return Err(EncoderError::CorruptEncoder(format!(
                    "segment '{id}' appears more than once"
                )));
            }
        }
        let fingerprint = fingerprint_of(&record.segment_ids);
        if fingerprint != record.fingerprint {
            return Err(EncoderError::CorruptEncoder(format!(
                "fingerprint {} does not match segment ids (expected {fingerprint})",
                record.fingerprint
            )));
        }
        Ok(SegmentEncoder {
            segment_ids: record.segment_ids,
            lookup,
            fingerprint,
        })
    }
}

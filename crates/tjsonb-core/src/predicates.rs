use std::fmt;

use serde::{Deserialize, Serialize};
use tjsonb_canonical::structurally_matches;

use crate::document::TimestampedDocument;

/// Whether two documents describe the same instant with matching content.
///
/// Content is compared with [`structurally_matches`], which is a positional
/// prefix walk: a document matches any other document that starts with the
/// same token sequence, and object keys are compared by position only.
pub fn overlaps(a: &TimestampedDocument, b: &TimestampedDocument) -> bool {
    a.timestamp() == b.timestamp() && structurally_matches(a.document(), b.document())
}

/// Outcome of [`range_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeReport {
    /// `start` is not after `end` and the contents match.
    OverlapFound,
    /// Anything else.
    NoOverlap,
}

impl RangeReport {
    /// The fixed report text.
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeReport::OverlapFound => "Overlap found within range",
            RangeReport::NoOverlap => "No overlap in specified range",
        }
    }
}

impl fmt::Display for RangeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reports whether `start..=end` is a well-ordered range over matching content.
pub fn range_report(start: &TimestampedDocument, end: &TimestampedDocument) -> RangeReport {
    if start.timestamp() <= end.timestamp()
        && structurally_matches(start.document(), end.document())
    {
        RangeReport::OverlapFound
    } else {
        RangeReport::NoOverlap
    }
}

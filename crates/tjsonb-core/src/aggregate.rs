//! Averages over collections of documents.
//!
//! [`average_scalar`] reads each document's root value. It does not look up
//! a `speed` member (or any other key), despite being registered as
//! `tjsonb_aggregate_speed`, so a collection of objects averages to `None`.
//! [`average_field`] is the keyed variant.

use tjsonb_canonical::JsonValue;
use tracing::debug;

use crate::document::TimestampedDocument;

#[derive(Default)]
struct Mean {
    sum: f64,
    count: usize,
    skipped: usize,
}

impl Mean {
    fn push(&mut self, value: Option<&JsonValue>) {
        match value.and_then(JsonValue::as_number) {
            Some(n) => {
                self.sum += n.to_f64();
                self.count += 1;
            }
            None => self.skipped += 1,
        }
    }

    fn finish(self) -> Option<f64> {
        debug!(count = self.count, skipped = self.skipped, "averaged documents");
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// Averages the documents whose root value is a number.
///
/// Non-numeric roots are skipped silently. Returns `None` when no document
/// has a numeric root, including for an empty collection.
pub fn average_scalar<'a, I>(docs: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a TimestampedDocument>,
{
    let mut mean = Mean::default();
    for doc in docs {
        mean.push(Some(doc.document()));
    }
    mean.finish()
}

/// Averages the numeric member `key` of object documents.
///
/// Documents that are not objects, lack the key, or hold a non-number under
/// it are skipped. Returns `None` when nothing was counted.
pub fn average_field<'a, I>(docs: I, key: &str) -> Option<f64>
where
    I: IntoIterator<Item = &'a TimestampedDocument>,
{
    let mut mean = Mean::default();
    for doc in docs {
        mean.push(doc.document().get(key));
    }
    mean.finish()
}

//! Ingestion of raw records into validated items
//!
//! A malformed record is logged and dropped; it never fails the batch.

use trendscope_domain::{InputError, Item, RawItem};

/// Outcome of validating a batch of raw records
#[derive(Debug, Clone, Default)]
pub struct Ingested {
    /// Valid items, in input order
    pub items: Vec<Item>,
    /// Rejected records, described for logging, with the reason
    pub rejected: Vec<(String, InputError)>,
}

/// Validate raw records, keeping input order for the accepted ones
pub fn ingest(raw: Vec<RawItem>) -> Ingested {
    let mut ingested = Ingested::default();

    for record in raw {
        let description = record.describe();
        match Item::from_raw(record) {
            Ok(item) => ingested.items.push(item),
            Err(e) => {
                tracing::warn!("Dropping record {}: {}", description, e);
                ingested.rejected.push((description, e));
            }
        }
    }

    ingested
}

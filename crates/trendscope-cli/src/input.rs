//! Reading item batches from disk or stdin.

use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::Path;
use trendscope_domain::RawItem;

/// Accepted batch layouts: a bare array, or an object wrapping one
#[derive(Deserialize)]
#[serde(untagged)]
enum BatchFile {
    Items(Vec<RawItem>),
    Wrapped {
        #[serde(alias = "articles", alias = "items")]
        data: Vec<RawItem>,
    },
}

/// Parse a JSON batch.
pub fn parse_batch(json: &str) -> Result<Vec<RawItem>> {
    let batch: BatchFile = serde_json::from_str(json)?;
    Ok(match batch {
        BatchFile::Items(items) => items,
        BatchFile::Wrapped { data } => data,
    })
}

/// Read a JSON batch from `path`, or from stdin when `path` is `-`.
pub fn read_batch(path: &Path) -> Result<Vec<RawItem>> {
    let contents = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(path)?
    };
    parse_batch(&contents)
}

// Copyright 2026 Boundless Foundation, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Raw event snapshots and their CSV/JSON persistence.

use std::{fs::File, path::Path};

use alloy::primitives::{Address, B256};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// One indexed `Result` event, with its sender resolved.
///
/// `index` and `passthrough` are decimal-encoded uint256 values; keeping them
/// as strings preserves the full range in CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub block_number: u64,
    pub tx_hash: B256,
    pub from: Address,
    pub index: String,
    pub success: bool,
    pub passthrough: String,
}

/// An ordered batch of [`EventRecord`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRecords(pub Vec<EventRecord>);

impl EventRecords {
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        for record in &self.0 {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &self.0)?;
        Ok(())
    }

    pub fn from_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(Self(records))
    }

    pub fn from_json(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        Ok(Self(serde_json::from_reader(file)?))
    }

    /// Load records from a file, dispatching on its extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("csv") => Self::from_csv(path),
            Some("json") => Self::from_json(path),
            _ => bail!("Unsupported events file extension: {}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{address, tx_hash};

    fn sample_records() -> EventRecords {
        EventRecords(vec![
            EventRecord {
                block_number: 17,
                tx_hash: tx_hash(1),
                from: address(1),
                index: "1".to_string(),
                success: true,
                passthrough: "0".to_string(),
            },
            EventRecord {
                block_number: 18,
                tx_hash: tx_hash(2),
                from: address(2),
                index: "340282366920938463463374607431768211456".to_string(),
                success: false,
                passthrough: "7".to_string(),
            },
        ])
    }

    #[test]
    fn csv_header_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.csv");
        sample_records().write_csv(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let header = contents.lines().next().unwrap();
        assert_eq!(header, "blockNumber,txHash,from,index,success,passthrough");
    }

    #[test]
    fn from_file_reads_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let records = sample_records();

        let csv_path = dir.path().join("events.csv");
        let json_path = dir.path().join("events.json");
        records.write_csv(&csv_path).unwrap();
        records.write_json(&json_path).unwrap();

        assert_eq!(EventRecords::from_file(&csv_path).unwrap(), records);
        assert_eq!(EventRecords::from_file(&json_path).unwrap(), records);
    }

    #[test]
    fn from_file_rejects_unknown_extension() {
        assert!(EventRecords::from_file(Path::new("events.parquet")).is_err());
    }
}

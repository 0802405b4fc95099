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

//! Per-sender success-count aggregation over indexed events.

use std::{collections::HashMap, fs::File, path::Path};

use alloy::primitives::Address;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::records::EventRecord;

/// Count of successful events for one sender address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressCount {
    pub address: Address,
    pub count: u64,
}

/// Aggregated counts, sorted by count descending with ties broken by
/// address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressCounts(pub Vec<AddressCount>);

/// Count events with `success == true` per sender.
pub fn aggregate(records: &[EventRecord]) -> AddressCounts {
    let mut counts: HashMap<Address, u64> = HashMap::new();
    for record in records.iter().filter(|r| r.success) {
        *counts.entry(record.from).or_default() += 1;
    }

    let mut sorted: Vec<AddressCount> =
        counts.into_iter().map(|(address, count)| AddressCount { address, count }).collect();
    sorted.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.address.cmp(&b.address)));
    AddressCounts(sorted)
}

impl AddressCounts {
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        for count in &self.0 {
            writer.serialize(count)?;
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{address, tx_hash};

    fn record(seq: u64, success: bool, from: Address) -> EventRecord {
        EventRecord {
            block_number: seq,
            tx_hash: tx_hash(seq),
            from,
            index: seq.to_string(),
            success,
            passthrough: "0".to_string(),
        }
    }

    #[test]
    fn counts_only_successes() {
        let records = vec![
            record(1, true, address(1)),
            record(2, true, address(1)),
            record(3, false, address(1)),
            record(4, true, address(2)),
        ];
        let counts = aggregate(&records);
        assert_eq!(
            counts.0,
            vec![
                AddressCount { address: address(1), count: 2 },
                AddressCount { address: address(2), count: 1 },
            ]
        );
    }

    #[test]
    fn order_of_input_does_not_matter() {
        let mut records = vec![
            record(1, true, address(3)),
            record(2, true, address(1)),
            record(3, true, address(3)),
            record(4, false, address(2)),
            record(5, true, address(2)),
        ];
        let forward = aggregate(&records);
        records.reverse();
        let backward = aggregate(&records);
        records.rotate_left(2);
        let rotated = aggregate(&records);

        assert_eq!(forward, backward);
        assert_eq!(forward, rotated);
    }

    #[test]
    fn equal_counts_sort_by_address() {
        let records = vec![record(1, true, address(9)), record(2, true, address(1))];
        let counts = aggregate(&records);
        assert_eq!(counts.0[0].address, address(1));
        assert_eq!(counts.0[1].address, address(9));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(aggregate(&[]).0.is_empty());
    }

    #[test]
    fn csv_header_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        aggregate(&[record(1, true, address(1))]).write_csv(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().next().unwrap(), "address,count");
    }
}

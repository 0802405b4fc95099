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

//! Proportional points allocation over aggregated stats files.

use std::{collections::HashMap, path::Path};

use alloy::primitives::Address;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ServiceError;

/// Stats files are recognized by this filename suffix.
pub const STATS_FILE_SUFFIX: &str = "stats.csv";

/// Points granted to one address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsAllocation {
    pub address: Address,
    pub points: u64,
}

/// Allocations sorted by points descending with ties broken by address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointsAllocations(pub Vec<PointsAllocation>);

impl PointsAllocations {
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        for allocation in &self.0 {
            writer.serialize(allocation)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn total_allocated(&self) -> u64 {
        self.0.iter().map(|a| a.points).sum()
    }
}

/// Sum counts from every `*stats.csv` under `stats_dir` and allocate
/// `floor(count * total_points / total_count)` points per address.
///
/// Truncation means the allocated sum can fall short of `total_points`; the
/// remainder is not redistributed. Rows that fail to parse are skipped.
/// Returns [`ServiceError::EmptyStats`] when no valid rows are found.
pub fn distribute(stats_dir: &Path, total_points: u64) -> Result<PointsAllocations, ServiceError> {
    let mut paths: Vec<_> = std::fs::read_dir(stats_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(STATS_FILE_SUFFIX))
        })
        .collect();
    paths.sort();

    let mut counts: HashMap<Address, u64> = HashMap::new();
    let mut total_count: u64 = 0;
    for path in &paths {
        tracing::info!("Reading stats file {}", path.display());
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
        for row in reader.deserialize::<HashMap<String, String>>() {
            let row = match row {
                Ok(row) => row,
                Err(err) => {
                    tracing::warn!("Skipping malformed row in {}: {err}", path.display());
                    continue;
                }
            };
            let (Some(address_raw), Some(count_raw)) = (row.get("address"), row.get("count"))
            else {
                tracing::warn!("Skipping row without address or count in {}", path.display());
                continue;
            };
            let Ok(address) = address_raw.parse::<Address>() else {
                tracing::warn!("Skipping unparseable address {address_raw} in {}", path.display());
                continue;
            };
            let Ok(count) = count_raw.parse::<u64>() else {
                tracing::warn!("Skipping unparseable count {count_raw} in {}", path.display());
                continue;
            };
            *counts.entry(address).or_default() += count;
            total_count += count;
        }
    }

    if total_count == 0 {
        return Err(ServiceError::EmptyStats);
    }
    tracing::info!("Total count across {} stats files: {total_count}", paths.len());

    let mut allocations: Vec<PointsAllocation> = counts
        .into_iter()
        .map(|(address, count)| {
            let points = (count as u128 * total_points as u128 / total_count as u128) as u64;
            PointsAllocation { address, points }
        })
        .collect();
    allocations.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.address.cmp(&b.address)));
    Ok(PointsAllocations(allocations))
}

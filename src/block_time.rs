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

//! Maps wall-clock timestamps to block numbers by binary search over block
//! headers. Assumes monotonically non-decreasing block timestamps.

use chrono::NaiveDate;

use crate::{chain::Chain, ServiceError};

/// Find the first block whose timestamp is at or after `target`.
///
/// Returns `latest + 1` when every block is older than `target`. A block the
/// node cannot return terminates the search early at the current lower bound,
/// which may undershoot the exact boundary.
pub async fn find_block_by_timestamp<C: Chain>(
    chain: &C,
    target: u64,
) -> Result<u64, ServiceError> {
    let latest = chain.latest_block_number().await?;
    let mut lower = 0u64;
    let mut upper = latest;

    while lower <= upper {
        let middle = lower + (upper - lower) / 2;
        let Some(timestamp) = chain.block_timestamp(middle).await? else {
            tracing::warn!(
                "Block {middle} not found while resolving timestamp {target}, \
                 stopping at block {lower}"
            );
            break;
        };
        if timestamp < target {
            lower = middle + 1;
        } else {
            if middle == 0 {
                break;
            }
            upper = middle - 1;
        }
    }

    Ok(lower)
}

/// Unix timestamp of midnight UTC on the given date.
pub fn day_start_timestamp(date: NaiveDate) -> u64 {
    date.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeChain;

    #[tokio::test]
    async fn finds_first_block_at_or_after_target() {
        let chain = FakeChain::with_timestamps(&[100, 200, 300, 400, 500]);
        assert_eq!(find_block_by_timestamp(&chain, 300).await.unwrap(), 2);
        assert_eq!(find_block_by_timestamp(&chain, 250).await.unwrap(), 2);
        assert_eq!(find_block_by_timestamp(&chain, 500).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn target_before_genesis_resolves_to_zero() {
        let chain = FakeChain::with_timestamps(&[100, 200, 300]);
        assert_eq!(find_block_by_timestamp(&chain, 50).await.unwrap(), 0);
        assert_eq!(find_block_by_timestamp(&chain, 100).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn target_after_latest_resolves_past_tip() {
        let chain = FakeChain::with_timestamps(&[100, 200, 300]);
        assert_eq!(find_block_by_timestamp(&chain, 301).await.unwrap(), 3);
        assert_eq!(find_block_by_timestamp(&chain, 9999).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn missing_block_stops_at_lower_bound() {
        let mut chain = FakeChain::with_timestamps(&[100, 200, 300, 400, 500]);
        chain.missing_blocks.insert(2);
        // The first probe hits the hole, so the search gives up at its
        // initial lower bound.
        assert_eq!(find_block_by_timestamp(&chain, 400).await.unwrap(), 0);
    }

    #[test]
    fn day_start_is_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(day_start_timestamp(date), 1_704_067_200);
    }
}

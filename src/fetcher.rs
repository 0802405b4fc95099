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

//! Walks a block range in fixed-size chunks, querying `Result` logs and
//! resolving each event's transaction sender.

use tokio::time::Duration;

use crate::{
    chain::Chain,
    records::{EventRecord, EventRecords},
    ServiceError,
};

/// Split `[from_block, to_block]` into consecutive closed intervals of at
/// most `chunk_size` blocks. Empty when `from_block > to_block`.
pub fn chunk_ranges(from_block: u64, to_block: u64, chunk_size: u64) -> Vec<(u64, u64)> {
    let mut ranges = Vec::new();
    let mut current = from_block;
    while current <= to_block {
        let end = (current + chunk_size - 1).min(to_block);
        ranges.push((current, end));
        current = end + 1;
    }
    ranges
}

#[derive(Clone, Debug)]
pub struct FetcherConfig {
    /// Blocks per log query.
    pub chunk_size: u64,
    /// Attempts per chunk before it is dropped.
    pub retries: u32,
    /// Pause between attempts.
    pub retry_delay: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self { chunk_size: 2000, retries: 3, retry_delay: Duration::from_secs(1) }
    }
}

pub struct EventFetcher<C> {
    pub chain: C,
    pub config: FetcherConfig,
}

impl<C: Chain> EventFetcher<C> {
    pub fn new(chain: C, config: FetcherConfig) -> Self {
        Self { chain, config }
    }

    /// Fetch all `Result` events in `[from_block, to_block]`, ordered by
    /// chunk. A chunk that keeps failing after the configured attempts is
    /// dropped with a warning rather than failing the whole range.
    pub async fn fetch_events(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> Result<EventRecords, ServiceError> {
        let mut records = Vec::new();
        for (start, end) in chunk_ranges(from_block, to_block, self.config.chunk_size) {
            tracing::info!("Querying blocks {start} to {end}");
            let mut attempt = 1;
            loop {
                match self.fetch_chunk(start, end).await {
                    Ok(chunk) => {
                        records.extend(chunk);
                        break;
                    }
                    Err(err) if attempt < self.config.retries => {
                        tracing::warn!(
                            "Attempt {attempt} failed for blocks {start} to {end}: {err}, \
                             retrying"
                        );
                        attempt += 1;
                        tokio::time::sleep(self.config.retry_delay).await;
                    }
                    Err(err) => {
                        tracing::warn!(
                            "Dropping blocks {start} to {end} after {} attempts: {err}",
                            self.config.retries
                        );
                        break;
                    }
                }
            }
        }
        Ok(EventRecords(records))
    }

    async fn fetch_chunk(&self, start: u64, end: u64) -> Result<Vec<EventRecord>, ServiceError> {
        let logs = self.chain.result_logs(start, end).await?;
        let mut records = Vec::with_capacity(logs.len());
        for log in logs {
            let Some(from) = self.chain.transaction_sender(log.tx_hash).await? else {
                tracing::warn!(
                    "Transaction not found for hash 0x{}, skipping event at block {}",
                    hex::encode(log.tx_hash),
                    log.block_number
                );
                continue;
            };
            records.push(EventRecord {
                block_number: log.block_number,
                tx_hash: log.tx_hash,
                from,
                index: log.index.to_string(),
                success: log.success,
                passthrough: log.passthrough.to_string(),
            });
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{address, FakeChain};

    fn test_config(chunk_size: u64) -> FetcherConfig {
        FetcherConfig { chunk_size, retries: 3, retry_delay: Duration::ZERO }
    }

    #[test]
    fn chunks_cover_range_exactly_once() {
        let ranges = chunk_ranges(0, 4999, 2000);
        assert_eq!(ranges, vec![(0, 1999), (2000, 3999), (4000, 4999)]);

        let mut next = 0;
        for (start, end) in &ranges {
            assert_eq!(*start, next);
            assert!(end >= start);
            next = end + 1;
        }
        assert_eq!(next, 5000);
    }

    #[test]
    fn degenerate_ranges() {
        assert_eq!(chunk_ranges(10, 10, 2000), vec![(10, 10)]);
        assert_eq!(chunk_ranges(5, 20, 100), vec![(5, 20)]);
        assert!(chunk_ranges(20, 5, 100).is_empty());
    }

    #[tokio::test]
    async fn retries_until_success() {
        let mut chain = FakeChain::with_timestamps(&[0; 10]);
        chain.add_event(3, 1, true, address(1));
        chain.fail_log_queries(2);

        let fetcher = EventFetcher::new(chain, test_config(2000));
        let records = fetcher.fetch_events(0, 9).await.unwrap();

        assert_eq!(records.0.len(), 1);
        assert_eq!(records.0[0].block_number, 3);
        assert_eq!(fetcher.chain.log_query_count(), 3);
    }

    #[tokio::test]
    async fn exhausted_chunk_is_dropped_but_later_chunks_survive() {
        let mut chain = FakeChain::with_timestamps(&[0; 10]);
        chain.add_event(2, 1, true, address(1));
        chain.add_event(7, 2, true, address(2));
        // Enough failures to exhaust the first chunk's three attempts.
        chain.fail_log_queries(3);

        let fetcher = EventFetcher::new(chain, test_config(5));
        let records = fetcher.fetch_events(0, 9).await.unwrap();

        assert_eq!(records.0.len(), 1);
        assert_eq!(records.0[0].block_number, 7);
        assert_eq!(records.0[0].from, address(2));
        assert_eq!(fetcher.chain.log_query_count(), 4);
    }

    #[tokio::test]
    async fn event_without_transaction_is_skipped() {
        let mut chain = FakeChain::with_timestamps(&[0; 10]);
        chain.add_event(1, 1, true, address(1));
        chain.add_event(2, 2, true, address(2));
        chain.senders.remove(&crate::test_utils::tx_hash(2));

        let fetcher = EventFetcher::new(chain, test_config(2000));
        let records = fetcher.fetch_events(0, 9).await.unwrap();

        assert_eq!(records.0.len(), 1);
        assert_eq!(records.0[0].from, address(1));
    }
}

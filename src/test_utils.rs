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

//! In-memory [`Chain`] fake and fixture helpers for tests.

use std::{
    collections::{HashMap, HashSet},
    sync::atomic::{AtomicU32, Ordering},
};

use alloy::primitives::{Address, B256, U256};
use anyhow::anyhow;
use async_trait::async_trait;

use crate::{
    chain::{Chain, ResultLog},
    ServiceError,
};

/// Deterministic test address carrying `n` in its low bytes, so numeric
/// order matches lexical order.
pub fn address(n: u64) -> Address {
    let mut bytes = [0u8; 20];
    bytes[12..].copy_from_slice(&n.to_be_bytes());
    Address::from(bytes)
}

/// Deterministic test transaction hash.
pub fn tx_hash(n: u64) -> B256 {
    B256::from(U256::from(n))
}

/// A chain backed by in-memory block timestamps, logs, and transactions.
#[derive(Debug, Default)]
pub struct FakeChain {
    /// Timestamp of block `i` at index `i`.
    pub timestamps: Vec<u64>,
    /// Blocks the node pretends not to have.
    pub missing_blocks: HashSet<u64>,
    pub logs: Vec<ResultLog>,
    pub senders: HashMap<B256, Address>,
    failures_remaining: AtomicU32,
    log_queries: AtomicU32,
}

impl FakeChain {
    pub fn with_timestamps(timestamps: &[u64]) -> Self {
        Self { timestamps: timestamps.to_vec(), ..Default::default() }
    }

    /// Make the next `n` log queries fail with a transient error.
    pub fn fail_log_queries(&self, n: u32) {
        self.failures_remaining.store(n, Ordering::SeqCst);
    }

    /// Total log queries issued, including failed ones.
    pub fn log_query_count(&self) -> u32 {
        self.log_queries.load(Ordering::SeqCst)
    }

    /// Record a `Result` event at `block_number` whose transaction was sent
    /// by `sender`. `seq` disambiguates the transaction hash.
    pub fn add_event(&mut self, block_number: u64, seq: u64, success: bool, sender: Address) {
        let hash = tx_hash(seq);
        self.logs.push(ResultLog {
            block_number,
            tx_hash: hash,
            index: U256::from(seq),
            success,
            passthrough: U256::ZERO,
        });
        self.senders.insert(hash, sender);
    }
}

#[async_trait]
impl Chain for FakeChain {
    async fn latest_block_number(&self) -> Result<u64, ServiceError> {
        Ok(self.timestamps.len().saturating_sub(1) as u64)
    }

    async fn block_timestamp(&self, block_number: u64) -> Result<Option<u64>, ServiceError> {
        if self.missing_blocks.contains(&block_number) {
            return Ok(None);
        }
        Ok(self.timestamps.get(block_number as usize).copied())
    }

    async fn result_logs(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<ResultLog>, ServiceError> {
        self.log_queries.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failures_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_remaining.store(remaining - 1, Ordering::SeqCst);
            return Err(ServiceError::Error(anyhow!("simulated transient RPC failure")));
        }
        Ok(self
            .logs
            .iter()
            .filter(|log| log.block_number >= from_block && log.block_number <= to_block)
            .cloned()
            .collect())
    }

    async fn transaction_sender(&self, tx_hash: B256) -> Result<Option<Address>, ServiceError> {
        Ok(self.senders.get(&tx_hash).copied())
    }
}

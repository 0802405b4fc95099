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

//! Chain access seam: the small set of node queries the pipeline needs,
//! behind a trait so tests can run without a network.

use alloy::{
    network::{Ethereum, TransactionResponse},
    primitives::{Address, B256, U256},
    providers::Provider,
    rpc::types::{BlockNumberOrTag, Filter},
    sol_types::SolEvent,
};
use async_trait::async_trait;

use crate::{contracts::IResultEmitter, ServiceError};

/// A decoded `Result` event log, paired with its onchain location.
#[derive(Clone, Debug)]
pub struct ResultLog {
    pub block_number: u64,
    pub tx_hash: B256,
    pub index: U256,
    pub success: bool,
    pub passthrough: U256,
}

/// Node queries required by the pipeline.
#[async_trait]
pub trait Chain {
    /// Number of the most recent block.
    async fn latest_block_number(&self) -> Result<u64, ServiceError>;

    /// Timestamp of the given block, or `None` if the node has no such block.
    async fn block_timestamp(&self, block_number: u64) -> Result<Option<u64>, ServiceError>;

    /// Decoded `Result` logs emitted by the contract in `[from_block, to_block]`.
    async fn result_logs(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<ResultLog>, ServiceError>;

    /// Sender of the given transaction, or `None` if the node has no such
    /// transaction.
    async fn transaction_sender(&self, tx_hash: B256) -> Result<Option<Address>, ServiceError>;
}

/// [`Chain`] implementation over an RPC provider.
#[derive(Clone)]
pub struct RpcChain<P> {
    pub provider: P,
    pub contract_address: Address,
}

impl<P> RpcChain<P> {
    pub fn new(provider: P, contract_address: Address) -> Self {
        Self { provider, contract_address }
    }
}

#[async_trait]
impl<P> Chain for RpcChain<P>
where
    P: Provider<Ethereum> + Send + Sync,
{
    async fn latest_block_number(&self) -> Result<u64, ServiceError> {
        Ok(self.provider.get_block_number().await?)
    }

    async fn block_timestamp(&self, block_number: u64) -> Result<Option<u64>, ServiceError> {
        let block =
            self.provider.get_block_by_number(BlockNumberOrTag::Number(block_number)).await?;
        Ok(block.map(|b| b.header.timestamp))
    }

    async fn result_logs(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<ResultLog>, ServiceError> {
        let filter = Filter::new()
            .address(self.contract_address)
            .event_signature(IResultEmitter::Result::SIGNATURE_HASH)
            .from_block(from_block)
            .to_block(to_block);

        let logs = self.provider.get_logs(&filter).await?;

        let mut results = Vec::with_capacity(logs.len());
        for log in logs {
            let (Some(block_number), Some(tx_hash)) =
                (log.block_number, log.transaction_hash)
            else {
                tracing::warn!("Skipping pending log without block number or tx hash");
                continue;
            };
            let decoded = match log.log_decode::<IResultEmitter::Result>() {
                Ok(decoded) => decoded.inner.data,
                Err(err) => {
                    tracing::warn!(
                        "Failed to decode Result log in tx 0x{}: {err}",
                        hex::encode(tx_hash)
                    );
                    continue;
                }
            };
            results.push(ResultLog {
                block_number,
                tx_hash,
                index: decoded.index,
                success: decoded.success,
                passthrough: decoded.passthrough,
            });
        }
        Ok(results)
    }

    async fn transaction_sender(&self, tx_hash: B256) -> Result<Option<Address>, ServiceError> {
        let tx = self.provider.get_transaction_by_hash(tx_hash).await?;
        Ok(tx.map(|tx| tx.from()))
    }
}

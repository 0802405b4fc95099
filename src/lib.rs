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

//! Indexes `Result` events emitted by a contract over a block window and
//! distributes a points budget proportionally to per-sender success counts.

use alloy::transports::{RpcError, TransportErrorKind};
use thiserror::Error;

pub mod block_time;
pub mod chain;
pub mod contracts;
pub mod fetcher;
pub mod points;
pub mod records;
pub mod stats;
pub mod test_utils;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError<TransportErrorKind>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No valid stats rows found")]
    EmptyStats,

    #[error("Error: {0}")]
    Error(#[from] anyhow::Error),
}

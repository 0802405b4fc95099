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

use std::path::PathBuf;

use alloy::{primitives::Address, providers::ProviderBuilder};
use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::Parser;
use points_indexer::{
    block_time::{day_start_timestamp, find_block_by_timestamp},
    chain::RpcChain,
    fetcher::{EventFetcher, FetcherConfig},
    stats::aggregate,
};
use tokio::time::Duration;
use url::Url;

/// Arguments of the points indexer.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct MainArgs {
    /// URL of the Ethereum RPC endpoint.
    #[clap(short, long, env)]
    rpc_url: Url,
    /// Address of the contract emitting Result events.
    #[clap(short, long, env)]
    contract_address: Address,
    /// First day of the window (inclusive), as YYYY-MM-DD.
    #[clap(long)]
    from_date: NaiveDate,
    /// Last day of the window (inclusive), as YYYY-MM-DD.
    #[clap(long)]
    to_date: NaiveDate,
    /// Blocks per log query.
    #[clap(long, default_value = "2000")]
    chunk_size: u64,
    /// Attempts per chunk before it is dropped.
    #[clap(long, default_value = "3")]
    retries: u32,
    /// Seconds to wait between attempts.
    #[clap(long, default_value = "1")]
    retry_delay: u64,
    /// Directory for event and stats artifacts.
    #[clap(short, long, default_value = "out")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment variables from {:?}", path),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => bail!("failed to load .env file: {}", e),
    }

    let args = match MainArgs::try_parse() {
        Ok(args) => args,
        Err(err) => {
            err.print()?;
            std::process::exit(1);
        }
    };

    run(&args).await?;

    Ok(())
}

async fn run(args: &MainArgs) -> Result<()> {
    if args.to_date < args.from_date {
        bail!("to-date {} is before from-date {}", args.to_date, args.from_date);
    }

    let provider = ProviderBuilder::new().on_http(args.rpc_url.clone());
    let chain = RpcChain::new(provider, args.contract_address);

    let from_block = find_block_by_timestamp(&chain, day_start_timestamp(args.from_date)).await?;
    let to_block = find_block_by_timestamp(&chain, day_start_timestamp(args.to_date)).await?;
    tracing::info!(
        "Resolved {} to block {from_block} and {} to block {to_block}",
        args.from_date,
        args.to_date
    );

    let fetcher = EventFetcher::new(
        chain,
        FetcherConfig {
            chunk_size: args.chunk_size,
            retries: args.retries,
            retry_delay: Duration::from_secs(args.retry_delay),
        },
    );
    let records = fetcher.fetch_events(from_block, to_block).await?;
    tracing::info!("Fetched {} events in blocks {from_block} to {to_block}", records.0.len());

    std::fs::create_dir_all(&args.out_dir)?;
    let stem =
        format!("{}_to_{}", args.from_date.format("%m%d"), args.to_date.format("%m%d"));

    let events_json = args.out_dir.join(format!("{stem}_events.json"));
    let events_csv = args.out_dir.join(format!("{stem}_events.csv"));
    records.write_json(&events_json)?;
    records.write_csv(&events_csv)?;
    tracing::info!("Wrote events to {} and {}", events_json.display(), events_csv.display());

    let counts = aggregate(&records.0);
    let stats_json = args.out_dir.join(format!("{stem}_stats.json"));
    let stats_csv = args.out_dir.join(format!("{stem}_stats.csv"));
    counts.write_json(&stats_json)?;
    counts.write_csv(&stats_csv)?;
    tracing::info!(
        "Wrote success counts for {} addresses to {} and {}",
        counts.0.len(),
        stats_json.display(),
        stats_csv.display()
    );

    Ok(())
}

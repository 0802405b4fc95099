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

use anyhow::Result;
use clap::Parser;
use points_indexer::points::distribute;

/// Allocates a points budget proportionally to the success counts found in a
/// stats directory.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct MainArgs {
    /// Directory containing *stats.csv files.
    #[clap(short, long)]
    stats_dir: PathBuf,
    /// Total points budget to allocate.
    #[clap(short, long)]
    total_points: u64,
    /// Output file, defaults to points_distribution.csv in the stats
    /// directory.
    #[clap(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = match MainArgs::try_parse() {
        Ok(args) => args,
        Err(err) => {
            err.print()?;
            std::process::exit(1);
        }
    };

    run(&args)
}

fn run(args: &MainArgs) -> Result<()> {
    let allocations = distribute(&args.stats_dir, args.total_points)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.stats_dir.join("points_distribution.csv"));
    allocations.write_csv(&output)?;

    tracing::info!(
        "Allocated {} of {} points across {} addresses, wrote {}",
        allocations.total_allocated(),
        args.total_points,
        allocations.0.len(),
        output.display()
    );

    Ok(())
}

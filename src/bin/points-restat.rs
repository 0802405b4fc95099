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
use points_indexer::{records::EventRecords, stats::aggregate};

/// Re-derives success counts from a persisted events file, without touching
/// the chain.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct MainArgs {
    /// Events file to read, JSON or CSV.
    #[clap(short, long)]
    events_file: PathBuf,
    /// Directory for stats artifacts.
    #[clap(short, long, default_value = "out")]
    out_dir: PathBuf,
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
    let records = EventRecords::from_file(&args.events_file)?;
    tracing::info!("Read {} events from {}", records.0.len(), args.events_file.display());

    let counts = aggregate(&records.0);

    let stem = args
        .events_file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(|stem| stem.trim_end_matches("_events"))
        .unwrap_or("restat");

    std::fs::create_dir_all(&args.out_dir)?;
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

// Copyright 2025 Fernando Borretti
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

use std::env::current_dir;
use std::path::PathBuf;

use clap::Parser;

use crate::check::check_deck;
use crate::check::print_report;
use crate::error::Fallible;
use crate::error::fail;
use crate::stats::print_deck_stats;
use crate::web::server::start_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Study the deck in the browser.
    Study {
        /// Optional path to the deck directory.
        directory: Option<String>,
        /// Port to serve on, overriding the deck configuration.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Check the deck for missing and orphaned media files.
    Check {
        /// Optional path to the deck directory.
        directory: Option<String>,
    },
    /// Print deck statistics as JSON.
    Stats {
        /// Optional path to the deck directory.
        directory: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Study { directory, port } => {
            let directory = resolve_directory(directory)?;
            start_server(directory, port).await
        }
        Command::Check { directory } => {
            let directory = resolve_directory(directory)?;
            let report = check_deck(&directory)?;
            print_report(&report);
            if report.is_clean() {
                Ok(())
            } else {
                fail("deck check failed.")
            }
        }
        Command::Stats { directory } => {
            let directory = resolve_directory(directory)?;
            print_deck_stats(&directory)
        }
    }
}

fn resolve_directory(directory: Option<String>) -> Fallible<PathBuf> {
    match directory {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => Ok(current_dir()?),
    }
}

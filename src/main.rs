/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use clap::Parser;
use tablut::{Cli, Engine};

fn main() {
    let cli = Cli::parse();

    // `RUST_LOG` takes precedence over the verbosity flags
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let mut engine = match Engine::from_cli(&cli) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{} failed to start: {e:#}", env!("CARGO_PKG_NAME"));
            std::process::exit(2);
        }
    };

    if let Err(e) = engine.run() {
        eprintln!("{} encountered an error: {e:#}", env!("CARGO_PKG_NAME"));
    }
}

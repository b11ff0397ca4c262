/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{io, process::ExitCode};

use clap::{error::ErrorKind, Parser};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use tsume::Cli;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,

        // Edge case: `--help` and `--version` are both "error" cases according to Clap
        Err(e)
            if matches!(e.kind(), ErrorKind::DisplayHelp)
                || matches!(e.kind(), ErrorKind::DisplayVersion) =>
        {
            println!("{e}");
            return ExitCode::SUCCESS;
        }

        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = TermLogger::init(
        cli.log_level(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to initialize logging: {e}");
    }

    if let Err(e) = cli.run(&mut io::stdout().lock()) {
        eprintln!("{} encountered an error: {e:#}", env!("CARGO_PKG_NAME"));
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

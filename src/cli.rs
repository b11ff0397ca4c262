/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::io::Write;

use anyhow::Result;
use clap::{builder::PossibleValue, ArgAction, Parser, ValueEnum};
use log::{info, warn, LevelFilter};

use crate::{Problem, Search, SearchConfig};

/// Solve a built-in tsume (forced mate) problem by exhaustive search.
#[derive(Debug, Clone, Parser)]
#[command(
    version,
    about,
    override_usage("tsume <PROBLEM_ID> <MAX_MOVES> [DISPLAY]"),
    after_help = "DISPLAY means 1: only the problem, 2: the problem and its answer, 3: the problem, the full search, and the answer."
)]
pub struct Cli {
    /// The problem to solve, from 1 to 6. Any other id selects problem 6.
    pub problem: u32,

    /// Number of plies to search. A mate in `n` needs at least `n + 2`.
    pub max_moves: usize,

    /// What to print.
    #[arg(default_value = "2")]
    pub display: DisplayMode,

    /// Prune every line as soon as it is explored, instead of once the search is done.
    ///
    /// Uses far less memory, but the full search can no longer be shown.
    #[arg(long, default_value = "false")]
    pub prune_eagerly: bool,

    /// Log more information to stderr. Can be repeated.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// How much of a solve to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DisplayMode {
    /// Only the problem's position.
    Problem,

    /// The position and the answer tree.
    Answer,

    /// The position, every line explored, and the answer tree.
    Trace,
}

impl ValueEnum for DisplayMode {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Problem, Self::Answer, Self::Trace]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        // Modes are chosen by number, but their names are accepted as well
        let value = match self {
            Self::Problem => PossibleValue::new("1").alias("problem"),
            Self::Answer => PossibleValue::new("2").alias("answer"),
            Self::Trace => PossibleValue::new("3").aliases(["trace", "full"]),
        };

        Some(value.help(format!("{self:?}")))
    }
}

impl Cli {
    /// The log level requested by the `-v` flags.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// The search configuration requested by these arguments.
    #[inline(always)]
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            max_depth: self.max_moves,
            prune_eagerly: self.prune_eagerly,
        }
    }

    /// Prints the selected problem, then solves and prints it as requested, to `out`.
    pub fn run(&self, out: &mut impl Write) -> Result<()> {
        let problem = Problem::by_id(self.problem);
        info!("Problem {}: {}", problem.id, problem.description);

        let position = problem.position()?;
        writeln!(out, "{position}")?;
        writeln!(out)?;

        if self.display == DisplayMode::Problem {
            return Ok(());
        }

        if self.prune_eagerly && self.display == DisplayMode::Trace {
            warn!("Lines are pruned during the search, so the full search shown is already pruned");
        }

        let mut tree = Search::new(self.search_config()).start(&position)?.tree;

        if self.display == DisplayMode::Trace {
            writeln!(out, "---------- FullResult ----------")?;
            write!(out, "{tree}")?;
        }

        if !tree.prune() {
            info!("No forced mate within {} plies", self.max_moves);
        }

        writeln!(out, "---------- Answer ----------")?;
        write!(out, "{tree}")?;

        Ok(())
    }
}

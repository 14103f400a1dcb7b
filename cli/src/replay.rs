use anyhow::Context;
use clap::Args;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use sweepbench_core::{Board, BoardOptions, BoardSnapshot, Phase, ReplayStats, replay};

use crate::utils::json_files;

#[derive(Args, Debug)]
pub(crate) struct ReplayArgs {
    /// Directory holding the boards the games were played on
    #[arg(long)]
    data_dir: PathBuf,

    /// Directory holding one result file per board, matched by file name
    #[arg(long)]
    result_dir: PathBuf,

    /// Count a game as won once every safe cell is open, flags or not
    #[arg(long)]
    lenient: bool,
}

/// Only the action history of a stored result is needed to replay it.
#[derive(Deserialize, Debug)]
struct GameResult {
    action_history: Vec<String>,
}

pub(crate) fn run(args: &ReplayArgs) -> anyhow::Result<()> {
    let options = if args.lenient {
        BoardOptions::default()
    } else {
        BoardOptions::strict()
    };
    let mut stats = ReplayStats::default();

    for result_path in json_files(&args.result_dir)? {
        let Some(file_name) = result_path.file_name() else {
            continue;
        };
        let board_path = args.data_dir.join(file_name);

        let json = fs::read_to_string(&result_path)
            .with_context(|| format!("Could not read {}", result_path.display()))?;
        let result: GameResult = serde_json::from_str(&json)
            .with_context(|| format!("Could not parse {}", result_path.display()))?;
        let snapshot = BoardSnapshot::load(&board_path)
            .with_context(|| format!("Could not load {}", board_path.display()))?;

        let mut board = Board::from_snapshot(&snapshot, options.clone(), false)?;
        let feedback = replay(&mut board, &result.action_history)
            .with_context(|| format!("Could not replay {}", result_path.display()))?;

        if board.phase() == Phase::Won {
            log::info!("Board {} solved!", board_path.display());
        }
        stats.record(&board, &result.action_history, &feedback);
    }

    for line in stats.to_string().lines() {
        log::info!("{}", line);
    }
    Ok(())
}

use anyhow::Context;
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::Value;
use std::path::PathBuf;
use sweepbench_core::{Board, BoardSnapshot, replay_prefix};

use crate::options::BoardArgs;
use crate::utils::{init_dir, json_files};

#[derive(Args, Debug)]
pub(crate) struct SampleArgs {
    /// Directory of stored boards carrying an action history
    #[arg(long)]
    data_dir: PathBuf,

    /// Where the cut boards are written, one file per input
    #[arg(long)]
    output_dir: PathBuf,

    /// Seed for picking the cut points
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Replace files already present in the output directory
    #[arg(long)]
    overwrite: bool,

    #[command(flatten)]
    pub(crate) board: BoardArgs,
}

pub(crate) fn run(args: &SampleArgs) -> anyhow::Result<()> {
    init_dir(&args.output_dir, false)?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut written = 0;

    for board_path in json_files(&args.data_dir)? {
        let Some(file_name) = board_path.file_name() else {
            continue;
        };
        let output_path = args.output_dir.join(file_name);
        if output_path.exists() && !args.overwrite {
            log::warn!("{} already exists, skipping", output_path.display());
            continue;
        }

        let snapshot = BoardSnapshot::load(&board_path)
            .with_context(|| format!("Could not load {}", board_path.display()))?;
        let history = snapshot.action_history.clone().unwrap_or_default();
        if history.is_empty() {
            log::warn!("{} has no action history, skipping", board_path.display());
            continue;
        }

        let n_actions = rng.random_range(0..history.len()).max(1);
        let mut board = Board::from_snapshot(&snapshot, args.board.board_options(), false)?;
        let sample = replay_prefix(&mut board, &history, n_actions)
            .with_context(|| format!("Could not replay {}", board_path.display()))?;
        log::debug!(
            "{}: cut after {} of {} actions",
            board_path.display(),
            sample.n_actions,
            history.len()
        );

        snapshot
            .with_attribute("n_actions", sample.n_actions)
            .with_attribute(
                "board_at_n_actions",
                sample.board.map_or(Value::Null, Value::from),
            )
            .save(&output_path)
            .with_context(|| format!("Could not write {}", output_path.display()))?;
        written += 1;
    }

    log::info!("Wrote {} samples into {}", written, args.output_dir.display());
    Ok(())
}

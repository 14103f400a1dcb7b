use anyhow::Context;
use clap::Args;
use std::path::PathBuf;
use sweepbench_core::{BatchGenerator, CellCount, Coord, GameConfig, RevealBucket};

use crate::options::BoardArgs;
use crate::utils::init_dir;

#[derive(Args, Debug)]
pub(crate) struct GenerateArgs {
    #[arg(long, default_value_t = 9)]
    rows: Coord,

    #[arg(long, default_value_t = 9)]
    cols: Coord,

    #[arg(long, default_value_t = 10)]
    mines: CellCount,

    /// Number of seeds to try, starting from 0
    #[arg(long, default_value_t = 1000)]
    boards: u64,

    /// Boards land in `<output-dir>/<rows>x<cols>-<mines>/<bucket>/`
    #[arg(long, default_value = "data")]
    output_dir: PathBuf,

    /// Empty the bucket directories before writing
    #[arg(long)]
    overwrite: bool,

    #[command(flatten)]
    board: BoardArgs,
}

pub(crate) fn run(args: &GenerateArgs) -> anyhow::Result<()> {
    let config = GameConfig::new((args.rows, args.cols), args.mines)?;
    let generator = BatchGenerator::new(config, args.board.board_options())?;

    let root = args
        .output_dir
        .join(format!("{}x{}-{}", args.rows, args.cols, args.mines));
    for bucket in RevealBucket::ALL {
        init_dir(&root.join(bucket.dir_name()), args.overwrite)?;
    }

    log::info!(
        "Generating {}x{} boards with {} mines from {} seeds",
        args.rows,
        args.cols,
        args.mines,
        args.boards
    );
    let boards = generator.generate(0..args.boards)?;

    for generated in &boards {
        let path = root
            .join(generated.bucket.dir_name())
            .join(generated.file_name());
        generated
            .snapshot()?
            .save(&path)
            .with_context(|| format!("Could not write {}", path.display()))?;
        log::debug!("Wrote {}", path.display());
    }

    for bucket in RevealBucket::ALL {
        let count = boards.iter().filter(|board| board.bucket == bucket).count();
        log::info!("{}: {} boards", bucket, count);
    }
    log::info!(
        "Generated {} unique boards out of {} seeds into {}",
        boards.len(),
        args.boards,
        root.display()
    );
    Ok(())
}

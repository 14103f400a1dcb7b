use anyhow::Context;
use clap::Args;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use sweepbench_core::{Board, BoardSnapshot, CellCount, Coord, Feedback, GameConfig, GameError};

use crate::options::BoardArgs;

#[derive(Args, Debug)]
pub(crate) struct PlayArgs {
    /// Stored board to play instead of a freshly seeded one
    #[arg(long)]
    board_file: Option<PathBuf>,

    #[arg(long, default_value_t = 9)]
    rows: Coord,

    #[arg(long, default_value_t = 9)]
    cols: Coord,

    #[arg(long, default_value_t = 10)]
    mines: CellCount,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Print the board as `(row,col): symbol` lines instead of a table
    #[arg(long)]
    coordinates: bool,

    /// Leave row and column indices out of the table
    #[arg(long)]
    no_indices: bool,

    /// Stop after this many well-formed actions
    #[arg(long, default_value_t = 100)]
    max_steps: usize,

    /// Write the board and its action history here when the session ends
    #[arg(long)]
    save: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) board: BoardArgs,
}

fn render(board: &Board, args: &PlayArgs) -> String {
    if args.coordinates {
        board.to_coordinate_map()
    } else {
        board.to_table(!args.no_indices)
    }
}

/// Applies one action per input line until the game ends, `max_steps`
/// well-formed actions were played, or input runs out. Lines without an
/// action are answered with a hint and do not count as steps.
fn play_lines(
    board: &mut Board,
    input: impl BufRead,
    output: &mut impl Write,
    args: &PlayArgs,
) -> anyhow::Result<usize> {
    writeln!(output, "{}", render(board, args))?;
    writeln!(output, "Enter an action as L(row,col), R(row,col) or M(row,col), 1-based.")?;

    let mut steps = 0;
    for line in input.lines() {
        let line = line?;
        let feedback = match board.apply_str(&line) {
            Ok(feedback) => feedback,
            Err(GameError::MalformedAction(input)) => {
                log::warn!("Could not parse an action from {:?}", input);
                writeln!(output, "No action found, use L(row,col), R(row,col) or M(row,col).")?;
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        steps += 1;

        if feedback != Feedback::Success {
            writeln!(output, "{}", feedback.describe(&board.options().symbols))?;
        }
        writeln!(output, "{}", render(board, args))?;

        if feedback.is_terminal() {
            break;
        }
        if steps >= args.max_steps {
            log::info!("Reached {} steps, stopping", args.max_steps);
            break;
        }
    }
    Ok(steps)
}

pub(crate) fn run(args: &PlayArgs) -> anyhow::Result<()> {
    let options = args.board.board_options();
    let mut board = match &args.board_file {
        Some(path) => {
            let snapshot = BoardSnapshot::load(path)
                .with_context(|| format!("Could not load {}", path.display()))?;
            Board::from_snapshot(&snapshot, options, false)?
        }
        None => {
            let config = GameConfig::new((args.rows, args.cols), args.mines)?;
            Board::new(config, args.seed, options)?
        }
    };

    let stdout = io::stdout();
    let steps = play_lines(&mut board, io::stdin().lock(), &mut stdout.lock(), args)?;

    log::info!(
        "Finished in phase {:?} after {} actions, {} cells revealed",
        board.phase(),
        steps,
        board.revealed_count()
    );

    if let Some(path) = &args.save {
        match board.to_snapshot() {
            Ok(snapshot) => snapshot
                .with_action_history(board.action_log().to_vec())
                .save(path)
                .with_context(|| format!("Could not write {}", path.display()))?,
            Err(GameError::MinesNotPlaced) => {
                log::warn!("No action opened a cell, nothing to save");
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use sweepbench_core::{BoardOptions, MineLayout};

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        play: PlayArgs,
    }

    fn args(extra: &[&str]) -> PlayArgs {
        let argv: Vec<&str> = ["play"].into_iter().chain(extra.iter().copied()).collect();
        Cli::parse_from(argv).play
    }

    fn board(size: (u8, u8), mines: &[(u8, u8)]) -> Board {
        let layout = MineLayout::from_mine_coords(size, mines).unwrap();
        Board::with_layout(layout, 0, BoardOptions::default())
    }

    fn play(board: &mut Board, input: &str, args: &PlayArgs) -> (usize, String) {
        let mut output = Vec::new();
        let steps = play_lines(board, input.as_bytes(), &mut output, args).unwrap();
        (steps, String::from_utf8(output).unwrap())
    }

    #[test]
    fn malformed_lines_are_answered_and_not_counted() {
        let mut board = board((3, 5), &[(0, 4), (2, 4)]);

        let (steps, output) = play(&mut board, "open something\nL(1,1)\n", &args(&[]));

        assert_eq!(steps, 1);
        assert!(output.contains("No action found"));
        assert_eq!(board.action_log(), ["L(1,1)"]);
    }

    #[test]
    fn stops_after_max_steps() {
        let mut board = board((3, 5), &[(0, 4), (2, 4)]);

        let (steps, output) = play(&mut board, "R(1,1)\nR(1,1)\nR(1,1)\n", &args(&["--max-steps", "2"]));

        assert_eq!(steps, 2);
        assert_eq!(board.action_log().len(), 2);
        assert!(output.contains(Feedback::FlagBeforeReveal.message()));
    }

    #[test]
    fn stops_once_the_game_is_over() {
        let mut board = board((2, 1), &[(0, 0)]);

        let (steps, output) = play(&mut board, "L(2,1)\nL(1,1)\n", &args(&["--coordinates"]));

        assert_eq!(steps, 1);
        assert!(output.contains(Feedback::Won.message()));
        assert!(output.contains("(2,1): 1"));
        assert_eq!(board.action_log(), ["L(2,1)"]);
    }
}

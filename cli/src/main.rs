use clap::{Parser, Subcommand};

mod generate;
mod options;
mod play;
mod replay;
mod sample;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a dataset of opened boards, bucketed by revealed cells
    Generate(generate::GenerateArgs),
    /// Play a board interactively, one action per line on stdin
    Play(play::PlayArgs),
    /// Replay stored action histories and report statistics
    Replay(replay::ReplayArgs),
    /// Cut stored games at a random point and record the board there
    Sample(sample::SampleArgs),
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    match args.command {
        Command::Generate(args) => generate::run(&args),
        Command::Play(args) => play::run(&args),
        Command::Replay(args) => replay::run(&args),
        Command::Sample(args) => sample::run(&args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use sweepbench_core::WinCondition;

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn play_defaults_to_lenient_beginner_board() {
        let args = Args::try_parse_from(["sweepbench", "play"]).unwrap();
        let Command::Play(play) = args.command else {
            panic!("expected play");
        };
        let options = play.board.board_options();
        assert_eq!(options.win_condition, WinCondition::Lenient);
        assert_eq!(options.symbols.unopened, '?');
    }

    #[test]
    fn board_flags_reach_options() {
        let args = Args::try_parse_from([
            "sweepbench",
            "sample",
            "--data-dir",
            "in",
            "--output-dir",
            "out",
            "--strict",
            "--flag-symbol",
            "!",
        ])
        .unwrap();
        let Command::Sample(sample) = args.command else {
            panic!("expected sample");
        };
        let options = sample.board.board_options();
        assert_eq!(options.win_condition, WinCondition::Strict);
        assert_eq!(options.symbols.flag, '!');
    }
}

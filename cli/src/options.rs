use clap::Args;
use sweepbench_core::{BoardOptions, Symbols, WinCondition};

/// Rules and symbols shared by every subcommand that builds a board.
#[derive(Args, Debug, Clone)]
pub(crate) struct BoardArgs {
    /// Only win once every mine is flagged and nothing else is
    #[arg(long)]
    pub strict: bool,

    /// Symbol drawn for unopened cells
    #[arg(long, default_value_t = Symbols::default().unopened)]
    pub unopened_symbol: char,

    /// Symbol drawn for flagged cells
    #[arg(long, default_value_t = Symbols::default().flag)]
    pub flag_symbol: char,

    /// Symbol drawn for opened cells without adjacent mines
    #[arg(long, default_value_t = Symbols::default().blank)]
    pub blank_symbol: char,
}

impl BoardArgs {
    pub fn board_options(&self) -> BoardOptions {
        BoardOptions {
            win_condition: if self.strict {
                WinCondition::Strict
            } else {
                WinCondition::Lenient
            },
            symbols: Symbols {
                unopened: self.unopened_symbol,
                flag: self.flag_symbol,
                blank: self.blank_symbol,
            },
        }
    }
}

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::Symbols;

/// Outcome of a single action, valid or not.
///
/// Rejections are ordinary outcomes, the engine never fails on a well-formed
/// action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feedback {
    Success,
    UnknownCell,
    RevealFlagged,
    RevealBlank,
    RevealDigit,
    FlagDigit,
    FlagBlank,
    ChordUnopened,
    ChordFlagged,
    ChordBlank,
    ChordNoFlags,
    ChordCountMismatch,
    FlagBeforeReveal,
    ChordBeforeReveal,
    Lost,
    Won,
}

impl Feedback {
    /// Whether the action was accepted by the board.
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Success | Self::Won | Self::Lost)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn message(self) -> &'static str {
        use Feedback::*;
        match self {
            Success => "Action successful!",
            Won => "Congratulations, you've won the game!",
            Lost => "Game over. Better luck next time!",
            UnknownCell => "Invalid coordinates! The targeted cell is outside the board.",
            RevealBlank => "Invalid action: cannot reveal a blank cell, reveal is only for unopened cells.",
            RevealFlagged => "Invalid action: cannot reveal a flagged cell, reveal is only for unopened cells.",
            RevealDigit => "Invalid action: cannot reveal a numbered cell, reveal is only for unopened cells.",
            ChordBlank => "Invalid action: cannot chord a blank cell, chord is only for numbered cells.",
            ChordFlagged => "Invalid action: cannot chord a flagged cell, chord is only for numbered cells.",
            ChordUnopened => "Invalid action: cannot chord an unopened cell, chord is only for numbered cells.",
            FlagBlank => "Invalid action: cannot flag a blank cell, flag is only for unopened or flagged cells.",
            FlagDigit => "Invalid action: cannot flag a numbered cell, flag is only for unopened or flagged cells.",
            ChordNoFlags => "Error: no flagged cells nearby. Flag adjacent mines before chording.",
            ChordCountMismatch => "Error: flag count mismatch. Flag all adjacent mines before chording.",
            FlagBeforeReveal | ChordBeforeReveal => "Please begin by revealing a cell.",
        }
    }

    /// Like [`Feedback::message`], but rejections name the symbols of the
    /// cells the action is meant for.
    pub fn describe(self, symbols: &Symbols) -> String {
        use Feedback::*;
        let target = match self {
            RevealBlank | FlagBlank | ChordBlank => "a blank",
            RevealFlagged | ChordFlagged => "a flagged",
            RevealDigit | FlagDigit => "a numbered",
            ChordUnopened => "an unopened",
            _ => return self.message().to_owned(),
        };
        match self {
            RevealBlank | RevealFlagged | RevealDigit => format!(
                "Invalid action: cannot reveal {target} cell, reveal is only for unopened cells (`{}').",
                symbols.unopened
            ),
            FlagBlank | FlagDigit => format!(
                "Invalid action: cannot flag {target} cell, flag is only for unopened (`{}') or flagged cells (`{}').",
                symbols.unopened, symbols.flag
            ),
            _ => format!(
                "Invalid action: cannot chord {target} cell, chord is only for numbered cells (`1'-`8')."
            ),
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_accepted_outcomes_are_valid() {
        assert!(Feedback::Success.is_valid());
        assert!(Feedback::Lost.is_valid());
        assert!(Feedback::Won.is_valid());
        assert!(!Feedback::ChordCountMismatch.is_valid());
        assert!(!Feedback::UnknownCell.is_valid());
    }

    #[test]
    fn rejections_name_configured_symbols() {
        let symbols = Symbols {
            unopened: '#',
            flag: '!',
            blank: ' ',
        };

        assert_eq!(
            Feedback::RevealFlagged.describe(&symbols),
            "Invalid action: cannot reveal a flagged cell, reveal is only for unopened cells (`#')."
        );
        assert!(Feedback::FlagDigit.describe(&symbols).ends_with("(`#') or flagged cells (`!')."));
        assert!(Feedback::ChordUnopened.describe(&symbols).contains("cannot chord an unopened cell"));
        assert_eq!(Feedback::Won.describe(&symbols), Feedback::Won.message());
    }

    #[test]
    fn terminal_outcomes() {
        assert!(Feedback::Won.is_terminal());
        assert!(Feedback::Lost.is_terminal());
        assert!(!Feedback::Success.is_terminal());
    }
}

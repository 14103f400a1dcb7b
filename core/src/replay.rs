use core::fmt;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// Drives `board` through a stored action history, one feedback per action.
///
/// The same board and history always yield the same feedback sequence.
pub fn replay<S: AsRef<str>>(board: &mut Board, history: &[S]) -> Result<Vec<Feedback>> {
    history
        .iter()
        .map(|action| board.apply_str(action.as_ref()))
        .collect()
}

/// Board as it looked partway through a stored game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSample {
    /// Actions replayed, including the one that lost the game if any.
    pub n_actions: usize,
    /// Rendering after the last action that did not lose the game.
    pub board: Option<String>,
}

/// Replays at most `n_actions` actions, stopping at the first loss.
pub fn replay_prefix<S: AsRef<str>>(
    board: &mut Board,
    history: &[S],
    n_actions: usize,
) -> Result<ProgressSample> {
    let mut sample = ProgressSample {
        n_actions: n_actions.min(history.len()),
        board: None,
    };

    for (index, action) in history.iter().take(n_actions).enumerate() {
        if board.apply_str(action.as_ref())? == Feedback::Lost {
            sample.n_actions = index + 1;
            break;
        }
        sample.board = Some(board.to_string());
    }

    Ok(sample)
}

/// Aggregate statistics over replayed games.
///
/// The first action of every history is a sentinel and is left out of the
/// per-action counts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayStats {
    pub boards: usize,
    pub actions: usize,
    pub valid_actions: usize,
    pub repeated_actions: usize,
    pub wins: usize,
    pub game_overs: usize,
    pub flagged_mines: usize,
    pub total_mines: usize,
}

impl ReplayStats {
    /// Adds one finished replay: the board after replay, its history and the
    /// feedback returned for each action.
    pub fn record<S: AsRef<str>>(&mut self, board: &Board, history: &[S], feedback: &[Feedback]) {
        for &outcome in feedback.iter().skip(1) {
            if outcome.is_valid() {
                self.valid_actions += 1;
            }
            match outcome {
                Feedback::Won => self.wins += 1,
                Feedback::Lost => self.game_overs += 1,
                _ => {}
            }
        }

        let unique: HashSet<&str> = history.iter().map(|action| action.as_ref()).collect();
        self.actions += history.len().saturating_sub(1);
        self.repeated_actions += history.len() - unique.len();
        self.boards += 1;
        self.flagged_mines += usize::from(board.correctly_flagged_mines());
        self.total_mines += usize::from(board.config().mines);
    }

    pub fn valid_ratio(&self) -> f64 {
        ratio(self.valid_actions, self.actions)
    }

    pub fn repeat_ratio(&self) -> f64 {
        ratio(self.repeated_actions, self.actions)
    }

    pub fn win_ratio(&self) -> f64 {
        ratio(self.wins, self.boards)
    }

    pub fn game_over_ratio(&self) -> f64 {
        ratio(self.game_overs, self.boards)
    }

    pub fn flagged_ratio(&self) -> f64 {
        ratio(self.flagged_mines, self.total_mines)
    }
}

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

impl fmt::Display for ReplayStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total number of actions: {}", self.actions)?;
        writeln!(
            f,
            "Total number of valid actions: {}, ratio: {:.3}",
            self.valid_actions,
            self.valid_ratio()
        )?;
        writeln!(
            f,
            "Total number of repeated actions: {}, ratio: {:.3}",
            self.repeated_actions,
            self.repeat_ratio()
        )?;
        writeln!(f, "Total number of wins: {}, ratio: {:.3}", self.wins, self.win_ratio())?;
        writeln!(
            f,
            "Total number of game overs: {}, ratio: {:.3}",
            self.game_overs,
            self.game_over_ratio()
        )?;
        writeln!(f, "Total number of boards: {}", self.boards)?;
        write!(
            f,
            "Total number of flagged mines: {}, ratio: {:.3}",
            self.flagged_mines,
            self.flagged_ratio()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        let layout = MineLayout::from_mine_coords((3, 5), &[(0, 4), (2, 4)]).unwrap();
        Board::with_layout(layout, 0, BoardOptions::strict())
    }

    #[test]
    fn replay_reports_feedback_per_action() {
        let history = ["L(1,1)", "L(1,1)", "R(1,5)", "R(3,5)"];

        let feedback = replay(&mut board(), &history).unwrap();

        assert_eq!(
            feedback,
            vec![
                Feedback::Success,
                Feedback::RevealBlank,
                Feedback::Success,
                Feedback::Won
            ]
        );
    }

    #[test]
    fn replay_stops_on_malformed_action() {
        let history = ["L(1,1)", "click somewhere"];
        assert!(matches!(
            replay(&mut board(), &history),
            Err(GameError::MalformedAction(_))
        ));
    }

    #[test]
    fn stats_skip_the_sentinel_action() {
        let history = ["L(1,1)", "L(1,1)", "R(1,5)", "R(1,5)", "R(1,5)", "L(2,5)"];
        let mut board = board();
        let feedback = replay(&mut board, &history).unwrap();

        let mut stats = ReplayStats::default();
        stats.record(&board, &history, &feedback);

        assert_eq!(stats.boards, 1);
        assert_eq!(stats.actions, 5);
        // R(1,5) x3 and L(2,5) are accepted, the repeated L(1,1) is not
        assert_eq!(stats.valid_actions, 4);
        assert_eq!(stats.repeated_actions, 3);
        assert_eq!(stats.wins, 0);
        assert_eq!(stats.game_overs, 0);
        assert_eq!(stats.flagged_mines, 1);
        assert_eq!(stats.total_mines, 2);
        assert!((stats.valid_ratio() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn prefix_stops_before_a_loss() {
        let history = ["L(1,1)", "R(1,5)", "L(3,5)", "L(2,5)"];

        let sample = replay_prefix(&mut board(), &history, 4).unwrap();

        assert_eq!(sample.n_actions, 3);
        let rendered = sample.board.unwrap();
        assert!(rendered.contains("`F'"));
        assert!(!rendered.contains('*'));
    }

    #[test]
    fn prefix_renders_after_requested_actions() {
        let history = ["L(1,1)", "R(1,5)", "R(3,5)"];
        let mut board = board();

        let sample = replay_prefix(&mut board, &history, 1).unwrap();

        assert_eq!(sample.n_actions, 1);
        assert_eq!(sample.board, Some(board.to_string()));
        assert_eq!(board.flag_count(), 0);
    }
}

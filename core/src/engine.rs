use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Lifecycle of a board, transitions only move forward.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    AwaitingFirstMove,
    InProgress,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_awaiting_first_move(self) -> bool {
        matches!(self, Self::AwaitingFirstMove)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::AwaitingFirstMove
    }
}

/// Which board states count as a win.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinCondition {
    /// Flags must sit on exactly the mine cells.
    Strict,
    /// Either every safe cell is opened, or the flags match the mines exactly.
    Lenient,
}

impl Default for WinCondition {
    fn default() -> Self {
        Self::Lenient
    }
}

/// Per-board settings fixed at construction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardOptions {
    pub win_condition: WinCondition,
    pub symbols: Symbols,
}

impl BoardOptions {
    pub fn strict() -> Self {
        Self {
            win_condition: WinCondition::Strict,
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: GameConfig,
    seed: u64,
    options: BoardOptions,
    mine_layout: Option<MineLayout>,
    /// Placeholder of blanks until mines are placed.
    solution: Array2<SolutionCell>,
    visible: Array2<VisibleCell>,
    previous_visible: Array2<VisibleCell>,
    phase: Phase,
    action_log: Vec<String>,
}

impl Board {
    /// Fresh board, mines are placed on the first reveal.
    pub fn new(config: GameConfig, seed: u64, options: BoardOptions) -> Result<Self> {
        let config = GameConfig::new(config.size, config.mines)?;
        Ok(Self::from_parts(config, seed, options, None))
    }

    /// Board over a known layout, play still starts at [`Phase::AwaitingFirstMove`].
    pub fn with_layout(mine_layout: MineLayout, seed: u64, options: BoardOptions) -> Self {
        let config = GameConfig::new_unchecked(mine_layout.size(), mine_layout.mine_count());
        Self::from_parts(config, seed, options, Some(mine_layout))
    }

    pub(crate) fn from_parts(
        config: GameConfig,
        seed: u64,
        options: BoardOptions,
        mine_layout: Option<MineLayout>,
    ) -> Self {
        let size = config.size.to_nd_index();
        let mut board = Self {
            config,
            seed,
            options,
            mine_layout: None,
            solution: Array2::default(size),
            visible: Array2::default(size),
            previous_visible: Array2::default(size),
            phase: Phase::default(),
            action_log: Vec::new(),
        };
        if let Some(mine_layout) = mine_layout {
            board.install_layout(mine_layout);
        }
        board
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn options(&self) -> &BoardOptions {
        &self.options
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn mine_layout(&self) -> Option<&MineLayout> {
        self.mine_layout.as_ref()
    }

    pub fn solution(&self) -> Option<&Array2<SolutionCell>> {
        self.mine_layout.as_ref().map(|_| &self.solution)
    }

    pub fn visible(&self) -> &Array2<VisibleCell> {
        &self.visible
    }

    pub fn previous_visible(&self) -> &Array2<VisibleCell> {
        &self.previous_visible
    }

    pub fn cell_at(&self, coords: Coord2) -> VisibleCell {
        self.visible[coords.to_nd_index()]
    }

    pub fn action_log(&self) -> &[String] {
        &self.action_log
    }

    pub(crate) fn set_action_log(&mut self, action_log: Vec<String>) {
        self.action_log = action_log;
    }

    /// Opened cells, flags not included.
    pub fn revealed_count(&self) -> CellCount {
        self.visible.iter().filter(|cell| cell.is_opened()).count() as CellCount
    }

    pub fn flag_count(&self) -> CellCount {
        self.visible.iter().filter(|cell| cell.is_flagged()).count() as CellCount
    }

    pub fn correctly_flagged_mines(&self) -> CellCount {
        self.visible
            .iter()
            .zip(self.solution.iter())
            .filter(|(cell, truth)| cell.is_flagged() && truth.is_mine())
            .count() as CellCount
    }

    /// Cells changed by the most recent mutating action.
    pub fn changed_cells(&self) -> Vec<Coord2> {
        iter_coords(self.size())
            .filter(|&coords| {
                self.previous_visible[coords.to_nd_index()] != self.visible[coords.to_nd_index()]
            })
            .collect()
    }

    pub fn apply(&mut self, action: Action) -> Feedback {
        self.action_log.push(action.to_string());
        let feedback = match action {
            Action::Reveal { .. } => self.reveal_at(action),
            Action::Flag { .. } => self.flag_at(action),
            Action::ChordReveal { .. } => self.chord_reveal_at(action),
        };
        log::debug!("{} -> {:?}", action, feedback);
        feedback
    }

    /// Parses a textual action and applies it. A malformed action is an error
    /// and is not recorded in the action log.
    pub fn apply_str(&mut self, action: &str) -> Result<Feedback> {
        let action: Action = action.parse()?;
        Ok(self.apply(action))
    }

    pub fn reveal(&mut self, row: u32, col: u32) -> Feedback {
        self.apply(Action::Reveal { row, col })
    }

    pub fn flag(&mut self, row: u32, col: u32) -> Feedback {
        self.apply(Action::Flag { row, col })
    }

    pub fn chord_reveal(&mut self, row: u32, col: u32) -> Feedback {
        self.apply(Action::ChordReveal { row, col })
    }

    fn reveal_at(&mut self, action: Action) -> Feedback {
        use Feedback::*;

        let Some(coords) = action.locate(self.size()) else {
            return UnknownCell;
        };

        match self.phase {
            Phase::Lost => return self.lose(),
            Phase::Won => return Won,
            Phase::AwaitingFirstMove => return self.reveal_first(coords),
            Phase::InProgress => {}
        }

        match self.cell_at(coords) {
            VisibleCell::Flagged => return RevealFlagged,
            VisibleCell::Opened(0) => return RevealBlank,
            VisibleCell::Opened(_) => return RevealDigit,
            VisibleCell::Unopened | VisibleCell::Mine => {}
        }

        if self.solution[coords.to_nd_index()].is_mine() {
            return self.lose();
        }

        self.previous_visible = self.visible.clone();
        self.flood_reveal(coords);
        self.settle()
    }

    fn reveal_first(&mut self, coords: Coord2) -> Feedback {
        if self.mine_layout.is_none() {
            let layout = ThresholdLayoutGenerator::new(self.seed, Some(coords)).generate(self.config);
            self.install_layout(layout);
        }

        if self.solution[coords.to_nd_index()].is_mine() {
            log::debug!("First reveal at {:?} hit a mine", coords);
            return self.lose();
        }

        self.previous_visible = self.visible.clone();
        self.flood_reveal(coords);
        self.settle()
    }

    fn flag_at(&mut self, action: Action) -> Feedback {
        use Feedback::*;

        if self.phase.is_awaiting_first_move() {
            return FlagBeforeReveal;
        }
        let Some(coords) = action.locate(self.size()) else {
            return UnknownCell;
        };
        match self.phase {
            Phase::Lost => return self.lose(),
            Phase::Won => return Won,
            _ => {}
        }

        let toggled = match self.cell_at(coords) {
            VisibleCell::Opened(0) => return FlagBlank,
            VisibleCell::Opened(_) => return FlagDigit,
            VisibleCell::Unopened => VisibleCell::Flagged,
            VisibleCell::Flagged | VisibleCell::Mine => VisibleCell::Unopened,
        };

        self.previous_visible = self.visible.clone();
        self.visible[coords.to_nd_index()] = toggled;
        self.settle()
    }

    fn chord_reveal_at(&mut self, action: Action) -> Feedback {
        use Feedback::*;

        if self.phase.is_awaiting_first_move() {
            return ChordBeforeReveal;
        }
        let Some(coords) = action.locate(self.size()) else {
            return UnknownCell;
        };
        match self.phase {
            Phase::Lost => return self.lose(),
            Phase::Won => return Won,
            _ => {}
        }

        let count = match self.cell_at(coords) {
            VisibleCell::Opened(0) => return ChordBlank,
            VisibleCell::Flagged => return ChordFlagged,
            VisibleCell::Unopened | VisibleCell::Mine => return ChordUnopened,
            VisibleCell::Opened(count) => count,
        };

        let flagged: Vec<Coord2> = self
            .visible
            .iter_neighbors(coords)
            .filter(|&pos| self.visible[pos.to_nd_index()].is_flagged())
            .collect();

        if flagged.is_empty() {
            return ChordNoFlags;
        }
        if flagged
            .iter()
            .any(|&pos| !self.solution[pos.to_nd_index()].is_mine())
        {
            log::debug!("Chord at {:?} relied on a misplaced flag", coords);
            return self.lose();
        }
        if flagged.len() != usize::from(count) {
            return ChordCountMismatch;
        }

        self.previous_visible = self.visible.clone();
        for pos in self.visible.iter_neighbors(coords) {
            self.flood_reveal(pos);
        }
        self.settle()
    }

    /// Opens `start` and, for blank cells, every blank-connected unopened
    /// neighbor. Uses an explicit stack, only unopened safe cells are touched.
    fn flood_reveal(&mut self, start: Coord2) {
        let mut opened: CellCount = 0;
        let mut to_visit = vec![start];

        while let Some(coords) = to_visit.pop() {
            if !self.visible[coords.to_nd_index()].is_unopened() {
                continue;
            }
            let SolutionCell::Clear(count) = self.solution[coords.to_nd_index()] else {
                continue;
            };

            self.visible[coords.to_nd_index()] = VisibleCell::Opened(count);
            opened += 1;
            log::trace!("Flood opened cell at {:?}, mine count: {}", coords, count);

            if count == 0 {
                to_visit.extend(
                    self.visible
                        .iter_neighbors(coords)
                        .filter(|&pos| self.visible[pos.to_nd_index()].is_unopened()),
                );
            }
        }

        log::trace!("Flood from {:?} opened {} cells", start, opened);
    }

    fn install_layout(&mut self, mine_layout: MineLayout) {
        self.solution = mine_layout.solution();
        self.mine_layout = Some(mine_layout);
    }

    /// Freezes the board by exposing the solution, discarding flags.
    fn lose(&mut self) -> Feedback {
        if !matches!(self.phase, Phase::Lost) {
            self.previous_visible = self.visible.clone();
            self.phase = Phase::Lost;
            log::debug!("Board lost");
        }
        self.visible = self.solution.mapv(VisibleCell::from);
        Feedback::Lost
    }

    /// Evaluates the win condition after a successful mutation.
    fn settle(&mut self) -> Feedback {
        if self.is_won() {
            self.phase = Phase::Won;
            log::debug!("Board won");
            Feedback::Won
        } else {
            self.phase = Phase::InProgress;
            Feedback::Success
        }
    }

    fn is_won(&self) -> bool {
        let mut flags_match = true;
        let mut safe_cells_opened = true;
        for (cell, truth) in self.visible.iter().zip(self.solution.iter()) {
            flags_match &= cell.is_flagged() == truth.is_mine();
            if !truth.is_mine() {
                safe_cells_opened &= *cell == VisibleCell::from(*truth);
            }
        }

        match self.options.win_condition {
            WinCondition::Strict => flags_match,
            WinCondition::Lenient => flags_match || safe_cells_opened,
        }
    }
}

//! Game state module - turn sequencing, scoring and the win state machine
//!
//! `GameState` owns one `Board` and one `MoveQueue` and drives both from a
//! fixed tick. All match and movement rules live in the board; this module only
//! gates input, consumes score events and decides when a level ends.
//!
//! Per tick, in order:
//! 1. consume the board's pending score event
//! 2. tick the board (animations, slide bookkeeping, purge, legal-move flag)
//! 3. tick the move queue
//! 4. age floating score labels
//! 5. evaluate the win condition, if playing and nothing is animating

use tracing::info;

use crate::board::{Board, MoveResult};
use crate::move_queue::MoveQueue;
use crate::rng::SimpleRng;
use crate::scoring::{calculate_match_score, FloatingScore};
use crate::snapshot::{DieSnapshot, GameSnapshot};
use crate::types::{Banner, GameAction, GamePhase, GridPos, Outcome, Point, START_LEVEL};

/// Run-time settings for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameConfig {
    /// Seeds every board and queue of the run.
    pub seed: u32,
    pub start_level: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            start_level: START_LEVEL,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    /// Derives a fresh seed for every level's board and queue.
    level_rng: SimpleRng,
    board: Board,
    queue: MoveQueue,
    phase: GamePhase,
    score: u32,
    level: u32,
    moves: u32,
    floating: Vec<FloatingScore>,
    pointer: Option<Point>,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_config(GameConfig {
            seed,
            ..GameConfig::default()
        })
    }

    pub fn with_config(config: GameConfig) -> Self {
        let mut level_rng = SimpleRng::new(config.seed);
        let board = Board::new(level_rng.next_u32());
        let queue = MoveQueue::new(level_rng.next_u32());
        info!(seed = config.seed, level = config.start_level, "game started");

        Self {
            config,
            level_rng,
            board,
            queue,
            phase: GamePhase::Playing,
            score: 0,
            level: config.start_level,
            moves: 0,
            floating: Vec::new(),
            pointer: None,
        }
    }

    /// Build a game around a prepared board and queue.
    ///
    /// The config keeps the default seed, so `restart` deals a fresh board
    /// seeded from it rather than the prepared one.
    pub fn with_parts(mut board: Board, queue: MoveQueue, level: u32) -> Self {
        board.recompute_legal_move_flag(queue.active_move());
        let config = GameConfig {
            start_level: level,
            ..GameConfig::default()
        };

        Self {
            config,
            level_rng: SimpleRng::new(config.seed),
            board,
            queue,
            phase: GamePhase::Playing,
            score: 0,
            level,
            moves: 0,
            floating: Vec::new(),
            pointer: None,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn queue(&self) -> &MoveQueue {
        &self.queue
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn floating_scores(&self) -> &[FloatingScore] {
        &self.floating
    }

    /// True while any die or the move queue is mid-animation.
    pub fn is_animating(&self) -> bool {
        self.board.is_animating() || self.queue.is_animating()
    }

    /// Record the last pointer position for hover highlighting.
    pub fn set_pointer(&mut self, point: Option<Point>) {
        self.pointer = point;
    }

    /// Die under `point`, rocks included.
    pub fn hovered(&self, point: Point) -> Option<GridPos> {
        self.board.die_at_point(point)
    }

    /// Apply the active move to the die under `point`.
    ///
    /// Returns `None` without touching any state when the game is paused,
    /// anything is animating, nothing is under the pointer, or the die is a rock.
    pub fn select_die(&mut self, point: Point) -> Option<MoveResult> {
        if !self.phase.is_playing() || self.is_animating() {
            return None;
        }
        let cell = self.board.die_at_point(point)?;
        let die = self.board.die(cell)?;
        if die.is_rock() || die.is_animating() {
            return None;
        }

        let result = self.board.attempt_move(cell, self.queue.active_move());
        if result.consumes_move() {
            self.queue.advance();
            self.moves += 1;
        }
        Some(result)
    }

    /// Advance the simulation by one fixed tick.
    pub fn tick(&mut self) {
        if let Some(event) = self.board.take_score_event() {
            let points = calculate_match_score(event.match_count, event.die_value, self.level);
            self.score = self.score.saturating_add(points);
            self.floating
                .push(FloatingScore::new(points, event.average_position));
        }

        self.board.tick(self.queue.active_move());
        self.queue.tick();
        self.floating.retain_mut(FloatingScore::tick);

        if self.phase.is_playing() && !self.is_animating() {
            if let Some(banner) = self.evaluate_win_condition().banner() {
                self.phase = GamePhase::Paused(banner);
                info!(
                    outcome = banner.as_str(),
                    score = self.score,
                    level = self.level,
                    moves = self.moves,
                    "level ended"
                );
            }
        }
    }

    /// Classify the current board.
    ///
    /// - no matchable dice left: `Won`
    /// - no legal move for the active direction: `GameOver`
    /// - no face value left twice: `Complete`
    /// - otherwise `Continue`
    pub fn evaluate_win_condition(&self) -> Outcome {
        let tally = self.board.value_tally();
        if tally.is_empty() {
            return Outcome::Won;
        }
        if !self.board.legal_move_exists() {
            return Outcome::GameOver;
        }
        if tally.values().all(|&count| count <= 1) {
            return Outcome::Complete;
        }
        Outcome::Continue
    }

    /// Move on to the next level after a won or completed board.
    pub fn advance_level(&mut self) -> bool {
        match self.phase.banner() {
            Some(Banner::Won) | Some(Banner::Complete) => {}
            _ => return false,
        }
        self.level += 1;
        self.start_level();
        true
    }

    /// Start over at the configured level with a zero score.
    pub fn restart(&mut self) {
        self.level_rng = SimpleRng::new(self.config.seed);
        self.level = self.config.start_level;
        self.score = 0;
        self.moves = 0;
        self.start_level();
    }

    fn start_level(&mut self) {
        self.board = Board::new(self.level_rng.next_u32());
        self.queue = MoveQueue::new(self.level_rng.next_u32());
        self.floating.clear();
        self.phase = GamePhase::Playing;
        info!(level = self.level, score = self.score, "level started");
    }

    /// Apply a shell action. `pointer` is where a select lands.
    ///
    /// Cursor actions belong to the input layer and are ignored here.
    pub fn apply_action(&mut self, action: GameAction, pointer: Point) -> bool {
        match action {
            GameAction::Select => self
                .select_die(pointer)
                .is_some_and(|result| result.consumes_move()),
            GameAction::Continue => self.advance_level(),
            GameAction::Restart => {
                self.restart();
                true
            }
            GameAction::CursorUp
            | GameAction::CursorDown
            | GameAction::CursorLeft
            | GameAction::CursorRight => false,
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.clear();

        out.dice.extend(self.board.dice_by_z().into_iter().map(|die| DieSnapshot {
            cell: die.cell(),
            value: die.value(),
            position: die.position(),
            visual: die.visual(),
            z_index: die.z_index(),
        }));
        out.shadows.extend_from_slice(self.board.shadows());
        out.queue = self.queue.slots();
        out.queue_offset_x = self.queue.offset_x();
        out.score = self.score;
        out.level = self.level;
        out.moves = self.moves;
        out.banner = self.phase.banner();
        out.floating.extend_from_slice(&self.floating);
        out.hovered = self.pointer.and_then(|p| self.hovered(p));
        out.animating = self.is_animating();
        out.legal_move_exists = self.board.legal_move_exists();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_config(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Layout;
    use crate::geometry::{canonical_position, face_center};
    use crate::types::{Direction, Move};

    const E: i8 = -1;

    fn click(cell: GridPos) -> Point {
        face_center(canonical_position(cell))
    }

    fn game_with(layout: &Layout, moves: &[Direction]) -> GameState {
        let moves: Vec<Move> = moves.iter().copied().map(Move::from_direction).collect();
        GameState::with_parts(
            Board::from_layout(layout, 1),
            MoveQueue::from_moves(&moves, 1),
            2,
        )
    }

    fn run_until_idle(game: &mut GameState) {
        let mut guard = 0;
        loop {
            game.tick();
            if !game.is_animating() {
                break;
            }
            guard += 1;
            assert!(guard < 10_000, "game never settled");
        }
    }

    #[test]
    fn new_game_spawns_and_animates() {
        let game = GameState::new(99);
        assert!(game.is_animating());
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.level(), START_LEVEL);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn select_is_ignored_while_dropping() {
        let mut game = GameState::new(5);
        for row in 0..8 {
            for col in 0..8 {
                assert_eq!(game.select_die(click(GridPos::new(row, col))), None);
            }
        }
        assert_eq!(game.moves(), 0);
    }

    #[test]
    fn blocked_move_keeps_queue_and_counter() {
        let mut layout = [[E; 8]; 8];
        layout[0][0] = 2;
        layout[1][0] = 3;
        layout[5][5] = 3;
        let mut game = game_with(&layout, &[Direction::NorthWest]);
        let active = game.queue().active_move();

        let result = game.select_die(click(GridPos::new(0, 0)));
        assert!(matches!(result, Some(MoveResult::Blocked(_))));
        assert_eq!(game.queue().active_move(), active);
        assert_eq!(game.moves(), 0);
        assert!(!game.is_animating());
    }

    #[test]
    fn rocks_cannot_be_selected() {
        let mut layout = [[E; 8]; 8];
        layout[3][3] = 0;
        layout[6][6] = 1;
        layout[6][7] = 1;
        let mut game = game_with(&layout, &[Direction::SouthEast]);
        assert_eq!(game.select_die(click(GridPos::new(3, 3))), None);
        assert_eq!(game.hovered(click(GridPos::new(3, 3))), Some(GridPos::new(3, 3)));
    }

    #[test]
    fn match_scores_with_level() {
        let mut layout = [[E; 8]; 8];
        layout[2][2] = 4;
        layout[2][3] = 4;
        layout[1][3] = 4;
        layout[7][0] = 1;
        layout[7][1] = 1;
        let mut game = game_with(&layout, &[Direction::NorthEast, Direction::SouthEast]);

        let result = game.select_die(click(GridPos::new(2, 2)));
        assert_eq!(result, Some(MoveResult::Matched { count: 3 }));
        assert_eq!(game.moves(), 1);
        assert!(game.is_animating());

        game.tick();
        assert_eq!(game.score(), 6 * 3 * 2 + 4 * 2);
        assert_eq!(game.floating_scores().len(), 1);
    }

    #[test]
    fn clearing_board_wins_and_continue_advances_level() {
        let mut layout = [[E; 8]; 8];
        layout[4][4] = 6;
        layout[4][5] = 6;
        let mut game = game_with(&layout, &[Direction::NorthEast]);

        game.select_die(click(GridPos::new(4, 4)));
        run_until_idle(&mut game);
        assert_eq!(game.phase(), GamePhase::Paused(Banner::Won));
        assert!(game.snapshot().banner == Some(Banner::Won));

        assert_eq!(game.select_die(click(GridPos::new(4, 4))), None);
        assert!(game.apply_action(GameAction::Continue, Point::default()));
        assert_eq!(game.level(), 3);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert!(game.score() > 0);
    }

    #[test]
    fn singletons_complete_the_level() {
        let mut layout = [[E; 8]; 8];
        layout[0][0] = 1;
        layout[3][3] = 2;
        layout[6][6] = 3;
        let mut game = game_with(&layout, &[Direction::SouthEast]);
        run_until_idle(&mut game);
        assert_eq!(game.phase(), GamePhase::Paused(Banner::Complete));
    }

    #[test]
    fn game_over_cannot_continue_but_can_restart() {
        let mut layout = [[E; 8]; 8];
        layout[7][0] = 2;
        layout[0][7] = 2;
        let mut game = game_with(&layout, &[Direction::SouthWest]);
        // (0, 7) can still slide
        run_until_idle(&mut game);
        assert_eq!(game.phase(), GamePhase::Playing);

        let mut stuck = [[E; 8]; 8];
        stuck[0][0] = 2;
        stuck[1][0] = 3;
        stuck[2][0] = 2;
        stuck[3][0] = 3;
        let mut game = game_with(&stuck, &[Direction::SouthWest]);
        run_until_idle(&mut game);
        assert_eq!(game.phase(), GamePhase::Paused(Banner::GameOver));
        assert!(!game.advance_level());

        game.restart();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.score(), 0);
        assert_eq!(game.moves(), 0);
    }

    #[test]
    fn restart_from_prepared_parts_deals_default_seeded_board() {
        let mut layout = [[E; 8]; 8];
        layout[2][2] = 4;
        let mut game = game_with(&layout, &[Direction::SouthEast]);
        game.restart();

        let fresh = GameState::with_config(GameConfig {
            start_level: 2,
            ..GameConfig::default()
        });
        let dealt: Vec<(GridPos, i8)> =
            game.board().dice().map(|d| (d.cell(), d.value())).collect();
        let expected: Vec<(GridPos, i8)> =
            fresh.board().dice().map(|d| (d.cell(), d.value())).collect();
        assert_eq!(dealt, expected);
        assert_eq!(game.level(), 2);
    }

    #[test]
    fn restart_is_reproducible() {
        let mut game = GameState::new(1234);
        let first: Vec<(GridPos, i8)> =
            game.board().dice().map(|d| (d.cell(), d.value())).collect();
        game.restart();
        let second: Vec<(GridPos, i8)> =
            game.board().dice().map(|d| (d.cell(), d.value())).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn snapshot_dice_are_back_to_front() {
        let game = GameState::new(3);
        let snap = game.snapshot();
        assert_eq!(snap.dice.len(), game.board().len());
        assert!(snap
            .dice
            .windows(2)
            .all(|w| w[0].z_index <= w[1].z_index));
        assert!(snap.animating);
        assert!(!snap.playable());
    }

    #[test]
    fn snapshot_into_reuses_buffers() {
        let game = GameState::new(3);
        let mut snap = GameSnapshot::default();
        game.snapshot_into(&mut snap);
        let cap = snap.dice.capacity();
        game.snapshot_into(&mut snap);
        assert_eq!(snap.dice.capacity(), cap);
        assert_eq!(snap, game.snapshot());
    }
}

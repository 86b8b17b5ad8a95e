use log::{debug, warn};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::ai;
use crate::board::Board;
use crate::error::GameError;
use crate::sowing::MoveCursor;
use crate::token::{Inventory, TokenKind};
use crate::types::{Difficulty, GameResult, GameState, Player, Rules, Step, StepStatus};

pub trait MoveSelector: Send + Sync {
    fn select_move(
        &self,
        board: &Board,
        difficulty: Difficulty,
        rng: &mut dyn RngCore,
    ) -> Option<usize>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicSelector;

impl MoveSelector for HeuristicSelector {
    fn select_move(
        &self,
        board: &Board,
        difficulty: Difficulty,
        rng: &mut dyn RngCore,
    ) -> Option<usize> {
        ai::recommend_move(board, difficulty, rng)
    }
}

/// Drives a match: owns the board, the random source and the
/// "move in progress" flag, and hands out one step at a time.
pub struct GameInstance {
    board: Board,
    rules: Rules,
    pub difficulty: Difficulty,
    rng: ChaCha8Rng,
    active: Option<MoveCursor>,
    selector: Box<dyn MoveSelector>,
}

impl GameInstance {
    pub fn new(seed: u64, difficulty: Difficulty, selector: Box<dyn MoveSelector>) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let rules = Rules::default();
        Self {
            board: Board::setup(None, rules, &mut rng),
            rules,
            difficulty,
            rng,
            active: None,
            selector,
        }
    }

    pub fn new_with_default_selector(seed: u64, difficulty: Difficulty) -> Self {
        Self::new(seed, difficulty, Box::new(HeuristicSelector))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// Rules take effect at the next `reset`.
    pub fn set_rules(&mut self, rules: Rules) {
        self.rules = rules;
    }

    /// Deals a new match. Any move still in flight is discarded.
    pub fn reset(&mut self, inventory: Option<&Inventory>) {
        if self.active.take().is_some() {
            debug!("reset discarded an unfinished move");
        }
        self.board = Board::setup(inventory, self.rules, &mut self.rng);
    }

    pub fn is_move_in_progress(&self) -> bool {
        self.active.is_some()
    }

    pub fn current_player(&self) -> Player {
        self.board.current_player()
    }

    pub fn is_game_over(&self) -> bool {
        self.board.is_game_over()
    }

    pub fn score(&self, player: Player) -> usize {
        self.board.score(player)
    }

    pub fn weighted_score(&self, player: Player) -> u32 {
        self.board.weighted_score(player)
    }

    pub fn store_tokens(&self, player: Player) -> &[TokenKind] {
        self.board.store_tokens(player)
    }

    /// Starts a move for the current player. Steps are then pulled with
    /// `next_step` until it returns `None`.
    pub fn begin_move(&mut self, pit: usize) -> Result<(), GameError> {
        if self.active.is_some() {
            return Err(GameError::MoveInProgress);
        }
        if self.board.is_game_over() {
            return Err(GameError::GameOver);
        }

        let cursor = MoveCursor::start(&self.board, pit).ok_or(GameError::InvalidMove { pit })?;
        debug!("{:?} starts a move from pit {pit}", cursor.mover());
        self.active = Some(cursor);
        Ok(())
    }

    /// Asks the selector for the current player's pit and starts that move.
    /// Returns `Ok(None)` when the player has nothing to sow, after forcing
    /// the termination check.
    pub fn begin_ai_move(&mut self) -> Result<Option<usize>, GameError> {
        if self.active.is_some() {
            return Err(GameError::MoveInProgress);
        }
        if self.board.is_game_over() {
            return Err(GameError::GameOver);
        }

        let Some(pit) = self.recommend_move() else {
            self.board.check_game_over();
            return Ok(None);
        };
        self.begin_move(pit)?;
        Ok(Some(pit))
    }

    pub fn recommend_move(&mut self) -> Option<usize> {
        self.selector
            .select_move(&self.board, self.difficulty, &mut self.rng)
    }

    /// Produces the next step of the move in flight, or `None` when no move
    /// is in flight.
    pub fn next_step(&mut self) -> Option<Step> {
        let cursor = self.active.as_mut()?;
        let step = cursor.advance(&mut self.board);
        if step
            .as_ref()
            .is_none_or(|step| step.status == StepStatus::End)
        {
            self.active = None;
            self.ensure_terminal();
        }
        step
    }

    /// Starts a move and drains it.
    pub fn play_move(&mut self, pit: usize) -> Result<Vec<Step>, GameError> {
        self.begin_move(pit)?;
        Ok(std::iter::from_fn(|| self.next_step()).collect())
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            pits: self.board.snapshot(),
            current_player: self.board.current_player(),
            player_one_score: self.board.score(Player::One),
            player_two_score: self.board.score(Player::Two),
            is_game_over: self.board.is_game_over(),
            move_in_progress: self.active.is_some(),
            extra_turn_credits: [
                self.board.extra_turn_credits(Player::One),
                self.board.extra_turn_credits(Player::Two),
            ],
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let player_one_score = self.board.weighted_score(Player::One);
        let player_two_score = self.board.weighted_score(Player::Two);
        GameResult {
            winner: if player_one_score > player_two_score {
                Some(Player::One)
            } else if player_two_score > player_one_score {
                Some(Player::Two)
            } else {
                None
            },
            player_one_score,
            player_two_score,
            player_one_count: self.board.score(Player::One),
            player_two_count: self.board.score(Player::Two),
        }
    }

    /// All kampung empty without the flag set means the resolver skipped
    /// its own termination check.
    fn ensure_terminal(&mut self) {
        if self.board.is_game_over() {
            return;
        }
        if self.board.side_is_empty(Player::One) && self.board.side_is_empty(Player::Two) {
            warn!("all kampung empty but game not over; forcing termination");
            self.board.check_game_over();
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board) {
        self.board = board;
        self.active = None;
    }
}

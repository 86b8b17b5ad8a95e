use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::Pits;
use crate::error::GameError;

/// One side of the board. Serialised as `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> Self {
        player.number()
    }
}

/// Opponent strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Uniform random among legal pits.
    Easy,
    /// Prefers a pit whose last token lands in the own store.
    #[default]
    Normal,
    /// Like `Normal`, then looks for a capture.
    Hard,
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            other => Err(GameError::UnknownDifficulty(other.to_string())),
        }
    }
}

/// What an own-store landing grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtraTurnRule {
    /// The mover simply keeps the turn. Nothing is banked.
    #[default]
    Continuation,
    /// Every drop into the own store banks a credit; a move that ends
    /// elsewhere spends one credit instead of passing the turn.
    Credit,
}

/// Match rules chosen by the host before `setup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rules {
    pub extra_turn: ExtraTurnRule,
}

/// Step tag, serialised in snake case for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pickup,
    Dropping,
    PickupContinue,
    Steal,
    Capture,
    ExtraTurnBonus,
    End,
}

/// Immutable record of one pause point inside a move.
///
/// Contract:
/// - `pits` is a copy taken when the step was produced; it never aliases the live board.
/// - `count` is the stolen count for `steal` and the captured count for `capture`.
/// - `current_player` and `game_over` are only set on `end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pits: Option<Pits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_player: Option<Player>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_over: Option<bool>,
}

impl Step {
    pub(crate) fn new(status: StepStatus) -> Self {
        Self {
            status,
            position: None,
            hand_count: None,
            count: None,
            pits: None,
            current_player: None,
            game_over: None,
        }
    }

    pub(crate) fn at(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    pub(crate) fn hand(mut self, hand_count: usize) -> Self {
        self.hand_count = Some(hand_count);
        self
    }

    pub(crate) fn moved(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub(crate) fn with_pits(mut self, pits: Pits) -> Self {
        self.pits = Some(pits);
        self
    }

    pub(crate) fn ending(mut self, current_player: Player, game_over: bool) -> Self {
        self.current_player = Some(current_player);
        self.game_over = Some(game_over);
        self
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub pits: Pits,
    pub current_player: Player,
    pub player_one_score: usize,
    pub player_two_score: usize,
    pub is_game_over: bool,
    pub move_in_progress: bool,
    /// Banked extra turns per player. Always zero under `Continuation`.
    pub extra_turn_credits: [u32; 2],
}

/// Final result after game over, decided on weighted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    /// `None` on an equal weighted score.
    pub winner: Option<Player>,
    pub player_one_score: u32,
    pub player_two_score: u32,
    pub player_one_count: usize,
    pub player_two_count: usize,
}

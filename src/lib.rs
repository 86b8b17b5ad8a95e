//! Congkak move-resolution engine: board state, sowing with relay
//! pickups, steals and captures, termination, scoring and a one-ply
//! opponent, exposed to the browser through `wasm-bindgen`.

use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod error;
pub mod game;
pub mod setup;
pub mod sowing;
pub mod token;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use error::GameError;
pub use game::GameInstance;
pub use sowing::{MoveCursor, MoveSteps};
pub use token::{Inventory, TokenKind};
pub use types::{Difficulty, ExtraTurnRule, GameResult, GameState, Player, Rules, Step, StepStatus};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

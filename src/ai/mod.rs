pub mod heuristic;

pub use heuristic::{candidate_moves, recommend_move, simulate_last_landing};

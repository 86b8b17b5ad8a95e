use rand::Rng;
use rand::seq::SliceRandom;

use crate::board::{Board, next_position_for, opposite};
use crate::types::Difficulty;

/// Non-empty kampung of the player to move, in pit order.
pub fn candidate_moves(board: &Board) -> Vec<usize> {
    let player = board.current_player();
    player
        .pits()
        .filter(|&pit| board.pit_count(pit) > 0)
        .collect()
}

/// Where the last token of `pit`'s hand would land if sown straight,
/// ignoring relay pickups.
pub fn simulate_last_landing(board: &Board, pit: usize) -> usize {
    let player = board.current_player();
    (0..board.pit_count(pit)).fold(pit, |position, _| next_position_for(player, position))
}

/// One-ply opponent policy. Returns `None` when the mover has no tokens
/// left on their side.
pub fn recommend_move<R: Rng + ?Sized>(
    board: &Board,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<usize> {
    let candidates = candidate_moves(board);
    if candidates.is_empty() {
        return None;
    }

    let preferred = match difficulty {
        Difficulty::Easy => None,
        Difficulty::Normal => find_store_landing(board, &candidates),
        Difficulty::Hard => find_store_landing(board, &candidates)
            .or_else(|| find_capture(board, &candidates)),
    };

    preferred.or_else(|| candidates.choose(rng).copied())
}

fn find_store_landing(board: &Board, candidates: &[usize]) -> Option<usize> {
    let store = board.current_player().store();
    candidates
        .iter()
        .copied()
        .find(|&pit| simulate_last_landing(board, pit) == store)
}

fn find_capture(board: &Board, candidates: &[usize]) -> Option<usize> {
    let player = board.current_player();
    candidates.iter().copied().find(|&pit| {
        let landing = simulate_last_landing(board, pit);
        player.owns_pit(landing)
            && board.pit_count(landing) == 0
            && board.pit_count(opposite(landing)) > 0
    })
}

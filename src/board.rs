use std::ops::RangeInclusive;

use log::debug;

use crate::token::TokenKind;
use crate::types::{ExtraTurnRule, Player, Rules};

pub const PIT_COUNT: usize = 16;
pub const PITS_PER_SIDE: usize = 7;
pub const SEEDS_PER_PIT: usize = 7;
pub const PLAYER_ONE_STORE: usize = 14;
pub const PLAYER_TWO_STORE: usize = 15;

/// Cyclic order a hand follows: player one's kampung, player one's
/// store, player two's kampung, player two's store.
pub const SOWING_PATH: [usize; PIT_COUNT] = [0, 1, 2, 3, 4, 5, 6, 14, 7, 8, 9, 10, 11, 12, 13, 15];

/// Position of each pit inside `SOWING_PATH`.
const PATH_SLOT: [usize; PIT_COUNT] = {
    let mut slots = [0; PIT_COUNT];
    let mut i = 0;
    while i < PIT_COUNT {
        slots[SOWING_PATH[i]] = i;
        i += 1;
    }
    slots
};

/// Token sequences for all 16 pits. The last element of each pit is its top.
pub type Pits = [Vec<TokenKind>; PIT_COUNT];

impl Player {
    /// Index of this player's store ("induk").
    pub fn store(self) -> usize {
        match self {
            Player::One => PLAYER_ONE_STORE,
            Player::Two => PLAYER_TWO_STORE,
        }
    }

    /// This player's small pits ("kampung").
    pub fn pits(self) -> RangeInclusive<usize> {
        match self {
            Player::One => 0..=6,
            Player::Two => 7..=13,
        }
    }

    pub fn owns_pit(self, pit: usize) -> bool {
        self.pits().contains(&pit)
    }
}

/// Next pit along the sowing path, ignoring who is sowing.
pub fn next_position(pit: usize) -> usize {
    SOWING_PATH[(PATH_SLOT[pit % PIT_COUNT] + 1) % PIT_COUNT]
}

/// Next pit for `player`'s hand: the opponent's store is stepped over.
pub fn next_position_for(player: Player, pit: usize) -> usize {
    let next = next_position(pit);
    if next == player.opponent().store() {
        next_position(next)
    } else {
        next
    }
}

/// Mirror of a small pit across the board (`13 - pit`).
pub fn opposite(pit: usize) -> usize {
    13 - pit
}

pub fn is_store(pit: usize) -> bool {
    pit == PLAYER_ONE_STORE || pit == PLAYER_TWO_STORE
}

/// Congkak board state: 14 kampung, 2 stores, turn and terminal flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pits: Pits,
    current_player: Player,
    game_over: bool,
    rules: Rules,
    extra_turn_credits: [u32; 2],
}

impl Board {
    /// Creates a board with no tokens, player one to move.
    pub fn empty() -> Self {
        Self::from_pits(Default::default(), Player::One)
    }

    /// Creates a board from an arbitrary position.
    pub fn from_pits(pits: Pits, current_player: Player) -> Self {
        Self {
            pits,
            current_player,
            game_over: false,
            rules: Rules::default(),
            extra_turn_credits: [0; 2],
        }
    }

    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn pit(&self, pit: usize) -> &[TokenKind] {
        &self.pits[pit]
    }

    pub fn pit_count(&self, pit: usize) -> usize {
        self.pits[pit].len()
    }

    pub fn pits(&self) -> &Pits {
        &self.pits
    }

    /// Deep copy of every pit, safe to hand to a renderer.
    pub fn snapshot(&self) -> Pits {
        self.pits.clone()
    }

    pub fn total_tokens(&self) -> usize {
        self.pits.iter().map(Vec::len).sum()
    }

    pub fn extra_turn_credits(&self, player: Player) -> u32 {
        self.extra_turn_credits[player.index()]
    }

    pub fn side_is_empty(&self, player: Player) -> bool {
        player.pits().all(|pit| self.pits[pit].is_empty())
    }

    /// Returns `true` when the current player may start a move from `pit`.
    /// Empty pits are never playable.
    pub fn is_valid_move(&self, pit: usize) -> bool {
        !self.game_over && self.current_player.owns_pit(pit) && !self.pits[pit].is_empty()
    }

    /// Number of tokens in `player`'s store.
    pub fn score(&self, player: Player) -> usize {
        self.pits[player.store()].len()
    }

    /// Sum of rarity values in `player`'s store.
    pub fn weighted_score(&self, player: Player) -> u32 {
        self.pits[player.store()].iter().map(|kind| kind.value()).sum()
    }

    pub fn store_tokens(&self, player: Player) -> &[TokenKind] {
        &self.pits[player.store()]
    }

    /// Ends the game once either side's kampung are all empty, sweeping
    /// each side's leftovers into that side's own store.
    /// Returns the game-over flag. Calling it again after the game ended
    /// does nothing.
    pub fn check_game_over(&mut self) -> bool {
        if self.game_over {
            return true;
        }
        if !self.side_is_empty(Player::One) && !self.side_is_empty(Player::Two) {
            return false;
        }

        self.game_over = true;
        for player in [Player::One, Player::Two] {
            let store = player.store();
            for pit in player.pits() {
                let swept = std::mem::take(&mut self.pits[pit]);
                self.pits[store].extend(swept);
            }
        }

        debug!(
            "game over: stores {} vs {}",
            self.score(Player::One),
            self.score(Player::Two)
        );
        true
    }

    pub(crate) fn take_pit(&mut self, pit: usize) -> Vec<TokenKind> {
        std::mem::take(&mut self.pits[pit])
    }

    pub(crate) fn drop_token(&mut self, pit: usize, token: TokenKind) {
        self.pits[pit].push(token);
    }

    /// Moves up to `limit` tokens from the tail of `from` onto `to`.
    pub(crate) fn transfer_tail(&mut self, from: usize, to: usize, limit: usize) -> usize {
        let mut moved = 0;
        while moved < limit {
            let Some(token) = self.pits[from].pop() else {
                break;
            };
            self.pits[to].push(token);
            moved += 1;
        }
        moved
    }

    pub(crate) fn switch_player(&mut self) {
        self.current_player = self.current_player.opponent();
    }

    pub(crate) fn bank_credit(&mut self, player: Player) {
        if self.rules.extra_turn == ExtraTurnRule::Credit {
            self.extra_turn_credits[player.index()] += 1;
        }
    }

    /// Spends one banked extra turn for `player`, if any.
    pub(crate) fn spend_credit(&mut self, player: Player) -> bool {
        let credits = &mut self.extra_turn_credits[player.index()];
        if *credits == 0 {
            return false;
        }
        *credits -= 1;
        true
    }

    pub(crate) fn reset_with(&mut self, pits: Pits, rules: Rules) {
        *self = Self::from_pits(pits, Player::One).with_rules(rules);
    }

    /// White-only position with the given per-pit counts.
    #[cfg(test)]
    pub(crate) fn from_counts_for_test(counts: [usize; PIT_COUNT], current_player: Player) -> Self {
        let pits: Pits = std::array::from_fn(|pit| vec![TokenKind::White; counts[pit]]);
        Self::from_pits(pits, current_player)
    }

    #[cfg(test)]
    pub(crate) fn set_pit_for_test(&mut self, pit: usize, tokens: Vec<TokenKind>) {
        self.pits[pit] = tokens;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind::{Black, Blue, Red, White, Yellow};

    fn board_with_counts(counts: [usize; PIT_COUNT], current_player: Player) -> Board {
        Board::from_counts_for_test(counts, current_player)
    }

    #[test]
    fn path_visits_every_pit_once() {
        let mut seen = SOWING_PATH.to_vec();
        seen.sort_unstable();

        assert_eq!(seen, (0..PIT_COUNT).collect::<Vec<_>>());
    }

    #[test]
    fn next_position_follows_the_cycle() {
        assert_eq!(next_position(0), 1);
        assert_eq!(next_position(6), PLAYER_ONE_STORE);
        assert_eq!(next_position(PLAYER_ONE_STORE), 7);
        assert_eq!(next_position(13), PLAYER_TWO_STORE);
        assert_eq!(next_position(PLAYER_TWO_STORE), 0);
    }

    #[test]
    fn each_hand_skips_the_opponent_store() {
        assert_eq!(next_position_for(Player::One, 13), 0);
        assert_eq!(next_position_for(Player::One, 6), PLAYER_ONE_STORE);
        assert_eq!(next_position_for(Player::Two, 6), 7);
        assert_eq!(next_position_for(Player::Two, 13), PLAYER_TWO_STORE);
    }

    #[test]
    fn opposite_mirrors_small_pits() {
        assert_eq!(opposite(3), 10);
        assert_eq!(opposite(0), 13);
        assert_eq!(opposite(opposite(5)), 5);
    }

    #[test]
    fn valid_move_requires_own_non_empty_pit_and_live_game() {
        let mut counts = [1; PIT_COUNT];
        counts[2] = 0;
        counts[PLAYER_ONE_STORE] = 0;
        counts[PLAYER_TWO_STORE] = 0;
        let mut board = board_with_counts(counts, Player::One);

        assert!(board.is_valid_move(0));
        assert!(!board.is_valid_move(2));
        assert!(!board.is_valid_move(7));
        assert!(!board.is_valid_move(PLAYER_ONE_STORE));
        assert!(!board.is_valid_move(99));

        board.game_over = true;
        assert!(!board.is_valid_move(0));
    }

    #[test]
    fn weighted_score_sums_rarity_values() {
        let mut board = Board::empty();
        board.pits[PLAYER_ONE_STORE] = vec![White, Yellow, Red, Blue, Black];
        board.pits[PLAYER_TWO_STORE] = vec![White, White];

        assert_eq!(board.score(Player::One), 5);
        assert_eq!(board.weighted_score(Player::One), 21);
        assert_eq!(board.weighted_score(Player::Two), 2);
        assert_eq!(board.store_tokens(Player::Two), &[White, White]);
    }

    #[test]
    fn game_over_sweeps_each_side_into_its_own_store() {
        let mut counts = [0; PIT_COUNT];
        counts[8] = 3;
        counts[12] = 2;
        counts[PLAYER_ONE_STORE] = 4;
        counts[PLAYER_TWO_STORE] = 1;
        let mut board = board_with_counts(counts, Player::One);

        assert!(board.check_game_over());
        assert!(board.is_game_over());
        assert_eq!(board.score(Player::One), 4);
        assert_eq!(board.score(Player::Two), 6);
        assert!((0..14).all(|pit| board.pit_count(pit) == 0));
    }

    #[test]
    fn game_over_check_is_idempotent() {
        let mut counts = [0; PIT_COUNT];
        counts[1] = 2;
        let mut board = board_with_counts(counts, Player::Two);

        assert!(board.check_game_over());
        let after_first = board.clone();
        assert!(board.check_game_over());

        assert_eq!(board, after_first);
        assert_eq!(board.score(Player::One), 2);
    }

    #[test]
    fn game_continues_while_both_sides_hold_tokens() {
        let mut counts = [0; PIT_COUNT];
        counts[0] = 1;
        counts[13] = 1;
        let mut board = board_with_counts(counts, Player::One);

        assert!(!board.check_game_over());
        assert_eq!(board.pit_count(0), 1);
    }

    #[test]
    fn transfer_tail_moves_at_most_what_exists() {
        let mut board = Board::empty();
        board.pits[PLAYER_TWO_STORE] = vec![Red, Yellow];

        let moved = board.transfer_tail(PLAYER_TWO_STORE, PLAYER_ONE_STORE, 3);

        assert_eq!(moved, 2);
        assert_eq!(board.pit(PLAYER_ONE_STORE), &[Yellow, Red]);
        assert!(board.pit(PLAYER_TWO_STORE).is_empty());
    }

    #[test]
    fn credits_are_only_banked_under_credit_rule() {
        let mut board = Board::empty();
        board.bank_credit(Player::One);
        assert_eq!(board.extra_turn_credits(Player::One), 0);

        let mut board = Board::empty().with_rules(Rules {
            extra_turn: ExtraTurnRule::Credit,
        });
        board.bank_credit(Player::One);
        assert_eq!(board.extra_turn_credits(Player::One), 1);
        assert!(board.spend_credit(Player::One));
        assert!(!board.spend_credit(Player::One));
    }
}

use rand::Rng;
use rand::seq::SliceRandom;

use crate::board::{Board, PIT_COUNT, PITS_PER_SIDE, Pits, SEEDS_PER_PIT};
use crate::token::{Inventory, TokenKind};
use crate::types::{Player, Rules};

/// Tokens dealt across both sides.
const POOL_SIZE: usize = 2 * PITS_PER_SIDE * SEEDS_PER_PIT;
const FALLBACK_KIND: TokenKind = TokenKind::White;

impl Board {
    /// Deals a new match: 7 tokens in each kampung, empty stores,
    /// player one to move.
    pub fn setup<R: Rng + ?Sized>(inventory: Option<&Inventory>, rules: Rules, rng: &mut R) -> Self {
        Self::from_pits(deal(inventory, rng), Player::One).with_rules(rules)
    }

    /// Re-deals in place, keeping the current rules.
    pub fn reset<R: Rng + ?Sized>(&mut self, inventory: Option<&Inventory>, rng: &mut R) {
        let rules = self.rules();
        self.reset_with(deal(inventory, rng), rules);
    }
}

/// Builds a starting distribution. With an inventory the pool mirrors its
/// kind frequencies; without one each token is rolled independently.
pub fn deal<R: Rng + ?Sized>(inventory: Option<&Inventory>, rng: &mut R) -> Pits {
    let mut pool = match inventory {
        Some(inventory) => {
            let mut pool = inventory_pool(inventory);
            pool.shuffle(rng);
            pool
        }
        None => (0..POOL_SIZE).map(|_| random_kind(rng)).collect(),
    };

    let mut pits: Pits = Default::default();
    for pit in pits.iter_mut().take(PIT_COUNT - 2) {
        let split = pool.len().saturating_sub(SEEDS_PER_PIT);
        *pit = pool.split_off(split);
    }
    pits
}

/// Apportions `POOL_SIZE` tokens across kinds by largest remainder.
/// An empty inventory yields an all-fallback pool.
fn inventory_pool(inventory: &Inventory) -> Vec<TokenKind> {
    let total: u64 = inventory.values().map(|&count| u64::from(count)).sum();
    if total == 0 {
        return vec![FALLBACK_KIND; POOL_SIZE];
    }

    let size = POOL_SIZE as u64;
    let mut quotas: Vec<(TokenKind, u64, u64)> = inventory
        .iter()
        .map(|(&kind, &count)| {
            let scaled = u64::from(count) * size;
            (kind, scaled / total, scaled % total)
        })
        .collect();

    let assigned: u64 = quotas.iter().map(|&(_, quota, _)| quota).sum();
    let mut leftover = size - assigned;

    let mut by_remainder: Vec<usize> = (0..quotas.len()).collect();
    by_remainder.sort_by(|&a, &b| quotas[b].2.cmp(&quotas[a].2).then(a.cmp(&b)));
    for idx in by_remainder {
        if leftover == 0 {
            break;
        }
        if quotas[idx].2 > 0 {
            quotas[idx].1 += 1;
            leftover -= 1;
        }
    }

    let mut pool = Vec::with_capacity(POOL_SIZE);
    for (kind, quota, _) in quotas {
        pool.extend(std::iter::repeat_n(kind, quota as usize));
    }
    pool.resize(POOL_SIZE, FALLBACK_KIND);
    pool
}

/// 5% blue, 5% red, 10% yellow, otherwise white.
fn random_kind<R: Rng + ?Sized>(rng: &mut R) -> TokenKind {
    let roll: f64 = rng.gen_range(0.0..1.0);
    if roll < 0.05 {
        TokenKind::Blue
    } else if roll < 0.1 {
        TokenKind::Red
    } else if roll < 0.2 {
        TokenKind::Yellow
    } else {
        TokenKind::White
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{PLAYER_ONE_STORE, PLAYER_TWO_STORE};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn count_kind(board: &Board, kind: TokenKind) -> usize {
        board
            .pits()
            .iter()
            .flatten()
            .filter(|&&token| token == kind)
            .count()
    }

    #[test]
    fn inventory_setup_fills_every_kampung_with_seven() {
        let inventory = Inventory::from([(TokenKind::White, 10), (TokenKind::Yellow, 10)]);
        let board = Board::setup(Some(&inventory), Rules::default(), &mut test_rng());

        assert!((0..14).all(|pit| board.pit_count(pit) == SEEDS_PER_PIT));
        assert!(board.pit(PLAYER_ONE_STORE).is_empty());
        assert!(board.pit(PLAYER_TWO_STORE).is_empty());
        assert_eq!(board.current_player(), Player::One);
        assert!(!board.is_game_over());
    }

    #[test]
    fn inventory_pool_keeps_relative_frequency() {
        let inventory = Inventory::from([(TokenKind::White, 1), (TokenKind::Yellow, 1)]);
        let board = Board::setup(Some(&inventory), Rules::default(), &mut test_rng());

        assert_eq!(count_kind(&board, TokenKind::White), 49);
        assert_eq!(count_kind(&board, TokenKind::Yellow), 49);
    }

    #[test]
    fn large_inventories_are_not_truncated_to_the_first_kind() {
        let inventory = Inventory::from([
            (TokenKind::White, 3000),
            (TokenKind::Red, 1000),
            (TokenKind::Black, 0),
        ]);
        let pool = inventory_pool(&inventory);

        assert_eq!(pool.len(), POOL_SIZE);
        let reds = pool.iter().filter(|&&kind| kind == TokenKind::Red).count();
        assert!((24..=25).contains(&reds), "got {reds} reds");
        assert!(!pool.contains(&TokenKind::Black));
    }

    #[test]
    fn exhausted_inventory_falls_back_to_white() {
        let inventory = Inventory::from([(TokenKind::Blue, 0)]);
        let board = Board::setup(Some(&inventory), Rules::default(), &mut test_rng());

        assert_eq!(count_kind(&board, TokenKind::White), POOL_SIZE);
    }

    #[test]
    fn random_setup_never_deals_black() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let board = Board::setup(None, Rules::default(), &mut rng);

            assert_eq!(board.total_tokens(), POOL_SIZE);
            assert_eq!(count_kind(&board, TokenKind::Black), 0);
        }
    }

    #[test]
    fn same_seed_deals_same_board() {
        let first = Board::setup(None, Rules::default(), &mut test_rng());
        let second = Board::setup(None, Rules::default(), &mut test_rng());

        assert_eq!(first, second);
    }

    #[test]
    fn reset_clears_flags_and_keeps_rules() {
        let rules = Rules {
            extra_turn: crate::types::ExtraTurnRule::Credit,
        };
        let mut board = Board::empty().with_rules(rules);
        board.check_game_over();
        assert!(board.is_game_over());

        board.reset(None, &mut test_rng());

        assert!(!board.is_game_over());
        assert_eq!(board.rules(), rules);
        assert_eq!(board.total_tokens(), POOL_SIZE);
    }
}

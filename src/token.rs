use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A marble ("guli") kind. Ownership is positional, so a token only
/// carries its rarity and effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    White,
    Yellow,
    Red,
    Blue,
    Black,
}

/// Player's collected tokens, keyed by kind.
pub type Inventory = BTreeMap<TokenKind, u32>;

impl TokenKind {
    pub const ALL: [TokenKind; 5] = [
        TokenKind::White,
        TokenKind::Yellow,
        TokenKind::Red,
        TokenKind::Blue,
        TokenKind::Black,
    ];

    /// Rarity points used by the weighted score.
    pub fn value(self) -> u32 {
        match self {
            TokenKind::White => 1,
            TokenKind::Yellow => 2,
            TokenKind::Red => 3,
            TokenKind::Blue => 10,
            TokenKind::Black => 5,
        }
    }

    /// Returns `true` for kinds that steal from the opponent's store
    /// when they land in the mover's own store.
    pub fn steals(self) -> bool {
        matches!(self, TokenKind::Blue)
    }
}

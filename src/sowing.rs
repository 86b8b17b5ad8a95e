//! Move resolution: sowing ("menyemai"), relay pickups ("pusingan"),
//! steals, captures ("tembak") and the turn hand-over.
//!
//! A move is a finite sequence of [`Step`]s. [`MoveCursor`] holds the
//! in-flight state and produces one step per [`MoveCursor::advance`] call,
//! mutating the board only as far as that step. [`MoveSteps`] wraps a cursor
//! and a mutable borrow of the board as an `Iterator`.
//!
//! Abandon a move only between moves: dropping a cursor before its `end`
//! step leaves the board part-way through the move, and the tokens still in
//! hand are lost with it.

use log::{debug, trace};

use crate::board::{Board, is_store, next_position_for, opposite};
use crate::token::TokenKind;
use crate::types::{ExtraTurnRule, Player, Step, StepStatus};

/// Most tokens a single steal moves.
pub const STEAL_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Pickup,
    Drop,
    Dropped,
    Relay,
    Settle,
    HandOver,
    Finish,
    Done,
}

/// Resumable state of one move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCursor {
    mover: Player,
    origin: usize,
    hand: Vec<TokenKind>,
    position: usize,
    phase: Phase,
}

impl MoveCursor {
    /// Starts a move from `pit`. Returns `None` when the move is not
    /// playable; the board is not touched either way.
    pub fn start(board: &Board, pit: usize) -> Option<Self> {
        if !board.is_valid_move(pit) {
            return None;
        }
        Some(Self {
            mover: board.current_player(),
            origin: pit,
            hand: Vec::new(),
            position: pit,
            phase: Phase::Pickup,
        })
    }

    pub fn mover(&self) -> Player {
        self.mover
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Produces the next step, or `None` once `end` has been produced.
    /// `board` must be the board the cursor was started on, untouched by
    /// anything else since.
    pub fn advance(&mut self, board: &mut Board) -> Option<Step> {
        loop {
            match self.phase {
                Phase::Pickup => {
                    self.hand = board.take_pit(self.origin);
                    self.phase = Phase::Drop;
                    return Some(
                        Step::new(StepStatus::Pickup)
                            .at(self.origin)
                            .hand(self.hand.len())
                            .with_pits(board.snapshot()),
                    );
                }
                Phase::Drop => {
                    let Some(token) = self.hand.pop() else {
                        self.phase = Phase::Settle;
                        continue;
                    };
                    self.position = next_position_for(self.mover, self.position);
                    board.drop_token(self.position, token);
                    trace!("{:?} drops {:?} into pit {}", self.mover, token, self.position);

                    let own_store = self.mover.store();
                    if self.position == own_store {
                        board.bank_credit(self.mover);
                    }
                    self.phase = Phase::Dropped;

                    if token.steals() && self.position == own_store {
                        let stolen =
                            board.transfer_tail(self.mover.opponent().store(), own_store, STEAL_LIMIT);
                        debug!("{:?} steals {stolen} from the opposing store", self.mover);
                        return Some(
                            Step::new(StepStatus::Steal)
                                .at(own_store)
                                .moved(stolen)
                                .with_pits(board.snapshot()),
                        );
                    }
                }
                Phase::Dropped => {
                    self.phase = if !self.hand.is_empty() {
                        Phase::Drop
                    } else if !is_store(self.position) && board.pit_count(self.position) > 1 {
                        Phase::Relay
                    } else {
                        Phase::Settle
                    };
                    return Some(
                        Step::new(StepStatus::Dropping)
                            .at(self.position)
                            .hand(self.hand.len())
                            .with_pits(board.snapshot()),
                    );
                }
                Phase::Relay => {
                    self.hand = board.take_pit(self.position);
                    self.phase = Phase::Drop;
                    debug!(
                        "{:?} continues from pit {} with {} tokens",
                        self.mover,
                        self.position,
                        self.hand.len()
                    );
                    return Some(
                        Step::new(StepStatus::PickupContinue)
                            .at(self.position)
                            .hand(self.hand.len())
                            .with_pits(board.snapshot()),
                    );
                }
                Phase::Settle => {
                    // Under the credit rule the landing's own credit pays for the turn.
                    if self.position == self.mover.store()
                        && board.rules().extra_turn == ExtraTurnRule::Continuation
                    {
                        self.phase = Phase::Finish;
                        return Some(Step::new(StepStatus::ExtraTurnBonus).at(self.position));
                    }

                    self.phase = Phase::HandOver;
                    if let Some(captured) = self.capture(board) {
                        return Some(
                            Step::new(StepStatus::Capture)
                                .at(self.position)
                                .moved(captured)
                                .with_pits(board.snapshot()),
                        );
                    }
                }
                Phase::HandOver => {
                    self.phase = Phase::Finish;
                    if board.spend_credit(self.mover) {
                        debug!("{:?} spends a banked extra turn", self.mover);
                        return Some(Step::new(StepStatus::ExtraTurnBonus).at(self.position));
                    }
                    board.switch_player();
                }
                Phase::Finish => {
                    let game_over = board.check_game_over();
                    self.phase = Phase::Done;
                    return Some(
                        Step::new(StepStatus::End)
                            .with_pits(board.snapshot())
                            .ending(board.current_player(), game_over),
                    );
                }
                Phase::Done => return None,
            }
        }
    }

    /// Captures into the mover's store when the last token landed in a
    /// previously empty own kampung facing a non-empty pit.
    fn capture(&self, board: &mut Board) -> Option<usize> {
        let landing = self.position;
        if !self.mover.owns_pit(landing) || board.pit_count(landing) != 1 {
            return None;
        }
        let facing = opposite(landing);
        if board.pit_count(facing) == 0 {
            return None;
        }

        let store = self.mover.store();
        let mut captured = board.take_pit(facing);
        captured.extend(board.take_pit(landing));
        let count = captured.len();
        for token in captured {
            board.drop_token(store, token);
        }
        debug!("{:?} captures {count} via pit {landing}", self.mover);
        Some(count)
    }
}

/// Lazy, non-restartable step sequence of one move. Holds the board
/// mutably until dropped.
#[derive(Debug)]
pub struct MoveSteps<'a> {
    board: &'a mut Board,
    cursor: Option<MoveCursor>,
}

impl Iterator for MoveSteps<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let step = self.cursor.as_mut()?.advance(self.board);
        if step.is_none() {
            self.cursor = None;
        }
        step
    }
}

impl std::iter::FusedIterator for MoveSteps<'_> {}

impl Board {
    /// Resolves a move from `pit` step by step. An invalid pit yields no
    /// steps and leaves the board unchanged.
    pub fn resolve_move(&mut self, pit: usize) -> MoveSteps<'_> {
        let cursor = MoveCursor::start(self, pit);
        MoveSteps {
            board: self,
            cursor,
        }
    }
}

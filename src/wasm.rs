use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::GameError;
use crate::game::GameInstance;
use crate::token::Inventory;
use crate::types::{Difficulty, Player, Rules};

/// Browser handle around [`GameInstance`]. Values cross as plain JS
/// objects; failures surface as `Error` with the `GameError` message.
#[wasm_bindgen]
pub struct CongkakGame {
    inner: GameInstance,
}

#[wasm_bindgen]
impl CongkakGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> CongkakGame {
        Self {
            inner: GameInstance::new_with_default_selector(u64::from(seed), Difficulty::default()),
        }
    }

    /// `inventory` is `{ white: n, ... }`, or `null` for the random pool.
    pub fn reset(&mut self, inventory: JsValue) -> Result<(), JsError> {
        let inventory: Option<Inventory> = if inventory.is_null() || inventory.is_undefined() {
            None
        } else {
            Some(from_js(inventory)?)
        };
        self.inner.reset(inventory.as_ref());
        Ok(())
    }

    #[wasm_bindgen(js_name = setRules)]
    pub fn set_rules(&mut self, rules: JsValue) -> Result<(), JsError> {
        let rules: Rules = from_js(rules)?;
        self.inner.set_rules(rules);
        Ok(())
    }

    #[wasm_bindgen(js_name = setDifficulty)]
    pub fn set_difficulty(&mut self, name: &str) -> Result<(), JsError> {
        self.inner.difficulty = name.parse::<Difficulty>()?;
        Ok(())
    }

    #[wasm_bindgen(js_name = beginMove)]
    pub fn begin_move(&mut self, pit: usize) -> Result<(), JsError> {
        Ok(self.inner.begin_move(pit)?)
    }

    #[wasm_bindgen(js_name = beginAiMove)]
    pub fn begin_ai_move(&mut self) -> Result<Option<usize>, JsError> {
        Ok(self.inner.begin_ai_move()?)
    }

    /// Next step object, or `null` when no move is in flight.
    #[wasm_bindgen(js_name = nextStep)]
    pub fn next_step(&mut self) -> Result<JsValue, JsError> {
        match self.inner.next_step() {
            Some(step) => to_js(&step),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = recommendMove)]
    pub fn recommend_move(&mut self) -> Option<usize> {
        self.inner.recommend_move()
    }

    pub fn score(&self, player: u8) -> Result<usize, JsError> {
        Ok(self.inner.score(parse_player(player)?))
    }

    #[wasm_bindgen(js_name = weightedScore)]
    pub fn weighted_score(&self, player: u8) -> Result<u32, JsError> {
        Ok(self.inner.weighted_score(parse_player(player)?))
    }

    #[wasm_bindgen(js_name = storeTokens)]
    pub fn store_tokens(&self, player: u8) -> Result<JsValue, JsError> {
        to_js(self.inner.store_tokens(parse_player(player)?))
    }

    #[wasm_bindgen(js_name = currentPlayer)]
    pub fn current_player(&self) -> u8 {
        self.inner.current_player().number()
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.inner.is_game_over()
    }

    #[wasm_bindgen(js_name = isMoveInProgress)]
    pub fn is_move_in_progress(&self) -> bool {
        self.inner.is_move_in_progress()
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.to_game_state())
    }

    pub fn result(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.to_game_result())
    }
}

fn parse_player(number: u8) -> Result<Player, GameError> {
    Player::from_number(number).ok_or(GameError::InvalidPlayer(number))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|err| GameError::Serialization(err.to_string()).into())
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, GameError> {
    serde_wasm_bindgen::from_value(value).map_err(|err| GameError::Serialization(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_numbers_outside_one_and_two_are_rejected() {
        assert_eq!(parse_player(1), Ok(Player::One));
        assert_eq!(parse_player(0), Err(GameError::InvalidPlayer(0)));
    }
}

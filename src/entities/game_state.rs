/// Top-level session state. `GameOver` is terminal: nothing leads back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    GameOver,
}

impl GameState {
    pub fn is_playing(&self) -> bool {
        *self == GameState::Playing
    }
}

/// Phases of a run, in the only order they can occur
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Waiting for a click on the title screen
    StartScreen,
    Playing,
    Terminated,
}

use crossterm::event::KeyCode;

use crate::entities::GameState;
use crate::shell::ShellEvent;

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    Fire,
    /// Leave the start screen
    Start,
    Quit,
}

/// Translates raw shell events into game actions for the current state
#[derive(Debug, Default)]
pub struct InputManager {
    actions: Vec<InputAction>,
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces this tick's actions with those produced by `events`.
    ///
    /// Every key-down yields at most one action and event order is kept, so
    /// a burst of presses in one tick moves the wizard once per press.
    pub fn process_events(&mut self, events: &[ShellEvent], game_state: GameState) {
        self.actions.clear();
        self.actions.extend(
            events
                .iter()
                .filter_map(|event| Self::map_event(event, game_state)),
        );
    }

    /// Actions gathered by the last call to [`InputManager::process_events`]
    pub fn actions(&self) -> &[InputAction] {
        &self.actions
    }

    pub fn quit_requested(&self) -> bool {
        self.actions.contains(&InputAction::Quit)
    }

    fn map_event(event: &ShellEvent, game_state: GameState) -> Option<InputAction> {
        // Closing the window works in any state
        if *event == ShellEvent::Quit {
            return Some(InputAction::Quit);
        }

        match game_state {
            GameState::StartScreen => match event {
                ShellEvent::PointerDown | ShellEvent::KeyDown(KeyCode::Enter) => {
                    Some(InputAction::Start)
                }
                _ => None,
            },
            GameState::Playing => match event {
                ShellEvent::KeyDown(KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A')) => {
                    Some(InputAction::MoveLeft)
                }
                ShellEvent::KeyDown(KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D')) => {
                    Some(InputAction::MoveRight)
                }
                ShellEvent::KeyDown(KeyCode::Char(' ')) => Some(InputAction::Fire),
                _ => None,
            },
            GameState::Terminated => None,
        }
    }
}

use std::io::{self, Stdout, stdout};
use std::time::Duration;

use color_eyre::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    cursor::Show,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use ratatui_image::picker::Picker;
use tracing::{debug, warn};

use crate::assets::Assets;
use crate::audio::AudioManager;
use crate::renderer::{GameRenderer, RenderView};
use crate::session::SoundCue;

/// Font size assumed when the terminal cannot report its own
const FALLBACK_FONT_SIZE: (u16, u16) = (8, 16);

/// Input as reported by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellEvent {
    /// The player asked to close the game
    Quit,
    KeyDown(KeyCode),
    /// Primary pointer button pressed
    PointerDown,
}

/// Everything the frame controller needs from the outside world
pub trait Shell {
    /// Drains all pending input without blocking
    fn poll_events(&mut self) -> Result<Vec<ShellEvent>>;

    fn present_start_screen(&mut self) -> Result<()>;

    fn present_session(&mut self, view: &RenderView) -> Result<()>;

    /// Fire-and-forget sound cue
    fn play(&mut self, cue: SoundCue);

    fn delay(&mut self, duration: Duration);
}

/// Maps a raw terminal event to a shell event, if it means anything to the game.
///
/// Esc, `q` and Ctrl-C stand in for closing the window. Key releases are
/// dropped; held keys arrive as repeated presses.
pub fn translate_event(event: Event) -> Option<ShellEvent> {
    match event {
        Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
            if is_close_key(&key) {
                Some(ShellEvent::Quit)
            } else {
                Some(ShellEvent::KeyDown(key.code))
            }
        }
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            ..
        }) => Some(ShellEvent::PointerDown),
        _ => None,
    }
}

fn is_close_key(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q'))
        || (matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// One terminal cleanup action
type RestoreStep<'a> = Box<dyn FnOnce() -> io::Result<()> + 'a>;

/// Runs every step and reports the first failure
fn run_all_steps<'a>(steps: impl IntoIterator<Item = RestoreStep<'a>>) -> io::Result<()> {
    let mut first_error = None;
    for step in steps {
        if let Err(err) = step() {
            warn!(%err, "terminal restore step failed");
            first_error.get_or_insert(err);
        }
    }
    first_error.map_or(Ok(()), Err)
}

/// Owns the terminal modes switched on by [`TerminalShell::enter`].
///
/// Created as soon as raw mode is on, so a failure later in setup still
/// hands the terminal back when the guard is dropped.
struct TerminalGuard {
    keyboard_enhancement: bool,
    restored: bool,
}

impl TerminalGuard {
    fn raw_mode() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self {
            keyboard_enhancement: false,
            restored: false,
        })
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        let keyboard_enhancement = self.keyboard_enhancement;
        let steps: [RestoreStep<'_>; 4] = [
            Box::new(disable_raw_mode),
            Box::new(move || {
                let mut out = stdout();
                if keyboard_enhancement {
                    execute!(out, PopKeyboardEnhancementFlags)
                } else {
                    Ok(())
                }
            }),
            Box::new(|| {
                let mut out = stdout();
                execute!(out, DisableMouseCapture, LeaveAlternateScreen)
            }),
            Box::new(|| {
                let mut out = stdout();
                execute!(out, Show)
            }),
        ];
        let result = run_all_steps(steps);
        // A failed restore is retried on drop
        self.restored = result.is_ok();
        result
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!(%err, "failed to restore terminal");
        }
    }
}

/// Terminal-backed shell: alternate screen, mouse capture and audio
pub struct TerminalShell {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    renderer: GameRenderer,
    audio: AudioManager,
    guard: TerminalGuard,
}

impl TerminalShell {
    /// Takes over the terminal. Call [`TerminalShell::restore`] before exiting.
    pub fn enter(assets: Assets, audio: AudioManager) -> Result<Self> {
        let keyboard_enhancement = matches!(
            crossterm::terminal::supports_keyboard_enhancement(),
            Ok(true)
        );
        debug!(keyboard_enhancement, "keyboard enhancement support");

        // Every `?` from here on drops the guard and restores the terminal
        let mut guard = TerminalGuard::raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        // Enable keyboard enhancement AFTER entering alternate screen
        if keyboard_enhancement {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )?;
            guard.keyboard_enhancement = true;
        }

        // Must run before any events are read, the query answers arrive on stdin
        let picker = Picker::from_query_stdio().unwrap_or_else(|err| {
            warn!(?err, "terminal graphics query failed, using half blocks");
            Picker::from_fontsize(FALLBACK_FONT_SIZE)
        });
        let renderer = GameRenderer::new(assets, &picker);

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;

        Ok(Self {
            terminal,
            renderer,
            audio,
            guard,
        })
    }

    /// Hands the terminal back in the state it was found. Safe to call twice.
    ///
    /// Every cleanup step is attempted; the first failure is returned.
    pub fn restore(&mut self) -> Result<()> {
        self.guard.restore()?;
        Ok(())
    }
}

impl Shell for TerminalShell {
    fn poll_events(&mut self) -> Result<Vec<ShellEvent>> {
        let mut events = Vec::new();

        // Poll for all available events without blocking
        while event::poll(Duration::from_millis(0))? {
            if let Some(shell_event) = translate_event(event::read()?) {
                events.push(shell_event);
            }
        }

        Ok(events)
    }

    fn present_start_screen(&mut self) -> Result<()> {
        self.terminal
            .draw(|frame| self.renderer.render_start_screen(frame))?;
        Ok(())
    }

    fn present_session(&mut self, view: &RenderView) -> Result<()> {
        self.terminal
            .draw(|frame| self.renderer.render_session(frame, view))?;
        Ok(())
    }

    fn play(&mut self, cue: SoundCue) {
        self.audio.play(cue);
    }

    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

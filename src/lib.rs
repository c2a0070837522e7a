// Library exports for testing
pub use app::{App, FramePacer, SessionEnd, SessionSummary};
pub use config::{Cli, GameConfig};
pub use entities::{Enemy, Entity, GameState, Player, Projectile, SpriteKind};
pub use input::{InputAction, InputManager};
pub use renderer::RenderView;
pub use session::{Session, SoundCue, TickReport};
pub use shell::{Shell, ShellEvent};

pub mod app;
pub mod assets;
pub mod audio;
pub mod config;
pub mod entities;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod session;
pub mod shell;

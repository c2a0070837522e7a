use clap::Parser;
use color_eyre::Result;
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

use shoot_the_spider::{
    App, Cli, SessionEnd,
    assets::Assets,
    audio::AudioManager,
    logging,
    shell::TerminalShell,
};

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config = cli.game_config()?;
    logging::init(&cli.log_file)?;
    info!(?config, seed = ?cli.seed, "starting");

    // Every asset is loaded before the terminal is taken over so a missing
    // file is reported on a normal screen
    let assets = Assets::load(&cli.assets, &config)?;
    let audio = if cli.mute {
        AudioManager::muted()
    } else {
        AudioManager::new(&assets)?
    };
    info!(muted = audio.is_muted(), "audio ready");

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut shell = TerminalShell::enter(assets, audio)?;
    let result = App::new(config, rng).run(&mut shell);
    shell.restore()?;

    if let Some(summary) = result? {
        match summary.end {
            SessionEnd::HealthDepleted => println!("Game over! Final score: {}", summary.score),
            SessionEnd::Quit => println!("Final score: {}", summary.score),
        }
    }

    Ok(())
}

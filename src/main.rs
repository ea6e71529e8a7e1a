use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use wordle_game::cli::{CliInterface, parse_cli};
use wordle_game::logging::{LogConfig, LogTarget, default_log_path, init_logging};
use wordle_game::tui::TuiInterface;
use wordle_game::{GameInterface, RoundController, game_loop, load_dictionary};

fn main() -> Result<()> {
    let cli = parse_cli();

    let target = if cli.tui {
        LogTarget::File(default_log_path())
    } else {
        LogTarget::Stderr
    };
    init_logging(&LogConfig {
        verbose: cli.verbose,
        target,
    })
    .context("failed to initialise logging")?;

    let source = cli.word_source();
    log::debug!("Dictionary source: {source:?}");
    let dictionary = load_dictionary(&source)
        .with_context(|| format!("could not load a dictionary from {source:?}"))?;

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut controller = RoundController::new(rng);

    println!("Welcome to wordle! Loaded {} words.", dictionary.len());

    let mut interface: Box<dyn GameInterface> = if cli.tui {
        Box::new(TuiInterface::new().context("failed to set up the terminal")?)
    } else {
        Box::new(CliInterface::new(io::stdin().lock(), io::stdout(), cli.use_color()))
    };

    let stats = game_loop(&dictionary, &mut controller, interface.as_mut())
        .context("game session ended unexpectedly")?;
    // Restore the terminal before anything else is printed.
    drop(interface);

    if cli.tui {
        println!("Rounds won: {}, lost: {}.", stats.won, stats.lost);
    }
    Ok(())
}

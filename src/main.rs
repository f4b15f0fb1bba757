mod command;
mod config;
mod consts;
mod game;
mod input;
mod logging;
mod session;
mod signals;
mod terminal;
use crate::config::Config;
use crate::game::GameLoop;
use crate::input::{InputCoordinator, TerminalKeys};
use crate::session::{Ending, Session};
use crate::terminal::TerminalGuard;
use anyhow::Context;
use std::io::{self, ErrorKind};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let config = Config::load_default();
    logging::init(
        config
            .as_ref()
            .ok()
            .and_then(|cfg| cfg.log_file.as_deref()),
    );
    let config = config.unwrap_or_else(|e| {
        let e = anyhow::Error::from(e);
        warn!("Using default configuration: {e:#}");
        Config::default()
    });
    io_exit(run(&config))
}

fn run(config: &Config) -> anyhow::Result<()> {
    info!(?config, "Starting session");
    let session = Arc::new(Session::new(config.input_policy));
    if let Err(e) = signals::spawn_listener(Arc::clone(&session)) {
        error!(error = %e, "Failed to install signal handlers");
    }
    let mut guard = TerminalGuard::setup();
    let mut game = GameLoop::new(io::stdout()).with_debug(config.debug);
    game.draw().context("failed to draw the board")?;
    let ending = InputCoordinator::new(TerminalKeys, session, game, consts::TICK_PERIOD)
        .run()
        .context("game session failed")?;
    guard.restore();
    info!(?ending, "Session over");
    match ending {
        Ending::Died { score } => println!("\nYOU DIED! Your final score: {score}"),
        Ending::Won { score } => println!("\nYOU WON! Your final score: {score}"),
        Ending::Quit | Ending::Signalled(_) | Ending::Aborted => (),
    }
    Ok(())
}

fn io_exit(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e)
            if e.downcast_ref::<io::Error>()
                .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe) =>
        {
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ttysnake: {e:?}");
            ExitCode::from(2)
        }
    }
}

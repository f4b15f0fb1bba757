use crate::command::Command;
use crate::config::InputPolicy;
use crate::consts;
use crate::game::{GameLoop, RandomSource};
use crate::session::{self, Ending, Session, Submission};
use crossterm::event::{poll, read, KeyEvent};
use std::io::{self, Write};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error};

/// A supplier of keypresses
pub(crate) trait KeySource {
    /// Wait up to `timeout` for the next keypress.  Returns `None` if nothing
    /// was pressed in time or if the event that arrived was not a keypress.
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>>;
}

/// Keypresses read from the controlling terminal
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if poll(timeout)? {
            Ok(read()?.as_key_press_event())
        } else {
            Ok(None)
        }
    }
}

/// Runs on the input thread: turns keypresses into committed directions and
/// starts the tick thread once the first direction is accepted
#[derive(Debug)]
pub(crate) struct InputCoordinator<K, W, R> {
    keys: K,
    session: Arc<Session>,
    /// The game, until it is handed off to the tick thread
    game: Option<GameLoop<W, R>>,
    ticker: Option<JoinHandle<io::Result<()>>>,
    tick_period: Duration,
}

impl<K, W, R> InputCoordinator<K, W, R>
where
    K: KeySource,
    W: Write + Send + 'static,
    R: RandomSource + Send + 'static,
{
    pub(crate) fn new(
        keys: K,
        session: Arc<Session>,
        game: GameLoop<W, R>,
        tick_period: Duration,
    ) -> Self {
        InputCoordinator {
            keys,
            session,
            game: Some(game),
            ticker: None,
            tick_period,
        }
    }

    /// Process keypresses until the session ends, then wait for the tick
    /// thread to stop and return how the session ended
    pub(crate) fn run(mut self) -> io::Result<Ending> {
        let r = self.read_keys();
        if r.is_err() {
            let _ = self.session.finish(Ending::Aborted);
        }
        let ticked = self.join_ticker();
        let ending = r?;
        ticked?;
        Ok(ending)
    }

    fn read_keys(&mut self) -> io::Result<Ending> {
        loop {
            if let Some(ending) = self.session.ending() {
                return Ok(ending);
            }
            if let Some(cmd) = self
                .keys
                .next_key(consts::INPUT_POLL_INTERVAL)?
                .and_then(Command::from_key_event)
            {
                self.handle_command(cmd)?;
            }
        }
    }

    fn handle_command(&mut self, cmd: Command) -> io::Result<()> {
        let Some(direction) = cmd.direction() else {
            let _ = self.session.finish(Ending::Quit);
            return Ok(());
        };
        match self.session.submit(direction) {
            Submission::Accepted { first } => {
                if first {
                    self.start_ticker()?;
                }
                if self.session.policy() == InputPolicy::Queue {
                    self.session.wait_for_tick();
                }
            }
            outcome => debug!(?direction, ?outcome, "Direction not committed"),
        }
        Ok(())
    }

    fn start_ticker(&mut self) -> io::Result<()> {
        let Some(game) = self.game.take() else {
            return Ok(());
        };
        let session = Arc::clone(&self.session);
        let period = self.tick_period;
        let handle = thread::Builder::new()
            .name(String::from("ticker"))
            .spawn(move || session::drive(&session, game, period))?;
        self.ticker = Some(handle);
        Ok(())
    }

    fn join_ticker(&mut self) -> io::Result<()> {
        let Some(handle) = self.ticker.take() else {
            return Ok(());
        };
        match handle.join() {
            Ok(r) => r,
            Err(_) => {
                error!("Tick thread panicked");
                Err(io::Error::other("tick thread panicked"))
            }
        }
    }
}

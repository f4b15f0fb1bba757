//! The state shared between the input thread, the tick thread, and the
//! signal listener
use crate::config::InputPolicy;
use crate::game::{Direction, GameLoop, RandomSource, TickOutcome};
use std::io::{self, Write};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// How a session came to an end
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Ending {
    /// The snake hit the border or itself
    Died { score: usize },
    /// The snake filled the board
    Won { score: usize },
    /// The player pressed the quit key
    Quit,
    /// The process received the given termination signal
    Signalled(i32),
    /// One of the threads failed with an I/O error
    Aborted,
}

/// Outcome of [`Session::submit()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Submission {
    /// The direction was committed.  `first` is true if this is the first
    /// direction of the session, i.e., the ticking should now start.
    Accepted { first: bool },
    /// The snake is already heading that way
    Unchanged,
    /// The direction is the reverse of the current one and the snake is
    /// longer than one cell
    Reversal,
    /// Under [`InputPolicy::Ignore`], the last accepted direction has not
    /// been applied yet
    Locked,
    /// The session is over
    Ended,
}

/// The intent slot: everything the two threads need to agree on
#[derive(Clone, Debug, Eq, PartialEq)]
struct Intent {
    /// The most recently committed direction
    direction: Option<Direction>,

    /// Length of the snake as of the last completed tick
    length: usize,

    /// A direction has been committed but no tick has picked it up yet
    pending: bool,

    /// A tick is between picking up the direction and finishing its frame
    ticking: bool,

    /// Keys are being discarded (only used under [`InputPolicy::Ignore`])
    move_locked: bool,

    ending: Option<Ending>,
}

#[derive(Debug)]
pub(crate) struct Session {
    policy: InputPolicy,
    intent: Mutex<Intent>,
    tick_done: Condvar,
}

impl Session {
    pub(crate) fn new(policy: InputPolicy) -> Session {
        Session {
            policy,
            intent: Mutex::new(Intent {
                direction: None,
                length: 1,
                pending: false,
                ticking: false,
                move_locked: false,
                ending: None,
            }),
            tick_done: Condvar::new(),
        }
    }

    pub(crate) fn policy(&self) -> InputPolicy {
        self.policy
    }

    /// Validate `direction` against the committed direction and, if it is a
    /// real change, commit it for the next tick
    pub(crate) fn submit(&self, direction: Direction) -> Submission {
        let mut intent = self.lock();
        if intent.ending.is_some() {
            Submission::Ended
        } else if self.policy == InputPolicy::Ignore && intent.move_locked {
            Submission::Locked
        } else if intent.direction == Some(direction) {
            Submission::Unchanged
        } else if intent.length > 1 && intent.direction == Some(direction.reverse()) {
            Submission::Reversal
        } else {
            let first = intent.direction.is_none();
            intent.direction = Some(direction);
            intent.pending = true;
            if self.policy == InputPolicy::Ignore {
                intent.move_locked = true;
            }
            Submission::Accepted { first }
        }
    }

    /// Block until the tick that applies the most recently committed
    /// direction has finished, or until the session ends
    pub(crate) fn wait_for_tick(&self) {
        let intent = self.lock();
        let _intent = self
            .tick_done
            .wait_while(intent, |i| (i.pending || i.ticking) && i.ending.is_none())
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Pick up the committed direction for the tick about to run.  Returns
    /// `None` if the session has ended (or, impossibly, if nothing was ever
    /// committed).
    pub(crate) fn begin_tick(&self) -> Option<Direction> {
        let mut intent = self.lock();
        if intent.ending.is_some() {
            return None;
        }
        intent.pending = false;
        intent.ticking = true;
        intent.direction
    }

    /// Publish the snake's new length and wake anyone waiting on the tick
    pub(crate) fn end_tick(&self, length: usize) {
        let mut intent = self.lock();
        intent.length = length;
        intent.ticking = false;
        if !intent.pending {
            intent.move_locked = false;
        }
        self.tick_done.notify_all();
    }

    /// Record how the session ended and wake every waiter.  Only the first
    /// ending sticks; returns `false` if the session had already ended.
    pub(crate) fn finish(&self, ending: Ending) -> bool {
        let mut intent = self.lock();
        if intent.ending.is_some() {
            return false;
        }
        debug!(?ending, "Session ending");
        intent.ending = Some(ending);
        intent.ticking = false;
        self.tick_done.notify_all();
        true
    }

    pub(crate) fn ending(&self) -> Option<Ending> {
        self.lock().ending
    }

    fn lock(&self) -> MutexGuard<'_, Intent> {
        // A panicking thread cannot leave the slot half-updated, so poisoning
        // carries no information here.
        self.intent.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Body of the tick thread: apply the committed direction, sleep, repeat,
/// until the game or the session ends
pub(crate) fn drive<W: Write, R: RandomSource>(
    session: &Session,
    mut game: GameLoop<W, R>,
    period: Duration,
) -> io::Result<()> {
    info!(?period, "Starting to tick");
    while let Some(direction) = session.begin_tick() {
        let ending = match game.tick(direction) {
            Ok(TickOutcome::Moved { length }) => {
                session.end_tick(length);
                thread::sleep(period);
                continue;
            }
            Ok(TickOutcome::Died { score }) => Ending::Died { score },
            Ok(TickOutcome::BoardFull { score }) => Ending::Won { score },
            Err(e) => {
                let _ = session.finish(Ending::Aborted);
                return Err(e);
            }
        };
        let _ = session.finish(ending);
        break;
    }
    Ok(())
}

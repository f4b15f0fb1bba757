use crate::session::{Ending, Session};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use std::io;
use std::sync::Arc;
use std::thread;
use tracing::info;

/// Spawn a thread that ends `session` when the process is asked to interrupt
/// or terminate, so that shutdown goes through the same path as quitting.
///
/// The thread is never joined; it dies with the process.
pub(crate) fn spawn_listener(session: Arc<Session>) -> io::Result<()> {
    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    let _ = thread::Builder::new()
        .name(String::from("signals"))
        .spawn(move || {
            if let Some(signal) = signals.forever().next() {
                info!(signal, "Received termination signal");
                let _ = session.finish(Ending::Signalled(signal));
            }
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InputPolicy;
    use signal_hook::low_level::raise;
    use std::time::{Duration, Instant};

    #[test]
    fn sigterm_ends_session() {
        let session = Arc::new(Session::new(InputPolicy::Queue));
        spawn_listener(Arc::clone(&session)).unwrap();
        raise(SIGTERM).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while session.ending().is_none() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(session.ending(), Some(Ending::Signalled(SIGTERM)));
        assert!(session.begin_tick().is_none());
    }
}

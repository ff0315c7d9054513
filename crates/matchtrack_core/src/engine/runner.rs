//! Real-time driver for a shared engine.
//!
//! The engine itself is single-threaded and tick-driven; this wraps it in
//! `Arc<Mutex<_>>` so a dedicated thread can deliver one tick per second
//! while the host thread keeps issuing mutations. The mutex preserves the
//! synchronous-mutation guarantee under OS threads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::MatchEngine;
use crate::persist::PersistenceGateway;

/// Engine shared between the host thread and the tick thread.
pub type SharedEngine<G> = Arc<Mutex<MatchEngine<G>>>;

/// Repeating tick task owned by the session's lifetime.
///
/// The stop flag is the cancellation token: `stop()` (or drop) sets it and
/// joins the thread, so no timer outlives its session.
pub struct TickRunner {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl TickRunner {
    /// Spawn a thread ticking the engine once per real second.
    pub fn spawn<G>(engine: SharedEngine<G>) -> Self
    where
        G: PersistenceGateway + Send + 'static,
    {
        Self::spawn_with_interval(engine, Duration::from_secs(1))
    }

    /// Same task with a custom interval (tests and fast-forward demos).
    pub fn spawn_with_interval<G>(engine: SharedEngine<G>, interval: Duration) -> Self
    where
        G: PersistenceGateway + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            while !flag.load(Ordering::Relaxed) {
                thread::sleep(interval);
                if flag.load(Ordering::Relaxed) {
                    break;
                }
                engine.lock().unwrap().tick();
            }
        });
        Self { stop, handle: Some(handle) }
    }

    /// Cancel the tick task and wait for it to exit.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for TickRunner {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::models::{MatchSession, RosterPlayer};
    use crate::persist::InMemoryGateway;

    fn shared_engine() -> SharedEngine<InMemoryGateway> {
        let mut gateway = InMemoryGateway::new();
        gateway.seed("m1", MatchSession::new("Lions", "Tigers", "Lions"));
        let roster = vec![RosterPlayer::new("p1", "Player 1", 1)];
        let engine =
            MatchEngine::load(gateway, "m1", roster, EngineConfig::default()).unwrap();
        Arc::new(Mutex::new(engine))
    }

    #[test]
    fn runner_ticks_and_stops_on_drop() {
        let engine = shared_engine();
        engine.lock().unwrap().start_clock().unwrap();

        {
            let runner =
                TickRunner::spawn_with_interval(Arc::clone(&engine), Duration::from_millis(2));
            thread::sleep(Duration::from_millis(100));
            drop(runner); // joins the thread
        }

        let remaining = engine.lock().unwrap().clock().remaining_secs();
        assert!(remaining < 25 * 60);

        // No further ticks after the runner is gone.
        thread::sleep(Duration::from_millis(20));
        assert_eq!(engine.lock().unwrap().clock().remaining_secs(), remaining);
    }

    #[test]
    fn host_can_mutate_while_runner_holds_the_engine() {
        let engine = shared_engine();
        let mut runner =
            TickRunner::spawn_with_interval(Arc::clone(&engine), Duration::from_millis(2));
        engine.lock().unwrap().set_timeout_used(crate::models::Side::Local);
        runner.stop();
        assert!(engine
            .lock()
            .unwrap()
            .session()
            .timeouts
            .get(crate::models::Period::FirstHalf)
            .local);
    }
}

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use flume::{Receiver, RecvTimeoutError, Sender};

use crate::interfaces::surface::Surface;

use super::Poller;

/// Handle to a running poll loop
///
/// Dropping the handle also stops the loop once the current tick is done.
pub struct PollHandle<S: Surface> {
    stop_tx: Sender<()>,
    thread: JoinHandle<Poller<S>>,
}

impl<S: Surface + Send + 'static> Poller<S> {
    /// Poll once right away, then once per `interval` until stopped
    ///
    /// Ticks follow a fixed-rate deadline. A tick that overruns the interval delays the
    /// next one rather than overlapping it; missed ticks are skipped, not queued.
    pub fn start(mut self, interval: Duration) -> Result<PollHandle<S>> {
        if interval.is_zero() {
            return Err(anyhow!("poll interval must be greater than zero"));
        }
        let (stop_tx, stop_rx) = flume::bounded(1);
        log::info!("Starting poll loop every {} ms", interval.as_millis());

        let thread = thread::Builder::new()
            .name("poller".to_string())
            .spawn(move || {
                run_schedule(&mut self, interval, &stop_rx);
                self
            })?;

        Ok(PollHandle { stop_tx, thread })
    }
}

impl<S: Surface> PollHandle<S> {
    /// Stop the loop and hand the poller back
    pub fn stop(self) -> Result<Poller<S>> {
        self.stop_tx.try_send(()).ok();
        self.thread
            .join()
            .map_err(|_| anyhow!("poll loop thread panicked"))
    }

    /// Block until the loop ends; it only ends on a panic
    pub fn wait(self) -> Result<()> {
        let PollHandle { stop_tx, thread } = self;
        let joined = thread.join();
        drop(stop_tx);
        joined
            .map(|_| ())
            .map_err(|_| anyhow!("poll loop thread panicked"))
    }
}

fn run_schedule<S: Surface>(poller: &mut Poller<S>, interval: Duration, stop_rx: &Receiver<()>) {
    let mut next_tick = Instant::now();
    loop {
        poller.poll();

        next_tick += interval;
        let now = Instant::now();
        if next_tick <= now {
            let mut skipped = 0;
            while next_tick <= now {
                next_tick += interval;
                skipped += 1;
            }
            log::warn!("Poll overran its interval; skipped {} tick(s)", skipped);
        }

        match stop_rx.recv_deadline(next_tick) {
            Err(RecvTimeoutError::Timeout) => continue,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    log::info!("Poll loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::interfaces::surface::MemorySurface;
    use crate::poller::ErrorPolicy;
    use crate::settings::Settings;

    fn poller_for(base_url: String) -> Poller<MemorySurface> {
        let settings = Settings {
            base_url,
            path: "last".to_string(),
            ..Default::default()
        };
        Poller::from_settings(&settings, MemorySurface::new()).unwrap()
    }

    #[test]
    fn test_first_poll_is_immediate() {
        let mut server = mockito::Server::new();
        let m = server
            .mock("GET", "/last.json")
            .with_body(r#"{"air_temp": 20.0}"#)
            .expect(1)
            .create();

        let handle = poller_for(server.url())
            .start(Duration::from_secs(3600))
            .unwrap();
        thread::sleep(Duration::from_millis(300));
        let poller = handle.stop().unwrap();

        m.assert();
        assert!(poller.status().reachable);
        assert_eq!(poller.temperature_window().values(), vec![20.0]);
    }

    #[test]
    fn test_loop_survives_failures() {
        let mut server = mockito::Server::new();
        let m = server
            .mock("GET", "/last.json")
            .with_status(500)
            .expect_at_least(3)
            .create();

        let handle = poller_for(server.url())
            .start(Duration::from_millis(50))
            .unwrap();
        thread::sleep(Duration::from_millis(500));
        let poller = handle.stop().unwrap();

        m.assert();
        assert!(!poller.status().reachable);
        assert!(poller.surface().frames >= 3);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let settings = Settings::default();
        let poller = Poller::new(
            crate::interfaces::rtdb::RtdbClient::new(&settings).unwrap(),
            ErrorPolicy::Preserve,
            30,
            MemorySurface::new(),
        );
        assert!(poller.start(Duration::ZERO).is_err());
    }
}

//! Simulated sensor feed.
//!
//! [`Simulator`] is a bounded random walk over the five parameters with
//! occasional spikes, so alarms show up without real hardware.
//! [`SimulatedSource`] drives it from a periodic tokio task and exposes the
//! readings through a [`ChannelSource`].

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::{ChannelSource, ReadingSource};
use crate::data::{now_ms, Reading};

/// Interval between simulated readings.
pub const DEFAULT_TICK: Duration = Duration::from_millis(3000);

/// Chance per step that one of the spiking parameters jumps.
const SPIKE_PROBABILITY: f64 = 0.05;

/// Parameters that can spike, picked uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Spike {
    Temperature,
    Ammonia,
    Nitrite,
}

/// Random-walk generator of readings.
#[derive(Debug)]
pub struct Simulator {
    rng: StdRng,
    last: Reading,
}

impl Simulator {
    /// Create a simulator continuing from `initial`.
    ///
    /// With a seed the sequence of values is reproducible.
    pub fn new(initial: Reading, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, last: initial }
    }

    /// The most recently produced reading.
    pub fn last(&self) -> &Reading {
        &self.last
    }

    /// Produce the next reading, stamped with `timestamp_ms`.
    ///
    /// Timestamps never go backwards: if the clock stepped back, the
    /// reading carries the previous timestamp instead.
    pub fn step(&mut self, timestamp_ms: i64) -> Reading {
        let timestamp_ms = timestamp_ms.max(self.last.timestamp_ms);
        let spike = if self.rng.gen_bool(SPIKE_PROBABILITY) {
            Some(match self.rng.gen_range(0..3) {
                0 => Spike::Ammonia,
                1 => Spike::Nitrite,
                _ => Spike::Temperature,
            })
        } else {
            None
        };
        let range = |normal: f64, spiked: f64, param: Spike| {
            if spike == Some(param) {
                spiked
            } else {
                normal
            }
        };

        let prev = self.last;
        let temperature = self.wander(prev.temperature, range(0.2, 2.0, Spike::Temperature));
        let ph = self.wander(prev.ph, 0.1);
        let ammonia = self.wander(prev.ammonia, range(0.05, 0.6, Spike::Ammonia));
        let nitrite = self.wander(prev.nitrite, range(0.02, 0.6, Spike::Nitrite));
        let nitrate = self.wander(prev.nitrate, 1.0);

        let next = Reading::new(
            timestamp_ms,
            round_to(temperature, 2),
            round_to(ph, 2),
            round_to(ammonia, 3),
            round_to(nitrite, 3),
            round_to(nitrate, 2),
        );
        if let Some(param) = spike {
            debug!(?param, "simulated spike");
        }
        self.last = next;
        next
    }

    /// Move `value` by a uniform offset in `[-range/2, range/2)`.
    fn wander(&mut self, value: f64, range: f64) -> f64 {
        value + (self.rng.gen::<f64>() - 0.5) * range
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// A [`ReadingSource`] fed by a periodic simulator task.
///
/// Owns at most one running task. Restarting replaces the previous task,
/// and stopping or dropping the source aborts it.
#[derive(Debug)]
pub struct SimulatedSource {
    inner: ChannelSource,
    sender: mpsc::UnboundedSender<Reading>,
    simulator: Arc<Mutex<Simulator>>,
    task: Option<JoinHandle<()>>,
    interval: Duration,
}

impl SimulatedSource {
    /// Start a simulator task producing one reading per `interval`.
    ///
    /// Must be called from within a tokio runtime. The first reading is
    /// produced one full interval after the start.
    pub fn spawn(interval: Duration, seed: Option<u64>, initial: Reading) -> Self {
        let (sender, inner) = ChannelSource::create("simulator");
        let mut source = Self {
            inner,
            sender,
            simulator: Arc::new(Mutex::new(Simulator::new(initial, seed))),
            task: None,
            interval,
        };
        source.restart(interval);
        source
    }

    /// Replace the running task with one ticking at `interval`.
    ///
    /// The random walk continues from the last produced reading.
    pub fn restart(&mut self, interval: Duration) {
        self.abort();
        self.interval = interval;

        let sender = self.sender.clone();
        let simulator = Arc::clone(&self.simulator);
        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let reading = match simulator.lock() {
                    Ok(mut sim) => sim.step(now_ms()),
                    Err(_) => break,
                };
                if sender.send(reading).is_err() {
                    break;
                }
            }
        }));
        info!(interval_ms = interval.as_millis() as u64, "simulator started");
    }

    /// Whether a task is currently scheduled.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    fn abort(&mut self) -> bool {
        match self.task.take() {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }
}

impl ReadingSource for SimulatedSource {
    fn poll(&mut self) -> Option<Reading> {
        self.inner.poll()
    }

    fn description(&self) -> &str {
        self.inner.description()
    }

    fn error(&self) -> Option<&str> {
        self.inner.error()
    }

    fn stop(&mut self) {
        if self.abort() {
            info!("simulator stopped");
        }
    }
}

impl Drop for SimulatedSource {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::History;

    #[test]
    fn test_seeded_simulator_is_reproducible() {
        let start = Reading::baseline(0);
        let mut a = Simulator::new(start, Some(7));
        let mut b = Simulator::new(start, Some(7));

        for ts in 1..20 {
            assert_eq!(a.step(ts), b.step(ts));
        }
        assert_eq!(a.last().timestamp_ms, 19);
    }

    #[test]
    fn test_simulator_steps_stay_bounded() {
        let mut sim = Simulator::new(Reading::baseline(0), Some(42));
        let mut prev = *sim.last();

        for ts in 1..500 {
            let next = sim.step(ts);
            // Largest spiked half-range is 1.0 (temperature); allow rounding slack
            assert!((next.temperature - prev.temperature).abs() <= 1.0 + 0.005);
            assert!((next.ph - prev.ph).abs() <= 0.05 + 0.005);
            assert!((next.nitrate - prev.nitrate).abs() <= 0.5 + 0.005);
            assert!(next.ammonia >= 0.0);
            assert!(next.nitrite >= 0.0);
            assert!(next.nitrate >= 0.0);
            prev = next;
        }
    }

    #[test]
    fn test_clock_stepping_back_keeps_history_ordered() {
        let start = Reading::baseline(10_000);
        let mut history = History::new();
        history.append(start).unwrap();

        let mut sim = Simulator::new(start, Some(11));
        let first = sim.step(9_000);
        let second = sim.step(9_500);
        assert_eq!(first.timestamp_ms, 10_000);
        assert_eq!(second.timestamp_ms, 10_000);
        history.append(first).unwrap();
        history.append(second).unwrap();

        // Once the clock catches up, real timestamps resume
        let third = sim.step(12_000);
        assert_eq!(third.timestamp_ms, 12_000);
        history.append(third).unwrap();
        assert_eq!(history.len(), 4);
    }

    #[test]
    fn test_simulator_rounds_values() {
        let mut sim = Simulator::new(Reading::baseline(0), Some(3));
        for ts in 1..50 {
            let r = sim.step(ts);
            assert_eq!(r.temperature, round_to(r.temperature, 2));
            assert_eq!(r.ph, round_to(r.ph, 2));
            assert_eq!(r.ammonia, round_to(r.ammonia, 3));
            assert_eq!(r.nitrite, round_to(r.nitrite, 3));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_source_ticks() {
        let mut source =
            SimulatedSource::spawn(Duration::from_millis(100), Some(1), Reading::baseline(0));
        assert!(source.is_running());

        // Nothing before the first full interval
        tokio::task::yield_now().await;
        assert!(source.poll().is_none());

        tokio::time::sleep(Duration::from_millis(350)).await;
        let mut count = 0;
        while source.poll().is_some() {
            count += 1;
        }
        assert_eq!(count, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_source_stop() {
        let mut source =
            SimulatedSource::spawn(Duration::from_millis(100), Some(1), Reading::baseline(0));
        tokio::time::sleep(Duration::from_millis(150)).await;
        source.stop();
        assert!(!source.is_running());

        // The reading produced before stopping is still delivered
        assert!(source.poll().is_some());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(source.poll().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_source_restart_replaces_task() {
        let mut source =
            SimulatedSource::spawn(Duration::from_millis(100), Some(1), Reading::baseline(0));
        source.restart(Duration::from_millis(1000));
        assert_eq!(source.interval(), Duration::from_millis(1000));

        // Only the new, slower task is producing
        tokio::time::sleep(Duration::from_millis(1050)).await;
        let mut count = 0;
        while source.poll().is_some() {
            count += 1;
        }
        assert_eq!(count, 1);
    }
}

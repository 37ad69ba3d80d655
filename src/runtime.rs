use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use crate::config::clamp_tick_rate;
use crate::engine::Engine;

fn lock(engine: &Mutex<Engine>) -> MutexGuard<'_, Engine> {
    engine.lock().unwrap_or_else(PoisonError::into_inner)
}

fn period_for(rate_hz: f64) -> Duration {
    Duration::from_secs_f64(1.0 / clamp_tick_rate(rate_hz))
}

fn interval_for(rate_hz: f64) -> Interval {
    let period = period_for(rate_hz);
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

struct Running {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

/// Drives an [`Engine`] from wall-clock time.
///
/// One task per running driver waits on an interval and ticks the engine
/// under its mutex, so ticks never overlap. Rate changes retime the interval
/// in place; the tick sequence itself never skips or repeats. A rate set
/// through [`Engine::set_tick_rate`] while running takes effect after the
/// next tick.
pub struct TickDriver {
    engine: Arc<Mutex<Engine>>,
    handle: Handle,
    rate: watch::Sender<f64>,
    running: Option<Running>,
}

impl TickDriver {
    pub fn new(engine: Arc<Mutex<Engine>>, handle: Handle) -> Self {
        let rate = lock(&engine).tick_rate();
        let (rate, _) = watch::channel(rate);
        Self {
            engine,
            handle,
            rate,
            running: None,
        }
    }

    /// Start ticking. Returns `false` if already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        let (stop, mut stopped) = oneshot::channel();
        let engine = Arc::clone(&self.engine);
        let hz = {
            let mut engine = lock(&engine);
            engine.set_running(true);
            engine.tick_rate()
        };
        self.rate.send_replace(hz);
        let mut rate = self.rate.subscribe();

        let task = self.handle.spawn(async move {
            let mut current = *rate.borrow_and_update();
            let mut interval = interval_for(current);
            loop {
                tokio::select! {
                    biased;
                    _ = &mut stopped => break,
                    changed = rate.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let hz = *rate.borrow_and_update();
                        if hz != current {
                            current = hz;
                            interval = interval_for(current);
                            tracing::debug!(hz = current, "tick rate changed");
                        }
                    }
                    _ = interval.tick() => {
                        let hz = {
                            let mut engine = lock(&engine);
                            engine.tick();
                            engine.tick_rate()
                        };
                        // Rate set directly on the engine rather than through the driver.
                        if hz != current {
                            current = hz;
                            interval = interval_for(current);
                            tracing::debug!(hz = current, "tick rate changed on engine");
                        }
                    }
                }
            }
        });
        self.running = Some(Running { stop, task });
        tracing::info!(hz = *self.rate.borrow(), "tick driver started");
        true
    }

    /// Stop ticking. Returns `false` if already stopped.
    pub fn stop(&mut self) -> bool {
        let Some(running) = self.running.take() else {
            return false;
        };
        let _ = running.stop.send(());
        running.task.abort();
        lock(&self.engine).set_running(false);
        tracing::info!("tick driver stopped");
        true
    }

    /// Change the wall-clock rate, running or not. Returns the clamped rate.
    pub fn set_tick_rate(&self, hz: f64) -> f64 {
        let rate = lock(&self.engine).set_tick_rate(hz);
        self.rate.send_replace(rate);
        rate
    }

    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|r| !r.task.is_finished())
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use polis_sim::{NotificationOutbox, NotifyError, TickDriver};
use tokio::runtime::Handle;
use tokio::time;

fn recorder(engine: &mut polis_sim::Engine) -> Arc<Mutex<Vec<u64>>> {
    let ticks = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&ticks);
    engine.subscribe(Box::new(move |delta| sink.lock().unwrap().push(delta.tick())));
    ticks
}

#[tokio::test(start_paused = true)]
async fn rate_change_keeps_tick_sequence_contiguous() {
    let mut engine = common::engine(31, 30);
    let ticks = recorder(&mut engine);
    let engine = Arc::new(Mutex::new(engine));
    let mut driver = TickDriver::new(Arc::clone(&engine), Handle::current());

    driver.start();
    time::sleep(Duration::from_millis(3_500)).await;
    let slow = ticks.lock().unwrap().len();
    assert_eq!(slow, 3);

    assert_eq!(driver.set_tick_rate(10.0), 10.0);
    time::sleep(Duration::from_millis(1_050)).await;
    driver.stop();

    let seen = ticks.lock().unwrap().clone();
    assert_eq!(seen.len() - slow, 10);
    let expected: Vec<u64> = (1..=seen.len() as u64).collect();
    assert_eq!(seen, expected, "no gap or duplicate across the rate change");
    assert_eq!(engine.lock().unwrap().world().clock.tick_rate_hz, 10.0);
}

#[tokio::test(start_paused = true)]
async fn rate_set_on_engine_retimes_running_driver() {
    let mut engine = common::engine(34, 30);
    let ticks = recorder(&mut engine);
    let engine = Arc::new(Mutex::new(engine));
    let mut driver = TickDriver::new(Arc::clone(&engine), Handle::current());

    driver.start();
    time::sleep(Duration::from_millis(1_500)).await;
    assert_eq!(engine.lock().unwrap().set_tick_rate(10.0), 10.0);
    time::sleep(Duration::from_millis(2_050)).await;
    driver.stop();

    // One more tick on the old 1 s period at t=2.0, then every 100 ms through t=3.5.
    let seen = ticks.lock().unwrap().clone();
    assert!(
        seen.len() >= 15,
        "only {} ticks after the rate change",
        seen.len()
    );
    let expected: Vec<u64> = (1..=seen.len() as u64).collect();
    assert_eq!(seen, expected);
}

#[tokio::test(start_paused = true)]
async fn rate_is_clamped_while_running() {
    let engine = Arc::new(Mutex::new(common::engine(32, 10)));
    let mut driver = TickDriver::new(Arc::clone(&engine), Handle::current());
    driver.start();
    assert_eq!(driver.set_tick_rate(1_000.0), 10.0);
    assert_eq!(driver.set_tick_rate(0.0), 0.1);
    time::sleep(Duration::from_secs(25)).await;
    driver.stop();
    assert_eq!(engine.lock().unwrap().world().tick(), 2);
}

#[tokio::test(start_paused = true)]
async fn failing_notifier_never_stalls_ticks() {
    let attempts = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&attempts);
    let notifier = move |_message: &str| -> Result<(), NotifyError> {
        *counter.lock().unwrap() += 1;
        Err(NotifyError::Unavailable("webhook down".to_string()))
    };
    let outbox = NotificationOutbox::spawn(Arc::new(notifier), &Handle::current());

    let mut engine = common::engine(33, 50);
    engine.attach_notifier(outbox);
    let ticks = recorder(&mut engine);
    let engine = Arc::new(Mutex::new(engine));
    let mut driver = TickDriver::new(Arc::clone(&engine), Handle::current());
    driver.set_tick_rate(10.0);
    driver.start();
    time::sleep(Duration::from_millis(30_050)).await;
    driver.stop();

    assert_eq!(ticks.lock().unwrap().len(), 300);
    assert!(*attempts.lock().unwrap() > 0);
}

#[tokio::test]
async fn stuck_notifier_keeps_ticks_and_queue_bounded() {
    let entered = Arc::new(AtomicUsize::new(0));
    let (release, gate) = std::sync::mpsc::channel::<()>();
    let gate = Mutex::new(gate);
    let calls = Arc::clone(&entered);
    let notifier = move |_message: &str| -> Result<(), NotifyError> {
        calls.fetch_add(1, Ordering::SeqCst);
        let _ = gate.lock().unwrap().recv();
        Ok(())
    };
    let outbox = NotificationOutbox::with_capacity(Arc::new(notifier), &Handle::current(), 4);
    let mut engine = common::engine(35, 50);
    engine.attach_notifier(outbox.clone());

    common::run(&mut engine, 1_000);
    for _ in 0..1_000 {
        if entered.load(Ordering::SeqCst) > 0 {
            break;
        }
        time::sleep(Duration::from_millis(1)).await;
    }
    assert_eq!(
        entered.load(Ordering::SeqCst),
        1,
        "worker is stuck on its first delivery"
    );

    let deltas = common::run(&mut engine, 2_000);
    assert_eq!(deltas.last().map(|d| d.tick()), Some(3_000));
    assert_eq!(outbox.queued(), 4);
    drop(release);
}

//! Run a city at 10 ticks per second for a few seconds and print a summary
//! line every ten ticks.
//!
//! ```text
//! RUST_LOG=polis_sim=info cargo run --example city_watch -- [seed]
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use polis_sim::{
    BaselineScorer, Engine, NotificationOutbox, NotifyError, SimConfig, TickDriver,
};
use tokio::runtime::Handle;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let seed = std::env::args()
        .nth(1)
        .map(|s| s.parse::<u64>())
        .transpose()?
        .unwrap_or(42);
    let mut engine = Engine::new(SimConfig::with_seed(seed))?;
    engine.set_scorer(Box::new(BaselineScorer));
    engine.attach_notifier(NotificationOutbox::spawn(
        Arc::new(|message: &str| -> Result<(), NotifyError> {
            println!("  >> {message}");
            Ok(())
        }),
        &Handle::current(),
    ));
    engine.subscribe(Box::new(|delta| {
        if delta.tick() % 10 != 0 {
            return;
        }
        let prosperity = delta
            .scores
            .as_ref()
            .and_then(|s| s.metrics.get("prosperity").copied())
            .unwrap_or_default();
        println!(
            "tick {:>4} | {:<16} | pop {:>3} | stability {:.2} | inequality {:.2} | prosperity {:.2} | laws {} | buildings {}",
            delta.tick(),
            delta.clock.governance_mode.as_str(),
            delta.population.active,
            delta.clock.stability_index,
            delta.economy.inequality_index,
            prosperity,
            delta.laws.len(),
            delta.buildings.len(),
        );
    }));

    let engine = Arc::new(Mutex::new(engine));
    let mut driver = TickDriver::new(Arc::clone(&engine), Handle::current());
    driver.set_tick_rate(10.0);
    driver.start();
    tokio::time::sleep(Duration::from_secs(6)).await;
    driver.stop();
    Ok(())
}

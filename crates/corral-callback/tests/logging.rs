use corral_callback::{DryRunSimulator, Simulator};
use std::sync::{Arc, Mutex};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[derive(Clone, Default)]
struct SeenLevels(Arc<Mutex<Vec<(String, Level)>>>);

impl<S: Subscriber> Layer<S> for SeenLevels {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if let Ok(mut seen) = self.0.lock() {
            let meta = event.metadata();
            seen.push((meta.target().to_string(), *meta.level()));
        }
    }
}

#[test]
fn dry_run_commands_log_at_debug() {
    let levels = SeenLevels::default();
    let subscriber = tracing_subscriber::registry().with(levels.clone());

    tracing::subscriber::with_default(subscriber, || {
        let mut sim = DryRunSimulator::new();
        let _ = sim.execute_cmd("/fill 0 0 0 1 1 1 minecraft:glass");
    });

    let seen = levels.0.lock().map(|seen| seen.clone()).unwrap_or_default();
    assert!(
        seen.iter()
            .any(|(target, level)| target == "corral_callback::simulator" && *level == Level::DEBUG)
    );
    assert!(!seen.iter().any(|(_, level)| *level == Level::INFO));
}

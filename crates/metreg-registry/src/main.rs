//! metreg probe
//!
//! Exercise harness for the registry:
//! - Load config (first CLI arg, defaults when absent)
//! - Spawn worker tasks that race first-use registration on shared names
//! - Log how many distinct instances each name ended up with (must be 1)

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

use metreg_core::metric::{Counter, Timer};
use metreg_core::MetricName;
use metreg_registry::{config, MetricRegistry};

const WORKERS: usize = 16;
const ROUNDS: usize = 1_000;

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = match std::env::args().nth(1) {
        Some(path) => config::load_from_file(&path).expect("config load failed"),
        None => config::RegistryConfig::default(),
    };
    let registry = Arc::new(MetricRegistry::from_config(&cfg).expect("registry init failed"));
    let metrics = registry.builder(MetricName::new(["probe"]).expect("static name"));

    tracing::info!(workers = WORKERS, rounds = ROUNDS, "metreg-probe starting");

    let mut handles = Vec::with_capacity(WORKERS);
    for worker in 0..WORKERS {
        let metrics = metrics.clone();
        handles.push(tokio::spawn(async move {
            let requests = metrics.counter("requests").expect("counter");
            let latency = metrics.timer("latency").expect("timer");
            let inflight = metrics.gauge("inflight").expect("gauge");
            for round in 0..ROUNDS {
                inflight.add(1);
                latency.update(Duration::from_micros(((worker * ROUNDS + round) % 5_000) as u64));
                requests.inc();
                inflight.add(-1);
            }
            (requests, latency)
        }));
    }

    let mut seen: Vec<(Arc<Counter>, Arc<Timer>)> = Vec::with_capacity(WORKERS);
    for h in handles {
        seen.push(h.await.expect("worker panicked"));
    }

    let distinct_counters = distinct(seen.iter().map(|(c, _)| c));
    let distinct_timers = distinct(seen.iter().map(|(_, t)| t));

    for (key, metric) in registry.metrics() {
        tracing::info!(metric = %key, kind = %metric.kind(), "registered");
    }
    let (requests, latency) = &seen[0];
    let snap = latency.snapshot();
    tracing::info!(
        distinct_counters,
        distinct_timers,
        requests = requests.count(),
        timed = latency.count(),
        retained = snap.size(),
        mean_ns = snap.mean().unwrap_or_default(),
        "metreg-probe finished"
    );
}

fn distinct<'a, T: 'a>(items: impl Iterator<Item = &'a Arc<T>>) -> usize {
    let mut uniq: Vec<&Arc<T>> = Vec::new();
    for item in items {
        if !uniq.iter().any(|u| Arc::ptr_eq(u, item)) {
            uniq.push(item);
        }
    }
    uniq.len()
}

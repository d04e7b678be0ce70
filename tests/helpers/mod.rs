#![allow(dead_code)]

use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use logbroker::brokers::log::BrokerCore;
use logbroker::config::BrokerConfig;
use logbroker::BrokerEngine;

pub fn setup_core() -> BrokerCore {
    BrokerCore::new(BrokerConfig::default())
}

pub fn setup_engine() -> BrokerEngine {
    BrokerEngine::new(BrokerConfig::default())
}

/// Drains everything currently available for `consumer_id`.
pub fn drain(core: &BrokerCore, consumer_id: &str) -> Vec<(u64, String)> {
    let mut out = Vec::new();
    while let Some(msg) = core.consume(consumer_id).unwrap() {
        out.push((msg.offset, msg.value));
    }
    out
}

/// Per-topic latency samples for a load run, printed as one block per topic.
pub struct LoadReport {
    pub label: String,
    pub started: Instant,
    pub per_topic: BTreeMap<String, Vec<Duration>>,
}

impl LoadReport {
    pub fn begin(label: &str) -> Self {
        Self {
            label: label.to_string(),
            started: Instant::now(),
            per_topic: BTreeMap::new(),
        }
    }

    pub fn record(&mut self, topic: &str, latency: Duration) {
        self.per_topic.entry(topic.to_string()).or_default().push(latency);
    }

    pub fn ops(&self) -> usize {
        self.per_topic.values().map(Vec::len).sum()
    }

    /// Prints the report and returns the total number of recorded ops.
    pub fn finish(mut self) -> usize {
        let wall = self.started.elapsed().as_secs_f64().max(f64::EPSILON);
        let total = self.ops();

        println!("\n{} ({} ops in {:.2}s, {:.0} ops/sec)", self.label, total, wall, total as f64 / wall);
        for (topic, samples) in self.per_topic.iter_mut() {
            samples.sort();
            let pick = |pct: usize| samples.get(samples.len() * pct / 100).copied().unwrap_or_default();
            let busy: Duration = samples.iter().sum();
            println!(
                " {:<10} {:>7} ops | {:>10.0} ops/sec busy | p50 {}µs | p99 {}µs",
                topic,
                samples.len(),
                samples.len() as f64 / busy.as_secs_f64().max(f64::EPSILON),
                pick(50).as_micros(),
                pick(99).as_micros(),
            );
        }
        total
    }
}

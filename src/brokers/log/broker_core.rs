//! Broker Core: topics, registries and the produce/consume protocol
//!
//! Locking:
//! - Every topic owns one `Mutex<TopicState>` guarding its log AND the
//!   cursors of the consumers bound to it. Produce and Consume on the same
//!   topic serialize on it, which is what makes "offset = current length"
//!   and "compare cursor to length, read, advance" atomic.
//! - The registries sit behind their own `RwLock`s. Lock order is always
//!   registry -> topic. The data path (produce/consume) never holds a
//!   registry lock while it takes a topic lock.
//! - Topic handles are cloned out of the `DashMap` before locking, so no
//!   shard lock is held across a topic lock.

use std::sync::Arc;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use crate::brokers::log::consumer_registry::{ConsumerRegistry, ConsumerState, CursorTable};
use crate::brokers::log::error::{BrokerError, BrokerResult};
use crate::brokers::log::message::Message;
use crate::brokers::log::producer_registry::ProducerRegistry;
use crate::brokers::log::snapshot::BrokerStats;
use crate::brokers::log::topic_log::{LogStore, TopicLog};
use crate::config::BrokerConfig;

struct TopicState<L> {
    log: L,
    cursors: CursorTable,
}

type TopicHandle<L> = Arc<Mutex<TopicState<L>>>;

pub struct BrokerCore<L: LogStore = TopicLog> {
    topics: DashMap<String, TopicHandle<L>>,
    consumers: RwLock<ConsumerRegistry>,
    producers: RwLock<ProducerRegistry>,
    config: BrokerConfig,
}

impl BrokerCore<TopicLog> {
    pub fn new(config: BrokerConfig) -> Self {
        Self::with_store(config)
    }
}

impl Default for BrokerCore<TopicLog> {
    fn default() -> Self {
        Self::new(BrokerConfig::default())
    }
}

impl<L: LogStore> BrokerCore<L> {
    /// Builds a core whose topics are backed by `L`.
    pub fn with_store(config: BrokerConfig) -> Self {
        Self {
            topics: DashMap::new(),
            consumers: RwLock::new(ConsumerRegistry::new()),
            producers: RwLock::new(ProducerRegistry::new()),
            config,
        }
    }

    // --- Topics ---

    /// Idempotent. Returns `true` when the topic did not exist yet.
    pub fn register_topic(&self, name: &str) -> bool {
        self.ensure_topic(name).1
    }

    pub fn topic_exists(&self, name: &str) -> bool {
        self.topics.contains_key(name)
    }

    pub fn topic_len(&self, name: &str) -> Option<u64> {
        self.topic(name).map(|state| state.lock().log.len())
    }

    // --- Registration ---

    /// Auto-creates the topic. Returns the resolved producer id.
    pub fn register_producer(&self, topic: &str, producer_id: Option<&str>) -> String {
        self.ensure_topic(topic);
        let mut producers = self.producers.write();
        let id = producers.register(topic, producer_id, &self.config);
        let total = producers.len();
        drop(producers);

        info!("[Broker] Producer '{}' registered on topic '{}' ({} producers)", id, topic, total);
        id
    }

    /// Auto-creates the topic and (re)starts the consumer at offset 0.
    /// A consumer re-registered on another topic moves its cursor there.
    pub fn register_consumer(&self, topic: &str, consumer_id: Option<&str>) -> String {
        let (state, _) = self.ensure_topic(topic);

        let mut consumers = self.consumers.write();
        let id = consumers.resolve_id(consumer_id, &self.config);

        // Cursor first, binding second: a concurrent consume that sees the
        // new binding always finds a cursor there.
        state.lock().cursors.reset(&id);
        if let Some(previous) = consumers.bind(id.clone(), topic.to_string()) {
            if previous != topic {
                if let Some(old) = self.topic(&previous) {
                    old.lock().cursors.remove(&id);
                }
            }
        }
        let total = consumers.len();
        drop(consumers);

        info!("[Broker] Consumer '{}' registered on topic '{}' at offset 0 ({} consumers)", id, topic, total);
        id
    }

    pub fn consumer(&self, consumer_id: &str) -> Option<ConsumerState> {
        let consumers = self.consumers.read();
        let topic = consumers.topic_of(consumer_id)?;
        let offset = self.topic(topic)?.lock().cursors.offset(consumer_id)?;
        Some(ConsumerState {
            topic: topic.to_string(),
            offset,
        })
    }

    pub fn producer_topic(&self, producer_id: &str) -> Option<String> {
        self.producers.read().topic_of(producer_id).map(str::to_owned)
    }

    // --- Data path ---

    /// Appends to a registered topic and returns the assigned offset.
    pub fn produce(&self, topic: &str, value: String, key: Option<String>) -> BrokerResult<u64> {
        let state = self
            .topic(topic)
            .ok_or_else(|| BrokerError::TopicNotFound(topic.to_string()))?;

        let offset = state.lock().log.append(value, key);
        debug!("[Broker] Produced offset {} on topic '{}'", offset, topic);
        Ok(offset)
    }

    /// Next message for the consumer, or `None` when it is caught up.
    pub fn consume(&self, consumer_id: &str) -> BrokerResult<Option<Message>> {
        loop {
            let topic = self
                .consumers
                .read()
                .topic_of(consumer_id)
                .map(str::to_owned)
                .ok_or_else(|| BrokerError::ConsumerNotFound(consumer_id.to_string()))?;

            let state = self
                .topic(&topic)
                .ok_or_else(|| BrokerError::ConsumerNotFound(consumer_id.to_string()))?;
            let mut guard = state.lock();
            let TopicState { log, cursors } = &mut *guard;

            // Rebound to another topic between the lookup and the lock.
            let Some(offset) = cursors.offset(consumer_id) else {
                continue;
            };

            if offset >= log.len() {
                return Ok(None);
            }

            let message = log.at(offset);
            if message.is_some() {
                cursors.advance(consumer_id);
                debug!("[Broker] Consumer '{}' read offset {} on topic '{}'", consumer_id, offset, topic);
            }
            return Ok(message);
        }
    }

    // --- Stats ---

    pub fn stats(&self) -> BrokerStats {
        let mut stats = BrokerStats::default();

        for (id, topic) in self.producers.read().iter() {
            stats.producers.insert(id.clone(), topic.clone());
        }

        // Held for the whole pass so no consumer is rebound mid-snapshot.
        let consumers = self.consumers.read();
        let handles: Vec<(String, TopicHandle<L>)> = self
            .topics
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();

        for (name, state) in handles {
            let guard = state.lock();
            stats.topics.insert(name.clone(), guard.log.len());
            for (id, offset) in guard.cursors.iter() {
                if consumers.topic_of(id) == Some(name.as_str()) {
                    stats.consumers.insert(
                        id.clone(),
                        ConsumerState {
                            topic: name.clone(),
                            offset: *offset,
                        },
                    );
                }
            }
        }

        stats
    }

    // --- Internal ---

    fn topic(&self, name: &str) -> Option<TopicHandle<L>> {
        self.topics.get(name).map(|entry| entry.value().clone())
    }

    fn ensure_topic(&self, name: &str) -> (TopicHandle<L>, bool) {
        let mut created = false;
        let state = self
            .topics
            .entry(name.to_string())
            .or_insert_with(|| {
                created = true;
                Arc::new(Mutex::new(TopicState {
                    log: L::open(name),
                    cursors: CursorTable::default(),
                }))
            })
            .value()
            .clone();

        if created {
            info!("[Broker] Created topic '{}'", name);
        }
        (state, created)
    }
}

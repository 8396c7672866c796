//! Multi producer / multi consumer drill over [`ThreadSafeDeque`].
//!
//! Every producer pushes `1..=k` followed by one sentinel. Consumers drain
//! until all sentinels have been seen, then the run checks that nothing was
//! lost or claimed twice.

use std::fmt;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context};

use crate::kits::{Shared, ThreadSafeDeque};

pub use config::*;

mod config;
pub mod consts;
mod consumer;
mod producer;

/// What travels through the deque during a drill. Not `Clone`, each item is
/// owned by exactly one place at a time.
#[derive(PartialEq, Eq, Debug)]
pub enum Item {
    Value(i64),
    /// a producer has pushed all of its values
    Sentinel,
    /// tells a blocked consumer to leave, used by [`ConsumeMode::Wait`]
    Stop,
}

/// Per consumer counts, sent back to the coordinator when the consumer exits.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub items: usize,
    pub total: i64,
    pub sentinels: usize,
}

impl Tally {
    fn merge(&mut self, other: &Tally) {
        self.items += other.items;
        self.total += other.total;
        self.sentinels += other.sentinels;
    }
}

#[derive(Debug, Clone)]
pub struct Report {
    pub mode: ConsumeMode,
    pub producers: usize,
    pub consumers: usize,
    pub tally: Tally,
    pub expected_items: usize,
    pub expected_total: i64,
    /// elements still in the deque after every thread joined
    pub left_over: usize,
    pub elapsed: Duration,
}

impl Report {
    pub fn is_conserved(&self) -> bool {
        self.tally.items == self.expected_items
            && self.tally.total == self.expected_total
            && self.tally.sentinels == self.producers
            && self.left_over == 0
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mode {} producers {} consumers {}: items {}/{} total {}/{} sentinels {}/{} left {} in {:?}",
            self.mode,
            self.producers,
            self.consumers,
            self.tally.items,
            self.expected_items,
            self.tally.total,
            self.expected_total,
            self.tally.sentinels,
            self.producers,
            self.left_over,
            self.elapsed,
        )
    }
}

/// Runs one drill on a fresh deque and waits for every thread.
pub fn run(config: &DrillConfig) -> anyhow::Result<Report> {
    config.validate()?;
    log::info!(
        "drill start: {} producers x {} items, {} consumers, mode {}",
        config.producers,
        config.items_per_producer,
        config.consumers,
        config.mode
    );

    let deque = ThreadSafeDeque::new();
    let sentinels_seen = Shared::new(0usize);
    let (tally_sender, tally_receiver) = kanal::unbounded::<Tally>();
    let start = Instant::now();

    let mut consumers = Vec::with_capacity(config.consumers);
    for index in 0..config.consumers {
        let handle = consumer::spawn(index, config, deque.clone(), sentinels_seen.clone(), tally_sender.clone())
            .with_context(|| format!("spawn consumer {}", index))?;
        consumers.push(handle);
    }

    let mut producers = Vec::with_capacity(config.producers);
    for index in 0..config.producers {
        let handle = producer::spawn(index, config, deque.clone()).with_context(|| format!("spawn producer {}", index))?;
        producers.push(handle);
    }

    for (index, handle) in producers.into_iter().enumerate() {
        handle.join().map_err(|_| anyhow!("producer {} panicked", index))?;
    }
    for (index, handle) in consumers.into_iter().enumerate() {
        handle.join().map_err(|_| anyhow!("consumer {} panicked", index))?;
    }
    let elapsed = start.elapsed();

    // every consumer joined cleanly, so each has sent exactly one tally
    let mut tally = Tally::default();
    for _ in 0..config.consumers {
        let part = tally_receiver.recv().map_err(|e| anyhow!("tally channel closed: {:?}", e))?;
        log::debug!("consumer tally {:?}", part);
        tally.merge(&part);
    }
    drop(tally_sender);

    let report = Report {
        mode: config.mode,
        producers: config.producers,
        consumers: config.consumers,
        tally,
        expected_items: config.expected_items(),
        expected_total: config.expected_total(),
        left_over: deque.len(),
        elapsed,
    };
    log::info!("drill done: {}", report);
    Ok(report)
}

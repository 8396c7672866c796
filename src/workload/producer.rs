use std::thread::JoinHandle;

use crate::kits::ThreadSafeDeque;
use crate::workload::{DrillConfig, Item};

pub(super) fn spawn(index: usize, config: &DrillConfig, deque: ThreadSafeDeque<Item>) -> std::io::Result<JoinHandle<()>> {
    let start_delay = config.start_delay;
    let items = config.items_per_producer;
    std::thread::Builder::new().name(format!("producer {}", index)).spawn(move || {
        if !start_delay.is_zero() {
            spin_sleep::sleep(start_delay);
        }
        for value in 1..=items {
            deque.push_back(Item::Value(value));
        }
        deque.push_back(Item::Sentinel);
        log::trace!("producer {} pushed {} items", index, items);
    })
}

use std::thread::JoinHandle;

use kanal::Sender;

use crate::kits::{Shared, ThreadSafeDeque};
use crate::workload::consts::TIMED_WAIT;
use crate::workload::{ConsumeMode, DrillConfig, Item, Tally};

pub(super) fn spawn(
    index: usize,
    config: &DrillConfig,
    deque: ThreadSafeDeque<Item>,
    sentinels_seen: Shared<usize>,
    tally_sender: Sender<Tally>,
) -> std::io::Result<JoinHandle<()>> {
    let config = config.clone();
    std::thread::Builder::new().name(format!("consumer {}", index)).spawn(move || {
        let tally = consume(&config, &deque, &sentinels_seen);
        log::trace!("consumer {} leaves with {:?}", index, tally);
        if let Err(e) = tally_sender.send(tally) {
            log::error!("consumer {} can not send tally: {:?}", index, e);
        }
    })
}

fn consume(config: &DrillConfig, deque: &ThreadSafeDeque<Item>, sentinels_seen: &Shared<usize>) -> Tally {
    let mut tally = Tally::default();
    loop {
        let item = match config.mode {
            ConsumeMode::Poll => deque.pop_front(),
            ConsumeMode::Wait => deque.wait_pop_front(None),
            ConsumeMode::Timed => deque.wait_pop_front(Some(TIMED_WAIT)),
        };
        match item {
            Some(Item::Value(value)) => {
                tally.items += 1;
                tally.total += value;
            }
            Some(Item::Sentinel) => {
                tally.sentinels += 1;
                if sentinels_seen.add(1) == config.producers {
                    if config.mode == ConsumeMode::Wait {
                        // the others are parked in an unbounded wait, hand each one a stop
                        for _ in 1..config.consumers {
                            deque.push_back(Item::Stop);
                        }
                    }
                    return tally;
                }
            }
            Some(Item::Stop) => return tally,
            None => {
                if config.mode == ConsumeMode::Poll {
                    std::hint::spin_loop();
                }
            }
        }
        if config.mode != ConsumeMode::Wait && sentinels_seen.get() >= config.producers {
            return tally;
        }
    }
}

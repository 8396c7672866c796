use std::time::Duration;

pub const DEFAULT_PRODUCERS: usize = 100;
pub const DEFAULT_ITEMS_PER_PRODUCER: i64 = 100;
pub const DEFAULT_CONSUMERS: usize = 1;

/// producers sleep this long before pushing, so consumers are already draining
pub const DEFAULT_START_DELAY: Duration = Duration::from_millis(10);

/// bound used by [`ConsumeMode::Timed`](super::ConsumeMode::Timed) before re-checking the done counter
pub const TIMED_WAIT: Duration = Duration::from_millis(5);

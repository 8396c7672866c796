pub use shared::*;
pub use thread_safe_deque::ThreadSafeDeque;

mod shared;
mod thread_safe_deque;

pub use kits::ThreadSafeDeque;

pub mod kits;
pub mod workload;

pub mod live_worker;

pub use live_worker::run as run_live_worker;

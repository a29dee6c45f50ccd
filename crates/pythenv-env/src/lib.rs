pub mod common;
pub mod env;
pub mod log;
pub mod runner;
pub mod signals;

#[cfg(all(test, unix))]
mod test_support;

pub use env::builder::IsolatedEnv;
pub use runner::run_script;
pub use signals::{install_interrupt_handler, interrupted};

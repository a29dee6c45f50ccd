pub mod config;
pub mod error;
pub mod invocation;
pub mod requirements;

pub use error::{PythenvError, Result};

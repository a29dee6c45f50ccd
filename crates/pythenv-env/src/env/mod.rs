//! Ephemeral environment lifecycle: a fresh virtualenv per run, removed when dropped.
//!
//! Callers get an `IsolatedEnv` handle; interpreter and installer paths are resolved
//! from the environment layout, never from the caller's `PATH`.

pub mod builder;

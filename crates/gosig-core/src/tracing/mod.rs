//! Observability for gosig.
//! `tracing` crate with `EnvFilter`, logs go to stderr.

pub mod setup;

pub use setup::init_tracing;

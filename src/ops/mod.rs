//! High-level operations behind the command-line modes.
//!
//! Each operation takes its collaborators (config, note store, composer,
//! prompt) explicitly, so the same flow runs against Joplin in production and
//! against in-memory fakes in tests.

pub mod create;
pub mod selftest;

pub use create::{create_entry, CreateOptions, CreateOutcome};
pub use selftest::{run_self_test, EdgeCaseResult, SelfTestReport};

//! Platform abstraction layer
//!
//! Browser glue for frame scheduling. Native builds drive the loop with
//! `clock::ManualScheduler` instead.

#[cfg(target_arch = "wasm32")]
pub mod web;

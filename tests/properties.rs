//! Property tests for metadelta.
//!
//! Properties use randomized input generation to explore edge cases and
//! protect invariants like "never panics", "deterministic output" and
//! "the resolution loop always terminates".
//!
//! Run with: `cargo test --test properties`

#[path = "properties/manifest.rs"]
mod manifest;

#[path = "properties/delta.rs"]
mod delta;

#[path = "properties/resolve_loop.rs"]
mod resolve_loop;

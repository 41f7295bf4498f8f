//! Core Module - Scoring Logic
//!
//! Registry, fetchers, orchestration, pillar math and report composition.

pub mod composer;
pub mod engine;
pub mod fetchers;
pub mod orchestrator;
pub mod pillars;
pub mod registry;
pub mod sample;

pub use composer::*;
pub use engine::*;
pub use orchestrator::*;
pub use pillars::*;
pub use sample::*;

//! office-core — Pure domain logic, no HTTP, no UI.
//!
//! This crate contains the complete event-to-animation pipeline for the
//! virtual office: the normalizer that turns raw agent hook payloads into
//! animation events, the idle tracker that emits synthetic thinking/idle
//! fallbacks, and the character state machine that sequences walking
//! transitions between office locations. Frontends subscribe to events
//! via tokio channels.

pub mod character;
pub mod config;
pub mod driver;
pub mod events;
pub mod idle;
pub mod normalizer;
pub mod types;

//! Tracklet - a minimal issue tracker.
//!
//! Issues are kept as a single JSON array under one key of a
//! [`KeyValueStore`](tracklet_kv::KeyValueStore) and rendered back into an
//! HTML listing after every change.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod domain;
pub mod error;
pub mod id_generation;
pub mod render;
pub mod storage;
pub mod store;

// Public CLI module (needed by binary)
pub mod app;
pub mod cli;
pub mod config;
pub mod output;

// Command implementations
pub mod commands;

//! Key-value slot storage for tracklet.
//!
//! A slot store maps short string keys to string values, the way a browser's
//! `localStorage` does. This crate provides the [`KeyValueStore`] trait and two
//! backends:
//!
//! - [`MemoryStore`]: ephemeral, backed by a `HashMap`
//! - [`FileStore`]: one file per key inside a directory, written atomically

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod atomic;
pub mod error;
pub mod file;
pub mod key;
pub mod memory;
pub mod store;

pub use atomic::write_atomic;
pub use error::{Error, Result};
pub use file::FileStore;
pub use key::validate_key;
pub use memory::MemoryStore;
pub use store::KeyValueStore;

//! Command implementations that do not need an opened store.

pub mod init;

//! Cache module for persisting fetched card sets to disk
//!
//! This module provides a single-file cache that is loaded into memory on first
//! use and written back in full when released. Load and flush failures degrade
//! to an empty cache and a no-op respectively, never to an error.

mod disk;

pub use disk::DiskCache;

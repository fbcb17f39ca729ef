//! Hash maps using AHash.

pub use ahash::AHashMap as HashMap;

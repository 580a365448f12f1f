//! Data models and the translation between them
//!
//! - `sdk` - Flat batch of read-only spans as produced by the SDK
//! - `pdata` - Hierarchical trace batch consumed by collector pipelines
//! - `transmute` - Translation from the first to the second

pub mod pdata;
pub mod sdk;
pub mod transmute;

pub use transmute::translate;

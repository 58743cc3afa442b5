//! dmcat: damage mechanism catalog browser.
//!
//! Filters a read-only catalog of industrial damage mechanisms (corrosion,
//! cracking, embrittlement, …) by temperature, material category and grade,
//! damage morphology, and free text. The matching core lives in
//! [`dmcat_core`]; this crate adds the presentation layers on top of it so
//! that integration tests can import them directly.
//!
//! # Architecture
//!
//! ```text
//! dmcat_core::{Store, Options, Search}
//!          │
//!          ├──► render  (CLI text)
//!          └──► server  (JSON over HTTP)
//! ```

pub mod render;
pub mod server;

pub use dmcat_core::{
    config, DamageRecord, FilterOptions, FilterState, LoadError, Material, RecordStore,
    TemperatureRange,
};

//! dmcat-core: damage mechanism catalog core library.
//!
//! This crate holds everything that is not presentation: the record types,
//! the lazily-loaded read-only store, the option collector that derives
//! filter vocabularies, and the match predicate.
//!
//! # Architecture
//!
//! ```text
//! data file ──► Store ──┬──► Options ──► filter form
//!                       └──► Search  ──► result list / detail view
//! ```
//!
//! Matching and option collection are pure and synchronous. The store reads
//! the data file once per process and hands out borrowed slices afterwards.

pub mod config;
pub mod error;
pub mod options;
pub mod query;
pub mod search;
pub mod store;
pub mod types;

pub use error::LoadError;
pub use options::{
    collect_damage_morphology_options, collect_material_options, FilterOptions, MaterialOptions,
};
pub use search::{filter_records, is_displayable, matches, Matcher};
pub use store::RecordStore;
pub use types::{DamageRecord, FilterState, Material, TemperatureRange};

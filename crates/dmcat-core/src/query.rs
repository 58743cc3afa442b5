//! Filter query parameters.
//!
//! The result view accepts its filter as short query keys:
//!
//! | key | field |
//! |-----|-------|
//! | `t` | temperature (°C) |
//! | `c` | material category |
//! | `g` | grade |
//! | `m` | damage morphology |
//! | `q` | free-text query |
//!
//! Input pairs are already percent-decoded. The first occurrence of a key
//! wins, unknown keys are ignored, and an empty value is the same as a
//! missing one. A temperature that does not parse to a finite number is
//! treated as absent rather than as an error.

use crate::types::FilterState;

pub const TEMPERATURE_KEY: &str = "t";
pub const CATEGORY_KEY: &str = "c";
pub const GRADE_KEY: &str = "g";
pub const MORPHOLOGY_KEY: &str = "m";
pub const TEXT_KEY: &str = "q";

impl FilterState {
    /// Build a filter from decoded `(key, value)` pairs.
    pub fn from_params<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut t = None;
        let mut c = None;
        let mut g = None;
        let mut m = None;
        let mut q = None;

        for (key, value) in params {
            let slot = match key.as_ref() {
                TEMPERATURE_KEY => &mut t,
                CATEGORY_KEY => &mut c,
                GRADE_KEY => &mut g,
                MORPHOLOGY_KEY => &mut m,
                TEXT_KEY => &mut q,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.as_ref().to_string());
            }
        }

        FilterState {
            temperature: t.as_deref().and_then(parse_temperature),
            material_category: c.filter(|s| !s.is_empty()),
            grade: g.filter(|s| !s.is_empty()),
            damage_morphology: m.filter(|s| !s.is_empty()),
            text_query: q.unwrap_or_default(),
        }
    }
}

/// Parse a temperature parameter. Surrounding whitespace is ignored; empty,
/// non-numeric, and non-finite input yield `None`.
pub fn parse_temperature(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|t| t.is_finite())
}

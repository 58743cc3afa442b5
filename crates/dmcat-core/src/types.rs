//! Core types for dmcat-core.
//!
//! This module defines the data structures shared across all layers: the
//! [`DamageRecord`] loaded from the catalog file, its [`Material`] and
//! [`TemperatureRange`] parts, and the ephemeral [`FilterState`] a
//! presentation layer passes into the matcher.
//!
//! Deserialization is lenient. Apart from `id`, a field whose JSON shape does
//! not fit is read as absent, and a malformed element inside a list is
//! skipped. Nothing here ever rejects a record that carries an `id` key.

use serde::{Deserialize, Serialize};

/// One damage mechanism from the catalog.
///
/// Every field is optional except `id`. Lists keep source order and may
/// contain duplicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageRecord {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::opt", skip_serializing_if = "Option::is_none")]
    pub name_ko: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt", skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    /// API RP 571 section reference, e.g. `"4.2.16"`.
    #[serde(default, deserialize_with = "lenient::opt", skip_serializing_if = "Option::is_none")]
    pub api_571_section: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt", skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_seq", skip_serializing_if = "Option::is_none")]
    pub affected_materials: Option<Vec<Material>>,
    #[serde(default, deserialize_with = "lenient::opt", skip_serializing_if = "Option::is_none")]
    pub temperature_range_celsius: Option<TemperatureRange>,
    #[serde(default, deserialize_with = "lenient::opt_seq", skip_serializing_if = "Option::is_none")]
    pub damage_morphology: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::opt_seq", skip_serializing_if = "Option::is_none")]
    pub crack_features: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::opt_seq", skip_serializing_if = "Option::is_none")]
    pub critical_factors: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::opt_seq", skip_serializing_if = "Option::is_none")]
    pub prevention_mitigation: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::opt_seq", skip_serializing_if = "Option::is_none")]
    pub inspection_methods: Option<Vec<String>>,
    /// Carried through for presentation; never read by the core.
    #[serde(default, deserialize_with = "lenient::opt", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl DamageRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Display title: `name_ko`, falling back to `name_en`. Empty names are
    /// skipped.
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.name_ko).or_else(|| non_empty(&self.name_en))
    }

    pub fn materials(&self) -> &[Material] {
        self.affected_materials.as_deref().unwrap_or_default()
    }

    pub fn morphologies(&self) -> &[String] {
        self.damage_morphology.as_deref().unwrap_or_default()
    }

    /// Fields searched by the free-text query, in haystack order. Absent
    /// fields are skipped.
    pub fn text_fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.id.as_str()).chain(
            [
                &self.name_ko,
                &self.name_en,
                &self.summary,
                &self.description,
            ]
            .into_iter()
            .filter_map(|f| f.as_deref()),
        )
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// A material family affected by a mechanism, with the specific grades
/// listed for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub category: String,
    #[serde(default, deserialize_with = "lenient::seq")]
    pub grades: Vec<String>,
}

impl Material {
    pub fn new<I, S>(category: impl Into<String>, grades: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category: category.into(),
            grades: grades.into_iter().map(Into::into).collect(),
        }
    }
}

/// Inclusive operating temperature window in °C. A `None` bound is
/// unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    #[serde(default, deserialize_with = "lenient::opt")]
    pub min: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt")]
    pub max: Option<f64>,
}

impl TemperatureRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// `true` when `t` lies within both declared bounds.
    pub fn contains(&self, t: f64) -> bool {
        if matches!(self.min, Some(min) if t < min) {
            return false;
        }
        if matches!(self.max, Some(max) if t > max) {
            return false;
        }
        true
    }
}

// ---------------------------------------------------------------------------
// FilterState
// ---------------------------------------------------------------------------

/// The user's current filter selection.
///
/// `None` (or an empty string) on any field means "do not filter on this
/// dimension". A blank `text_query` is likewise inactive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub temperature: Option<f64>,
    pub material_category: Option<String>,
    pub grade: Option<String>,
    pub damage_morphology: Option<String>,
    #[serde(default)]
    pub text_query: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature(mut self, t: f64) -> Self {
        self.temperature = Some(t);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.set_category(Some(category.into()));
        self
    }

    pub fn grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    pub fn morphology(mut self, morphology: impl Into<String>) -> Self {
        self.damage_morphology = Some(morphology.into());
        self
    }

    pub fn text(mut self, query: impl Into<String>) -> Self {
        self.text_query = query.into();
        self
    }

    /// Change the selected category. Selecting a different category clears
    /// the grade, since grades are listed per category.
    pub fn set_category(&mut self, category: Option<String>) {
        if category != self.material_category {
            self.grade = None;
        }
        self.material_category = category;
    }

    /// `true` when no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && active(&self.material_category).is_none()
            && active(&self.grade).is_none()
            && active(&self.damage_morphology).is_none()
            && self.text_query.trim().is_empty()
    }
}

/// Treat an empty selection the same as no selection.
pub(crate) fn active(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Lenient field deserializers
// ---------------------------------------------------------------------------

mod lenient {
    use serde::{de::DeserializeOwned, Deserialize, Deserializer};
    use serde_json::Value;

    /// Any scalar id is accepted: strings as-is, `null` as empty, anything
    /// else as its JSON text.
    pub(super) fn id<'de, D>(d: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }

    pub(super) fn opt<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(d)?;
        Ok(T::deserialize(value).ok())
    }

    pub(super) fn opt_seq<'de, D, T>(d: D) -> Result<Option<Vec<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => Some(keep_valid(items)),
            _ => None,
        })
    }

    pub(super) fn seq<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => keep_valid(items),
            _ => Vec::new(),
        })
    }

    fn keep_valid<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
        items
            .into_iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Test builders: ergonomic constructors for `DamageRecord` and proptest
//! strategies over records and filters.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use dmcat_core::{DamageRecord, FilterState, Material, TemperatureRange};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`DamageRecord`] test fixtures.
///
/// # Example
///
/// ```rust
/// let rec = RecordBuilder::new("DM1")
///     .name_en("HTHA")
///     .temperature(Some(200.0), Some(600.0))
///     .material("Carbon Steel", &["A516"])
///     .morphology(&["Cracking"])
///     .build();
/// ```
pub struct RecordBuilder {
    record: DamageRecord,
}

impl RecordBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            record: DamageRecord::new(id),
        }
    }

    pub fn name_ko(mut self, name: impl Into<String>) -> Self {
        self.record.name_ko = Some(name.into());
        self
    }

    pub fn name_en(mut self, name: impl Into<String>) -> Self {
        self.record.name_en = Some(name.into());
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.record.summary = Some(summary.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.record.description = Some(description.into());
        self
    }

    pub fn temperature(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.record.temperature_range_celsius = Some(TemperatureRange::new(min, max));
        self
    }

    /// Append one material entry. Calling this repeatedly keeps order.
    pub fn material(mut self, category: &str, grades: &[&str]) -> Self {
        self.record
            .affected_materials
            .get_or_insert_with(Vec::new)
            .push(Material::new(category, grades.iter().copied()));
        self
    }

    pub fn morphology(mut self, morphologies: &[&str]) -> Self {
        self.record.damage_morphology = Some(morphologies.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn build(self) -> DamageRecord {
        self.record
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// The single-record dataset used by the end-to-end HTHA scenario.
pub fn htha_record() -> DamageRecord {
    RecordBuilder::new("DM1")
        .name_en("HTHA")
        .temperature(Some(200.0), Some(600.0))
        .material("Carbon Steel", &["A516"])
        .morphology(&["Cracking"])
        .build()
}

pub fn ids<'a, I>(records: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a DamageRecord>,
{
    records.into_iter().map(|r| r.id.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Proptest strategies
// ---------------------------------------------------------------------------

pub const CATEGORY_POOL: &[&str] = &[
    "Carbon Steel",
    "carbon steel",
    "Stainless Steel",
    "Low Alloy Steel",
    "Copper",
    "ALL",
    "all_metals",
    "ALL_ALLOY",
    "All_Alloys",
];

pub const GRADE_POOL: &[&str] = &["A106", "a106", "A516", "304", "316L", "C110", "Gr. 2"];

pub const MORPHOLOGY_POOL: &[&str] = &["Cracking", "cracking", "Pitting", "Thinning", "Blistering"];

fn pick(pool: &'static [&'static str]) -> impl Strategy<Value = String> {
    prop::sample::select(pool).prop_map(str::to_string)
}

pub fn arb_material() -> impl Strategy<Value = Material> {
    (pick(CATEGORY_POOL), prop::collection::vec(pick(GRADE_POOL), 0..4))
        .prop_map(|(category, grades)| Material { category, grades })
}

pub fn arb_range() -> impl Strategy<Value = TemperatureRange> {
    (
        prop::option::of(-100.0f64..800.0),
        prop::option::of(-100.0f64..800.0),
    )
        .prop_map(|(min, max)| TemperatureRange::new(min, max))
}

pub fn arb_record() -> impl Strategy<Value = DamageRecord> {
    (
        "DM[0-9]{1,3}",
        prop::option::of("[A-Za-z ]{0,24}"),
        prop::option::of("[A-Za-z ]{0,40}"),
        prop::option::of(arb_range()),
        prop::option::of(prop::collection::vec(arb_material(), 0..4)),
        prop::option::of(prop::collection::vec(pick(MORPHOLOGY_POOL), 0..3)),
    )
        .prop_map(|(id, name_en, summary, range, materials, morphology)| {
            let mut rec = DamageRecord::new(id);
            rec.name_en = name_en;
            rec.summary = summary;
            rec.temperature_range_celsius = range;
            rec.affected_materials = materials;
            rec.damage_morphology = morphology;
            rec
        })
}

pub fn arb_filter() -> impl Strategy<Value = FilterState> {
    (
        prop::option::of(-150.0f64..900.0),
        prop::option::of(pick(CATEGORY_POOL)),
        prop::option::of(pick(GRADE_POOL)),
        prop::option::of(pick(MORPHOLOGY_POOL)),
        prop_oneof![Just(String::new()), "[A-Za-z]{1,4}"],
    )
        .prop_map(|(temperature, category, grade, morphology, text)| FilterState {
            temperature,
            material_category: category,
            grade,
            damage_morphology: morphology,
            text_query: text,
        })
}

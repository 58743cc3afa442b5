//! Option collection: the filter vocabularies that actually occur in the
//! catalog.
//!
//! Values are deduplicated by exact, case-sensitive string equality and
//! sorted by code point. `"a"` and `"A"` are two options here even though the
//! matcher treats them as one.

use crate::types::DamageRecord;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Material categories and the grades listed under each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MaterialOptions {
    pub categories: Vec<String>,
    pub grades_by_category: BTreeMap<String, Vec<String>>,
}

impl MaterialOptions {
    /// Grades offered once `category` is selected. Exact lookup; unknown
    /// categories have none.
    pub fn grades_for(&self, category: &str) -> &[String] {
        self.grades_by_category
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Everything a filter form needs, collected in one pass per vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub materials: MaterialOptions,
    pub damage_morphologies: Vec<String>,
}

impl FilterOptions {
    pub fn collect(records: &[DamageRecord]) -> Self {
        Self {
            materials: collect_material_options(records),
            damage_morphologies: collect_damage_morphology_options(records),
        }
    }
}

pub fn collect_material_options(records: &[DamageRecord]) -> MaterialOptions {
    let mut grades: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for material in records.iter().flat_map(DamageRecord::materials) {
        grades
            .entry(material.category.as_str())
            .or_default()
            .extend(material.grades.iter().map(String::as_str));
    }

    MaterialOptions {
        categories: grades.keys().map(|c| c.to_string()).collect(),
        grades_by_category: grades
            .into_iter()
            .map(|(category, set)| {
                (
                    category.to_string(),
                    set.into_iter().map(str::to_string).collect(),
                )
            })
            .collect(),
    }
}

pub fn collect_damage_morphology_options(records: &[DamageRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(DamageRecord::morphologies)
        .map(String::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

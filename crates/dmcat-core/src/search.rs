//! Search layer: decides whether a [`DamageRecord`] satisfies a
//! [`FilterState`].
//!
//! Four independent criteria are ANDed together: temperature, material
//! (category and grade, evaluated jointly), damage morphology, and free text.
//! A criterion whose filter field is unset is skipped. Every comparison here
//! is case-insensitive; option collection in [`crate::options`] is not, and
//! the two must stay that way.
//!
//! Matching is a pure function of one record and one filter. It never fails
//! and never reorders: [`filter_records`] only removes.

use crate::types::{active, DamageRecord, FilterState, Material};

/// Material categories that apply to every category, compared
/// case-insensitively. `ALL_ALLOYS` is a spelling variant kept for data that
/// may use it.
pub const WILDCARD_CATEGORIES: &[&str] = &["ALL", "ALL_METALS", "ALL_ALLOY", "ALL_ALLOYS"];

/// `true` if `record` passes every active criterion in `filter`.
pub fn matches(record: &DamageRecord, filter: &FilterState) -> bool {
    Matcher::new(filter).matches(record)
}

/// Records that match `filter`, in their original order.
pub fn filter_records<'a>(records: &'a [DamageRecord], filter: &FilterState) -> Vec<&'a DamageRecord> {
    let matcher = Matcher::new(filter);
    records.iter().filter(|r| matcher.matches(r)).collect()
}

/// Whether a record has anything worth showing in a result list: a non-blank
/// title or non-blank summary/description.
pub fn is_displayable(record: &DamageRecord) -> bool {
    let present = |f: &Option<String>| f.as_deref().is_some_and(|s| !s.trim().is_empty());
    present(&record.name_ko)
        || present(&record.name_en)
        || present(&record.summary)
        || present(&record.description)
}

/// `true` if `category` is one of [`WILDCARD_CATEGORIES`], ignoring case.
pub fn is_wildcard_category(category: &str) -> bool {
    let upper = category.to_uppercase();
    WILDCARD_CATEGORIES.contains(&upper.as_str())
}

// ---------------------------------------------------------------------------
// Matcher
// ---------------------------------------------------------------------------

/// A [`FilterState`] with its needles lower-cased once, for matching many
/// records against the same filter.
#[derive(Debug, Clone)]
pub struct Matcher {
    temperature: Option<f64>,
    category: Option<String>,
    grade: Option<String>,
    morphology: Option<String>,
    text: Option<String>,
}

impl Matcher {
    pub fn new(filter: &FilterState) -> Self {
        let lower = |f: &Option<String>| active(f).map(str::to_lowercase);
        Self {
            temperature: filter.temperature,
            category: lower(&filter.material_category),
            grade: lower(&filter.grade),
            morphology: lower(&filter.damage_morphology),
            // Activation looks at the trimmed query; the needle itself is not
            // trimmed.
            text: (!filter.text_query.trim().is_empty()).then(|| filter.text_query.to_lowercase()),
        }
    }

    pub fn matches(&self, record: &DamageRecord) -> bool {
        self.temperature_ok(record)
            && self.material_ok(record)
            && self.morphology_ok(record)
            && self.text_ok(record)
    }

    fn temperature_ok(&self, record: &DamageRecord) -> bool {
        match (self.temperature, &record.temperature_range_celsius) {
            (Some(t), Some(range)) => range.contains(t),
            _ => true,
        }
    }

    fn material_ok(&self, record: &DamageRecord) -> bool {
        if self.category.is_none() && self.grade.is_none() {
            return true;
        }
        let materials = record.materials();

        let mut has_wildcard = false;
        if let Some(category) = &self.category {
            // Short-circuits on the first hit, like `any`, so `has_wildcard`
            // only sees entries up to and including that hit.
            let covered = materials.iter().any(|m| {
                if is_wildcard_category(&m.category) {
                    has_wildcard = true;
                    return true;
                }
                m.category.to_lowercase() == *category
            });
            if !covered {
                return false;
            }
        }

        let Some(grade) = &self.grade else {
            return true;
        };
        match &self.category {
            Some(category) => {
                has_wildcard
                    || materials
                        .iter()
                        .filter(|m| m.category.to_lowercase() == *category)
                        .any(|m| lists_grade(m, grade))
            }
            None => materials.iter().any(|m| lists_grade(m, grade)),
        }
    }

    fn morphology_ok(&self, record: &DamageRecord) -> bool {
        let Some(morphology) = &self.morphology else {
            return true;
        };
        record
            .morphologies()
            .iter()
            .any(|m| m.to_lowercase() == *morphology)
    }

    fn text_ok(&self, record: &DamageRecord) -> bool {
        let Some(needle) = &self.text else {
            return true;
        };
        record
            .text_fields()
            .any(|field| field.to_lowercase().contains(needle.as_str()))
    }
}

fn lists_grade(material: &Material, grade_lower: &str) -> bool {
    material.grades.iter().any(|g| g.to_lowercase() == grade_lower)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

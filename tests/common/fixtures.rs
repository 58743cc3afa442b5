//! Static catalog corpora used across harnesses.
//!
//! `CATALOG_JSON` is a small but realistic data file: it nests one array,
//! includes an id-less element that must be dropped, and a record with no
//! display content. Loaded record order is
//! `DM-HTHA, DM-CLSCC, DM-EROS, DM-CUI, DM-STUB`.

use dmcat_core::DamageRecord;
use std::path::{Path, PathBuf};

pub const CATALOG_JSON: &str = r#"[
  {
    "id": "DM-HTHA",
    "name_ko": "고온 수소 침식",
    "name_en": "High Temperature Hydrogen Attack",
    "api_571_section": "4.4.2",
    "summary": "HTHA embrittlement of carbon and C-0.5Mo steels exposed to hydrogen at elevated temperature.",
    "temperature_range_celsius": { "min": 204, "max": null },
    "affected_materials": [
      { "category": "Carbon Steel", "grades": ["A516", "A106"] },
      { "category": "C-0.5Mo", "grades": ["A204"] }
    ],
    "damage_morphology": ["Fissuring", "Cracking"],
    "inspection_methods": ["AUBT", "TOFD"]
  },
  {
    "id": "DM-CLSCC",
    "name_en": "Chloride Stress Corrosion Cracking",
    "api_571_section": "4.5.1",
    "summary": "Surface-initiated cracks in austenitic stainless steels under tensile stress in chloride environments.",
    "temperature_range_celsius": { "min": 60, "max": 200 },
    "affected_materials": [
      { "category": "Stainless Steel", "grades": ["304", "316L"] }
    ],
    "damage_morphology": ["Cracking", "Branching"]
  },
  {
    "id": "DM-EROS",
    "name_en": "Erosion / Erosion-Corrosion",
    "api_571_section": "4.2.14",
    "description": "Accelerated mechanical removal of surface material by moving fluids or solids.",
    "affected_materials": [
      { "category": "ALL_METALS", "grades": [] }
    ],
    "damage_morphology": ["Thinning"]
  },
  [
    {
      "id": "DM-CUI",
      "name_ko": "보온재 하부 부식",
      "name_en": "Corrosion Under Insulation",
      "api_571_section": "4.3.3",
      "summary": "Corrosion of piping and vessels beneath insulation due to trapped water.",
      "temperature_range_celsius": { "min": -12, "max": 175 },
      "affected_materials": [
        { "category": "Carbon Steel", "grades": ["A106"] },
        { "category": "Stainless Steel", "grades": ["304"] }
      ],
      "damage_morphology": ["Pitting", "Thinning"]
    },
    [ { "name_en": "orphan without id" } ]
  ],
  { "id": "DM-STUB" }
]"#;

pub const CATALOG_IDS: &[&str] = &["DM-HTHA", "DM-CLSCC", "DM-EROS", "DM-CUI", "DM-STUB"];

/// `CATALOG_JSON` parsed through the real loader.
pub fn sample_catalog() -> Vec<DamageRecord> {
    dmcat_core::store::load_from_str(CATALOG_JSON, "fixtures/catalog.json")
        .expect("fixture catalog must parse")
}

/// Write `contents` to `dir/name` and return the path.
pub fn write_catalog(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create fixture dir");
    }
    std::fs::write(&path, contents).expect("write fixture catalog");
    path
}

/// A synthetic catalog of `n` records cycling through materials, ranges and
/// morphologies, for throughput and scaling tests.
pub fn synthetic_catalog(n: usize) -> Vec<DamageRecord> {
    const CATEGORIES: &[&str] = &["Carbon Steel", "Stainless Steel", "Low Alloy Steel", "ALL_METALS"];
    const MORPHOLOGIES: &[&str] = &["Cracking", "Pitting", "Thinning", "Blistering"];
    (0..n)
        .map(|i| {
            let mut rec = DamageRecord::new(format!("DM-{i:05}"));
            rec.name_en = Some(format!("Mechanism {i}"));
            rec.summary = Some(format!("synthetic mechanism number {i}"));
            if i % 3 != 0 {
                let min = (i % 7) as f64 * 50.0;
                rec.temperature_range_celsius =
                    Some(dmcat_core::TemperatureRange::new(Some(min), Some(min + 300.0)));
            }
            rec.affected_materials = Some(vec![dmcat_core::Material::new(
                CATEGORIES[i % CATEGORIES.len()],
                [format!("G{}", i % 11)],
            )]);
            rec.damage_morphology = Some(vec![MORPHOLOGIES[i % MORPHOLOGIES.len()].to_string()]);
            rec
        })
        .collect()
}

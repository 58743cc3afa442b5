//! Plain-text rendering of records for the CLI.
//!
//! Summaries are the compact result-list form (one block per record);
//! [`write_detail`] is the full detail view with every non-empty facet.

use dmcat_core::{DamageRecord, Material, TemperatureRange};
use std::io::{self, Write};

const UNTITLED: &str = "(untitled)";
/// Grades shown per material in a summary before eliding the rest.
const SUMMARY_GRADES: usize = 3;

pub fn title(record: &DamageRecord) -> &str {
    record.title().unwrap_or(UNTITLED)
}

/// `"200 ~ 600 ℃"`, with `-` standing in for a missing bound.
pub fn temperature_label(range: &TemperatureRange) -> String {
    format!("{} ~ {} ℃", bound(range.min, "-"), bound(range.max, "-"))
}

fn bound(value: Option<f64>, missing: &str) -> String {
    value.map_or_else(|| missing.to_string(), |v| v.to_string())
}

/// `"Carbon Steel (A106, A516, A53…)"`; just the category when no grades
/// are listed.
pub fn material_summary(material: &Material) -> String {
    if material.grades.is_empty() {
        return material.category.clone();
    }
    let shown = material
        .grades
        .iter()
        .take(SUMMARY_GRADES)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let more = if material.grades.len() > SUMMARY_GRADES { "…" } else { "" };
    format!("{} ({shown}{more})", material.category)
}

pub fn write_summary<W: Write>(w: &mut W, record: &DamageRecord) -> io::Result<()> {
    writeln!(w, "{} ({})", title(record), record.id)?;
    if let Some(summary) = &record.summary {
        writeln!(w, "  {summary}")?;
    }

    let mut tags = Vec::new();
    if let Some(section) = &record.api_571_section {
        tags.push(format!("API 571 {section}"));
    }
    if let Some(range) = &record.temperature_range_celsius {
        tags.push(format!("temp: {}", temperature_label(range)));
    }
    if !tags.is_empty() {
        writeln!(w, "  [{}]", tags.join("] ["))?;
    }

    let materials = record.materials();
    if !materials.is_empty() {
        let list: Vec<String> = materials.iter().map(material_summary).collect();
        writeln!(w, "  materials: {}", list.join(" · "))?;
    }
    Ok(())
}

pub fn write_detail<W: Write>(w: &mut W, record: &DamageRecord) -> io::Result<()> {
    writeln!(w, "{}", title(record))?;
    match &record.api_571_section {
        Some(section) => writeln!(w, "ID: {}    API 571 {section}", record.id)?,
        None => writeln!(w, "ID: {}", record.id)?,
    }

    if let Some(summary) = &record.summary {
        section(w, "Summary")?;
        writeln!(w, "{summary}")?;
    }
    if let Some(description) = &record.description {
        section(w, "Description")?;
        writeln!(w, "{description}")?;
    }
    if let Some(range) = &record.temperature_range_celsius {
        section(w, "Temperature range")?;
        writeln!(
            w,
            "{} ~ {} ℃",
            bound(range.min, "unbounded"),
            bound(range.max, "unbounded")
        )?;
    }

    let materials = record.materials();
    if !materials.is_empty() {
        section(w, "Affected materials")?;
        for m in materials {
            if m.grades.is_empty() {
                writeln!(w, "- {}", m.category)?;
            } else {
                writeln!(w, "- {}: {}", m.category, m.grades.join(", "))?;
            }
        }
    }

    let facets = [
        ("Damage morphology", &record.damage_morphology),
        ("Crack features", &record.crack_features),
        ("Critical factors", &record.critical_factors),
        ("Prevention / mitigation", &record.prevention_mitigation),
        ("Inspection methods", &record.inspection_methods),
    ];
    for (heading, items) in facets {
        let items = items.as_deref().unwrap_or_default();
        if items.is_empty() {
            continue;
        }
        section(w, heading)?;
        for item in items {
            writeln!(w, "- {item}")?;
        }
    }
    Ok(())
}

fn section<W: Write>(w: &mut W, heading: &str) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "## {heading}")
}

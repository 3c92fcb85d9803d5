use piling_core::model::ExtractionResult;

pub fn print(result: &ExtractionResult) {
    print!("{}", format_result(result));
}

/// Render extracted points as an aligned text table, followed by any
/// dropped elements.
pub fn format_result(result: &ExtractionResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== Design points ({}) ===\n\n",
        result.source_format
    ));

    if result.is_empty() {
        out.push_str("  No design points found.\n");
    } else {
        let name_width = result
            .points
            .iter()
            .map(|p| p.label().chars().count())
            .max()
            .unwrap_or(0)
            .max(4);

        out.push_str(&format!(
            "  {:<name_width$}  {:>14}  {:>14}  {:>10}\n",
            "Name", "Easting", "Northing", "Elevation"
        ));
        out.push_str(&format!("  {}\n", "-".repeat(name_width + 2 + 14 + 2 + 14 + 2 + 10)));

        for p in &result.points {
            out.push_str(&format!(
                "  {:<name_width$}  {:>14.3}  {:>14.3}  {:>10.3}\n",
                p.label(),
                p.easting(),
                p.northing(),
                p.elevation()
            ));
        }
    }

    out.push_str(&format!(
        "\n  Design points loaded: {}\n",
        result.points.len()
    ));

    if !result.skipped.is_empty() {
        out.push_str(&format!("  Dropped: {}\n", result.drop_count()));
        for s in &result.skipped {
            match s.id {
                Some(ref id) => out.push_str(&format!("    {} ({}): {}\n", s.location, id, s.reason)),
                None => out.push_str(&format!("    {}: {}\n", s.location, s.reason)),
            }
        }
    }

    out
}

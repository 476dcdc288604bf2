//! Plain-text tables for the terminal and `report.txt`.

use crate::report::{Metric, Ranking, Rankings};

const CATEGORY_WIDTH: usize = 28;

/// Format the four top-N tables under a short run header.
pub fn format_report(rankings: &Rankings, records_loaded: usize, records_kept: usize) -> String {
    let mut out = String::new();

    out.push_str("=== Storm Event Impact Report ===\n");
    out.push_str(&format!(
        "Records: {records_loaded} loaded | {records_kept} after cleaning\n\n"
    ));

    out.push_str("Most harmful to population health\n\n");
    out.push_str(&format_metric_table(Metric::Fatalities, &rankings.fatalities));
    out.push('\n');
    out.push_str(&format_metric_table(Metric::Injuries, &rankings.injuries));
    out.push('\n');

    out.push_str("Greatest economic consequences\n\n");
    out.push_str(&format_metric_table(Metric::PropertyDamage, &rankings.prop_damage));
    out.push('\n');
    out.push_str(&format_metric_table(Metric::CropDamage, &rankings.crop_damage));

    out
}

/// One ranking as a two-column table. An empty ranking prints a `-` row.
pub fn format_metric_table(metric: Metric, rows: &Ranking) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}:\n", metric.display_name()));
    out.push_str(
        format!("{:<w$} {:>16}", "event type", "value", w = CATEGORY_WIDTH).trim_end(),
    );
    out.push('\n');
    out.push_str(&format!("{:-<w$} {:-<16}\n", "", "", w = CATEGORY_WIDTH));

    if rows.is_empty() {
        out.push_str(&format!("{:<w$} {:>16}\n", "-", "-", w = CATEGORY_WIDTH));
        return out;
    }

    for (category, value) in rows {
        out.push_str(&format!(
            "{:<w$} {:>16}\n",
            truncate(category, CATEGORY_WIDTH),
            fmt_value(metric, *value),
            w = CATEGORY_WIDTH
        ));
    }

    out
}

fn fmt_value(metric: Metric, v: f64) -> String {
    match metric {
        Metric::Fatalities | Metric::Injuries | Metric::HealthScore => format!("{v:.3}"),
        Metric::PropertyDamage | Metric::CropDamage => format!("{v:.0}"),
        Metric::EconomicScore => format!("{v:.2}"),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

use crate::config::ForecastTarget;
use crate::logic::extract::extract_series;
use crate::models::{Category, ForecastDocument, ReportSection};
use chrono::{DateTime, FixedOffset};

/// Delivery time quoted in the footer; the scheduler owns the real schedule.
pub const DELIVERY_TIME: &str = "7:00";

const FOOTER_TIME_FORMAT: &str = "%Y/%m/%d %H:%M";
const BULLET: &str = "・";

/// Build the full JMA report text for `target` from a decoded document.
///
/// Output is a pure function of its inputs.
pub fn compose_report(
    doc: &ForecastDocument,
    target: &ForecastTarget,
    now: &DateTime<FixedOffset>,
) -> String {
    let sections = build_sections(doc, target);
    tracing::debug!(sections = sections.len(), "built report sections");

    format!(
        "【{}の天気・降水確率・気温（観測/予報）】\n\n{}\n\n（毎朝{}配信 / {}）",
        target.region_name,
        render_sections(&sections),
        DELIVERY_TIME,
        now.format(FOOTER_TIME_FORMAT),
    )
}

/// One section per category that produced at least one line.
pub fn build_sections(doc: &ForecastDocument, target: &ForecastTarget) -> Vec<ReportSection> {
    let series = doc.short_term_series();

    Category::ALL
        .into_iter()
        .filter_map(|category| {
            // Temperatures are reported per observation point, not per region.
            let area = match category {
                Category::Temperature => target.point_name.as_str(),
                _ => target.region_name.as_str(),
            };
            let lines = extract_series(series, area, |a| category.select(a), category.unit());
            let section = ReportSection::new(category.label(), area, lines);
            (!section.is_empty()).then_some(section)
        })
        .collect()
}

/// Titles, bulleted lines, and exactly one blank line before every title but
/// the first.
pub fn render_sections(sections: &[ReportSection]) -> String {
    let mut out: Vec<String> = Vec::new();

    for section in sections.iter().filter(|s| !s.is_empty()) {
        if !out.is_empty() {
            out.push(String::new());
        }
        out.push(section.title.trim().to_string());

        for line in &section.lines {
            let line = line.to_string();
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            out.push(format!("{BULLET}{line}"));
        }
    }

    out.join("\n")
}

/// Short bulleted message for the coordinate-based place feed.
pub fn compose_place_report(place: &str, lines: &[String]) -> String {
    let items: Vec<String> = lines.iter().map(|l| format!("- {l}")).collect();
    format!(
        "【{}の情報（観測/予報）】\n{}\n（毎朝{}配信）",
        place,
        items.join("\n"),
        DELIVERY_TIME,
    )
}

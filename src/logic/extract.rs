use crate::models::{AreaEntry, ReportLine, TimeSeries};
use chrono::DateTime;

const TIME_FORMAT: &str = "%Y/%m/%d (%a) %H:%M";

/// Collect "time: value" rows for one area and one value category across all
/// series, in series order.
///
/// Value arrays are clipped to the length of `time_defines` (and vice versa),
/// empty values are skipped and unparsable timestamps are passed through as
/// they came. This never fails: partial data only shortens the output.
pub fn extract_series<'a, F>(
    series: &'a [TimeSeries],
    area_name: &str,
    select: F,
    unit: Option<&str>,
) -> Vec<ReportLine>
where
    F: Fn(&'a AreaEntry) -> Option<&'a [String]>,
{
    let unit = unit.unwrap_or_default();
    let mut out = Vec::new();

    for ts in series {
        let Some(entry) = ts.find_area(area_name) else {
            continue;
        };
        let values = match select(entry) {
            Some(v) if !v.is_empty() => v,
            _ => continue,
        };

        for (time, value) in ts.time_defines.iter().zip(values) {
            if value.is_empty() {
                continue;
            }
            out.push(ReportLine::new(format_time(time), format!("{value}{unit}")));
        }
    }

    tracing::trace!(area = area_name, rows = out.len(), "extracted series");
    out
}

/// RFC 3339 timestamps render in their own offset; anything else verbatim.
pub fn format_time(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(t) => t.format(TIME_FORMAT).to_string(),
        Err(_) => raw.to_string(),
    }
}

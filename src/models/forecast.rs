use serde::Deserialize;

/// Decoded JMA forecast response. Block 0 is the short-term forecast, block 1
/// (when present) the weekly one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ForecastDocument {
    pub blocks: Vec<ForecastBlock>,
}

impl ForecastDocument {
    /// Time series of the short-term block, empty if the document has none.
    pub fn short_term_series(&self) -> &[TimeSeries] {
        self.blocks
            .first()
            .map(|b| b.time_series.as_slice())
            .unwrap_or_default()
    }

    /// True when there is nothing an extraction could work with.
    pub fn is_empty(&self) -> bool {
        self.short_term_series().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForecastBlock {
    pub report_datetime: String,
    pub time_series: Vec<TimeSeries>,
}

/// Parallel arrays: `time_defines[i]` belongs to index `i` of every value
/// array in `areas`. Lengths are not guaranteed to match.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeSeries {
    pub time_defines: Vec<String>,
    pub areas: Vec<AreaEntry>,
}

impl TimeSeries {
    /// First entry whose area name matches exactly.
    pub fn find_area(&self, name: &str) -> Option<&AreaEntry> {
        self.areas.iter().find(|a| a.area.name == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AreaEntry {
    pub area: AreaInfo,
    pub weathers: Option<Vec<String>>,
    pub pops: Option<Vec<String>>,
    pub temps: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AreaInfo {
    pub name: String,
    pub code: String,
}

/// Value categories tracked in the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Condition,
    PrecipitationProbability,
    Temperature,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Condition,
        Category::PrecipitationProbability,
        Category::Temperature,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Condition => "天気",
            Category::PrecipitationProbability => "降水確率",
            Category::Temperature => "気温",
        }
    }

    pub fn unit(&self) -> Option<&'static str> {
        match self {
            Category::Condition => None,
            Category::PrecipitationProbability => Some("%"),
            Category::Temperature => Some("℃"),
        }
    }

    /// The value array this category reads from an area entry.
    pub fn select<'a>(&self, entry: &'a AreaEntry) -> Option<&'a [String]> {
        let values = match self {
            Category::Condition => entry.weathers.as_deref(),
            Category::PrecipitationProbability => entry.pops.as_deref(),
            Category::Temperature => entry.temps.as_deref(),
        };
        values.filter(|v| !v.is_empty())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "publishingOffice": "気象庁",
            "reportDatetime": "2024-01-15T05:00:00+09:00",
            "timeSeries": [
                {
                    "timeDefines": ["2024-01-15T05:00:00+09:00", "2024-01-16T00:00:00+09:00"],
                    "areas": [
                        {
                            "area": {"name": "東京地方", "code": "130010"},
                            "weatherCodes": ["100", "101"],
                            "weathers": ["晴れ", "晴れ　時々　くもり"]
                        }
                    ]
                },
                {
                    "timeDefines": ["2024-01-15T09:00:00+09:00"],
                    "areas": [
                        {"area": {"name": "東京", "code": "44132"}, "temps": ["8"]}
                    ]
                }
            ]
        },
        {
            "reportDatetime": "2024-01-15T05:00:00+09:00",
            "timeSeries": []
        }
    ]"#;

    #[test]
    fn decodes_jma_shape_and_ignores_unknown_fields() {
        let doc: ForecastDocument = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(doc.blocks[0].report_datetime, "2024-01-15T05:00:00+09:00");

        let series = doc.short_term_series();
        assert_eq!(series.len(), 2);
        let tokyo = series[0].find_area("東京地方").unwrap();
        assert_eq!(tokyo.area.code, "130010");
        assert_eq!(tokyo.weathers.as_ref().unwrap().len(), 2);
        assert!(tokyo.pops.is_none());
        assert!(tokyo.temps.is_none());
    }

    #[test]
    fn missing_optional_fields_are_legal() {
        let doc: ForecastDocument =
            serde_json::from_str(r#"[{"timeSeries": [{"areas": [{"area": {"name": "x"}}]}]}]"#)
                .unwrap();
        let series = doc.short_term_series();
        assert_eq!(series.len(), 1);
        assert!(series[0].time_defines.is_empty());
        assert_eq!(series[0].areas[0].area.code, "");
    }

    #[test]
    fn empty_document_has_no_short_term_series() {
        let doc: ForecastDocument = serde_json::from_str("[]").unwrap();
        assert!(doc.is_empty());
        assert!(doc.short_term_series().is_empty());

        let doc: ForecastDocument = serde_json::from_str(r#"[{"timeSeries": []}]"#).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn find_area_returns_first_exact_match() {
        let ts = TimeSeries {
            time_defines: vec![],
            areas: vec![
                AreaEntry {
                    area: AreaInfo {
                        name: "東京地方".into(),
                        code: "1".into(),
                    },
                    ..Default::default()
                },
                AreaEntry {
                    area: AreaInfo {
                        name: "東京地方".into(),
                        code: "2".into(),
                    },
                    ..Default::default()
                },
            ],
        };
        assert_eq!(ts.find_area("東京地方").unwrap().area.code, "1");
        assert!(ts.find_area("東京").is_none());
    }

    #[test]
    fn category_select_treats_empty_as_absent() {
        let entry = AreaEntry {
            pops: Some(vec![]),
            temps: Some(vec!["8".into()]),
            ..Default::default()
        };
        assert!(Category::Condition.select(&entry).is_none());
        assert!(Category::PrecipitationProbability.select(&entry).is_none());
        assert_eq!(Category::Temperature.select(&entry).unwrap(), ["8"]);
    }

    #[test]
    fn category_select_through_borrowed_categories() {
        let entry = AreaEntry {
            weathers: Some(vec!["晴れ".into()]),
            pops: Some(vec!["10".into()]),
            ..Default::default()
        };
        let present: Vec<&str> = Category::ALL
            .iter()
            .filter(|c| c.select(&entry).is_some())
            .map(|c| c.label())
            .collect();
        assert_eq!(present, ["天気", "降水確率"]);
    }

    #[test]
    fn category_labels_and_units() {
        assert_eq!(Category::Condition.label(), "天気");
        assert_eq!(Category::PrecipitationProbability.unit(), Some("%"));
        assert_eq!(Category::Temperature.unit(), Some("℃"));
        assert_eq!(Category::Condition.unit(), None);
        assert_eq!(Category::Temperature.to_string(), "気温");
    }
}

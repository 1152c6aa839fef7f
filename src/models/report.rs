/// One rendered "time: value" row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub time: String,
    pub value: String,
}

impl ReportLine {
    pub fn new(time: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            value: value.into(),
        }
    }
}

impl std::fmt::Display for ReportLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.time, self.value)
    }
}

/// A titled group of lines for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub title: String,
    pub lines: Vec<ReportLine>,
}

impl ReportSection {
    /// Title is rendered as `【<label>（<area>）】`.
    pub fn new(label: &str, area: &str, lines: Vec<ReportLine>) -> Self {
        Self {
            title: format!("【{}（{}）】", label, area),
            lines,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

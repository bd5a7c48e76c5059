use serde::Deserialize;

use crate::domain::report::{DateRange, ReportKind};

/// Download format of a generated report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Csv,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Csv => "csv",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Text => "text/plain; charset=utf-8",
            Self::Csv => "text/csv; charset=utf-8",
        }
    }
}

/// Query string of the reports page. Without `kind` the page shows only the
/// configuration form; with `format` the report is served as a download.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub kind: Option<String>,
    pub range: Option<String>,
    pub format: Option<String>,
}

pub struct ReportRequest {
    pub kind: ReportKind,
    pub range: DateRange,
    pub format: Option<ReportFormat>,
}

impl ReportQuery {
    /// `None` when no report was requested. Unknown values fall back to the
    /// defaults.
    pub fn to_request(&self) -> Option<ReportRequest> {
        let kind = self.kind.as_deref()?;
        Some(ReportRequest {
            kind: ReportKind::parse(kind).unwrap_or_default(),
            range: self
                .range
                .as_deref()
                .and_then(DateRange::parse)
                .unwrap_or_default(),
            format: match self.format.as_deref().map(str::trim) {
                Some("txt") | Some("text") => Some(ReportFormat::Text),
                Some("csv") => Some(ReportFormat::Csv),
                _ => None,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_kind_means_no_report() {
        assert!(ReportQuery::default().to_request().is_none());
    }

    #[test]
    fn unknown_values_fall_back_to_defaults() {
        let request = ReportQuery {
            kind: Some("ventas".to_string()),
            range: Some("decade".to_string()),
            format: Some("csv".to_string()),
        }
        .to_request()
        .unwrap();
        assert_eq!(request.kind, ReportKind::Packages);
        assert_eq!(request.range, DateRange::Month);
        assert_eq!(request.format, Some(ReportFormat::Csv));
    }
}

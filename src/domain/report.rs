//! Report selection types and the generated report itself.

use chrono::{DateTime, Days, Months, NaiveDate};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    #[default]
    Packages,
    Destinations,
    Employees,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [Self::Packages, Self::Destinations, Self::Employees];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "packages" => Some(Self::Packages),
            "destinations" => Some(Self::Destinations),
            "employees" => Some(Self::Employees),
            _ => None,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::Packages => "packages",
            Self::Destinations => "destinations",
            Self::Employees => "employees",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Packages => "Paquetes",
            Self::Destinations => "Destinos",
            Self::Employees => "Empleados",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Packages => "Reporte de Paquetes",
            Self::Destinations => "Reporte por Destinos",
            Self::Employees => "Reporte de Empleados",
        }
    }
}

/// Period a report covers, always ending today.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    Week,
    #[default]
    Month,
    Year,
}

impl DateRange {
    pub const ALL: [DateRange; 3] = [Self::Week, Self::Month, Self::Year];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Week => "Última semana",
            Self::Month => "Último mes",
            Self::Year => "Último año",
        }
    }

    /// First day included in the range.
    pub fn start(self, today: NaiveDate) -> NaiveDate {
        let start = match self {
            Self::Week => today.checked_sub_days(Days::new(7)),
            Self::Month => today.checked_sub_months(Months::new(1)),
            Self::Year => today.checked_sub_months(Months::new(12)),
        };
        start.unwrap_or(NaiveDate::MIN)
    }

    /// Whether a backend created-at label falls in the range. Labels that do
    /// not parse as a date are always included.
    pub fn includes(self, created_at: &str, today: NaiveDate) -> bool {
        match parse_created_at(created_at) {
            Some(date) => date >= self.start(today) && date <= today,
            None => true,
        }
    }
}

const MONTHS: [(&str, u32); 16] = [
    ("ene", 1),
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("abr", 4),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("ago", 8),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dic", 12),
    ("dec", 12),
];

/// Parses the date formats the backend uses for created-at labels: ISO dates,
/// RFC 3339 timestamps and `20 Nov, 2025` with Spanish or English months.
pub fn parse_created_at(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.date_naive());
    }

    let mut parts = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty());
    let day: u32 = parts.next()?.parse().ok()?;
    let month_name = parts.next()?.to_lowercase();
    let month = MONTHS
        .iter()
        .find(|(prefix, _)| month_name.starts_with(prefix))
        .map(|(_, number)| *number)?;
    let year: i32 = parts.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Single label/value row of a report.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ReportItem {
    pub label: String,
    pub value: String,
}

impl ReportItem {
    pub fn new(label: impl Into<String>, value: impl ToString) -> Self {
        Self {
            label: label.into(),
            value: value.to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Report {
    pub kind: ReportKind,
    pub range: DateRange,
    pub title: String,
    pub items: Vec<ReportItem>,
    pub summary: String,
    /// Generation date, `YYYY-MM-DD`.
    pub generated_on: String,
}

impl Report {
    /// Attachment name for a download in the given extension.
    pub fn file_name(&self, extension: &str) -> String {
        format!(
            "reporte-{}-{}.{}",
            self.kind.slug(),
            self.generated_on,
            extension
        )
    }
}

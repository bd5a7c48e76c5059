//! Report aggregation, report downloads and the admin dashboard.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::access::Area;
use crate::domain::employee::{Employee, EmployeeStats};
use crate::domain::package::{Package, PackageStats, PackageStatus};
use crate::domain::report::{DateRange, Report, ReportItem, ReportKind};
use crate::domain::user::SessionUser;
use crate::forms::reports::ReportRequest;
use crate::repository::{EmployeeReader, PackageReader};
use crate::services::{ServiceError, ServiceResult, ensure_access};

const RULE_WIDTH: usize = 40;
const TOP_DESTINATIONS: usize = 3;
const RECENT_PACKAGES: usize = 5;

/// Delivered share of `total`, one decimal and a `%` suffix.
fn delivery_rate(delivered: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", delivered as f64 / total as f64 * 100.0)
}

/// City counts sorted by count descending, then city name.
fn destination_counts(packages: &[Package]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for package in packages {
        let city = package.destination_city();
        if !city.is_empty() {
            *counts.entry(city.to_string()).or_default() += 1;
        }
    }
    let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
    // Stable sort keeps the alphabetical order of ties.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn packages_report(packages: &[Package]) -> (Vec<ReportItem>, String) {
    let stats = PackageStats::from_packages(packages);
    let rate = delivery_rate(stats.delivered, stats.total);
    let items = vec![
        ReportItem::new("Total de Paquetes", stats.total),
        ReportItem::new("Entregados", stats.delivered),
        ReportItem::new("En Tránsito", stats.in_transit),
        ReportItem::new("En Procesamiento", stats.processing),
        ReportItem::new("En Aduana", stats.customs),
        ReportItem::new("Tasa de Entrega", &rate),
    ];
    let summary = format!(
        "Durante el período seleccionado se procesaron {} paquetes, de los cuales {} fueron entregados exitosamente, representando una tasa de entrega del {}.",
        stats.total, stats.delivered, rate
    );
    (items, summary)
}

fn destinations_report(packages: &[Package]) -> (Vec<ReportItem>, String) {
    let counts = destination_counts(packages);
    let summary = if counts.is_empty() {
        "No hay envíos registrados en el período seleccionado.".to_string()
    } else {
        let top: Vec<&str> = counts
            .iter()
            .take(TOP_DESTINATIONS)
            .map(|(city, _)| city.as_str())
            .collect();
        format!("Los destinos más frecuentes son {}.", top.join(", "))
    };
    let items = counts
        .into_iter()
        .map(|(city, count)| ReportItem::new(city, count))
        .collect();
    (items, summary)
}

fn employees_report(employees: &[Employee]) -> (Vec<ReportItem>, String) {
    let stats = EmployeeStats::from_employees(employees);
    let mut departments: BTreeMap<&str, usize> = BTreeMap::new();
    for employee in employees {
        let department = employee.department.trim();
        let department = if department.is_empty() {
            "Sin asignar"
        } else {
            department
        };
        *departments.entry(department).or_default() += 1;
    }

    let mut items = vec![
        ReportItem::new("Total de Empleados", stats.total),
        ReportItem::new("Activos", stats.active),
        ReportItem::new("Inactivos", stats.inactive),
        ReportItem::new("Administradores", stats.admins),
    ];
    items.extend(
        departments
            .iter()
            .map(|(name, count)| ReportItem::new(format!("Dpto. {name}"), count)),
    );
    let summary = format!(
        "La empresa cuenta con {} empleados, {} activos y {} inactivos, distribuidos en {} departamentos.",
        stats.total,
        stats.active,
        stats.inactive,
        departments.len()
    );
    (items, summary)
}

/// Aggregates a report. Packages are limited to the date range ending
/// `today`; employees are reported as a snapshot.
pub fn generate_report(
    kind: ReportKind,
    range: DateRange,
    packages: &[Package],
    employees: &[Employee],
    today: NaiveDate,
) -> Report {
    let in_range: Vec<Package> = packages
        .iter()
        .filter(|package| range.includes(&package.created_at, today))
        .cloned()
        .collect();

    let (items, summary) = match kind {
        ReportKind::Packages => packages_report(&in_range),
        ReportKind::Destinations => destinations_report(&in_range),
        ReportKind::Employees => employees_report(employees),
    };

    Report {
        kind,
        range,
        title: kind.title().to_string(),
        items,
        summary,
        generated_on: today.format("%Y-%m-%d").to_string(),
    }
}

/// Plain-text download.
pub fn render_text(report: &Report) -> String {
    let mut lines = vec![
        report.title.clone(),
        "=".repeat(RULE_WIDTH),
        format!("Fecha de generación: {}", report.generated_on),
        format!("Período: {}", report.range.label()),
        String::new(),
        "DATOS:".to_string(),
    ];
    lines.extend(
        report
            .items
            .iter()
            .map(|item| format!("• {}: {}", item.label, item.value)),
    );
    lines.push(String::new());
    lines.push("RESUMEN:".to_string());
    lines.push(report.summary.clone());
    lines.join("\n")
}

/// CSV download with a `label,value` header.
pub fn render_csv(report: &Report) -> ServiceResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let write = |writer: &mut csv::Writer<Vec<u8>>| -> csv::Result<()> {
        writer.write_record(["label", "value"])?;
        for item in &report.items {
            writer.write_record([item.label.as_str(), item.value.as_str()])?;
        }
        writer.flush()?;
        Ok(())
    };
    write(&mut writer).map_err(csv_error)?;
    writer.into_inner().map_err(|err| csv_error(err.into_error().into()))
}

fn csv_error(err: csv::Error) -> ServiceError {
    log::error!("Failed to write report CSV: {err}");
    ServiceError::Form("No se pudo generar el archivo del reporte".to_string())
}

/// Value/label pair for a `<select>`.
#[derive(Debug, Serialize)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

/// Data required to render the reports page.
#[derive(Debug, Serialize)]
pub struct ReportsPageData {
    pub kinds: Vec<Choice>,
    pub ranges: Vec<Choice>,
    pub kind: &'static str,
    pub range: &'static str,
    pub report: Option<Report>,
}

/// Fetches what `request` needs and aggregates it.
pub async fn build_report<R>(
    repo: &R,
    user: &SessionUser,
    request: &ReportRequest,
    today: NaiveDate,
) -> ServiceResult<Report>
where
    R: PackageReader + EmployeeReader + ?Sized,
{
    ensure_access(user, Area::Staff)?;

    let (packages, employees) = match request.kind {
        ReportKind::Employees => (Vec::new(), repo.list_employees(user.bearer()).await?),
        ReportKind::Packages | ReportKind::Destinations => {
            (repo.list_packages(user.bearer()).await?, Vec::new())
        }
    };
    log::info!(
        "{} generated the {} report for {}",
        user.email,
        request.kind.slug(),
        request.range.slug()
    );
    Ok(generate_report(
        request.kind,
        request.range,
        &packages,
        &employees,
        today,
    ))
}

pub async fn load_reports_page<R>(
    repo: &R,
    user: &SessionUser,
    request: Option<&ReportRequest>,
    today: NaiveDate,
) -> ServiceResult<ReportsPageData>
where
    R: PackageReader + EmployeeReader + ?Sized,
{
    ensure_access(user, Area::Staff)?;

    let report = match request {
        Some(request) => Some(build_report(repo, user, request, today).await?),
        None => None,
    };
    let kind = request.map(|r| r.kind).unwrap_or_default();
    let range = request.map(|r| r.range).unwrap_or_default();

    Ok(ReportsPageData {
        kinds: ReportKind::ALL
            .iter()
            .map(|kind| Choice {
                value: kind.slug(),
                label: kind.label(),
            })
            .collect(),
        ranges: DateRange::ALL
            .iter()
            .map(|range| Choice {
                value: range.slug(),
                label: range.label(),
            })
            .collect(),
        kind: kind.slug(),
        range: range.slug(),
        report,
    })
}

/// Data required to render the admin dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub package_stats: PackageStats,
    pub employee_stats: EmployeeStats,
    pub delivery_rate: String,
    pub recent_packages: Vec<Package>,
    pub top_destinations: Vec<ReportItem>,
    pub statuses: Vec<PackageStatus>,
}

pub async fn load_dashboard<R>(repo: &R, user: &SessionUser) -> ServiceResult<DashboardData>
where
    R: PackageReader + EmployeeReader + ?Sized,
{
    ensure_access(user, Area::Staff)?;

    let packages = repo.list_packages(user.bearer()).await.map_err(|err| {
        log::error!("Failed to load dashboard packages: {err}");
        err
    })?;
    let employees = repo.list_employees(user.bearer()).await.map_err(|err| {
        log::error!("Failed to load dashboard employees: {err}");
        err
    })?;

    let package_stats = PackageStats::from_packages(&packages);
    Ok(DashboardData {
        delivery_rate: delivery_rate(package_stats.delivered, package_stats.total),
        package_stats,
        employee_stats: EmployeeStats::from_employees(&employees),
        top_destinations: destination_counts(&packages)
            .into_iter()
            .take(TOP_DESTINATIONS)
            .map(|(city, count)| ReportItem::new(city, count))
            .collect(),
        recent_packages: packages.into_iter().take(RECENT_PACKAGES).collect(),
        statuses: PackageStatus::SELECTABLE.to_vec(),
    })
}


#[cfg(all(test, feature = "test-mocks"))]
mod service_tests {
    use super::*;
    use crate::domain::user::Role;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::user;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 20).unwrap()
    }

    #[actix_web::test]
    async fn employees_report_skips_package_list() {
        let mut repo = MockRepository::new();
        repo.expect_list_packages().times(0);
        repo.expect_list_employees()
            .times(1)
            .returning(|_| Ok(vec![Employee::default()]));

        let request = ReportRequest {
            kind: ReportKind::Employees,
            range: DateRange::Month,
            format: None,
        };
        let data = load_reports_page(&repo, &user(Role::Manager), Some(&request), today())
            .await
            .unwrap();
        assert_eq!(data.kind, "employees");
        assert_eq!(data.kinds.len(), 3);
        assert!(data.report.is_some());
    }

    #[actix_web::test]
    async fn page_without_request_only_lists_options() {
        let repo = MockRepository::new();
        let data = load_reports_page(&repo, &user(Role::Admin), None, today())
            .await
            .unwrap();
        assert!(data.report.is_none());
        assert_eq!(data.range, "month");
    }

    #[actix_web::test]
    async fn customers_cannot_see_dashboard() {
        let repo = MockRepository::new();
        let result = load_dashboard(&repo, &user(Role::Customer)).await;
        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }

    #[actix_web::test]
    async fn dashboard_combines_packages_and_staff() {
        let mut repo = MockRepository::new();
        repo.expect_list_packages().returning(|_| {
            Ok(vec![
                Package {
                    destination: "Estelí, Nicaragua".to_string(),
                    current_status: PackageStatus::Delivered,
                    ..Package::default()
                },
                Package {
                    destination: "Estelí".to_string(),
                    ..Package::default()
                },
            ])
        });
        repo.expect_list_employees()
            .returning(|_| Ok(vec![Employee::default()]));

        let data = load_dashboard(&repo, &user(Role::Admin)).await.unwrap();
        assert_eq!(data.package_stats.total, 2);
        assert_eq!(data.delivery_rate, "50.0%");
        assert_eq!(data.employee_stats.active, 1);
        assert_eq!(data.top_destinations[0].value, "2");
    }
}

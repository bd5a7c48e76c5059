//! Staff package management: listing, creation and courier assignment.

use serde::Serialize;

use crate::domain::access::Area;
use crate::domain::employee::Employee;
use crate::domain::package::{
    NewPackage, Package, PackageFilter, PackageStats, PackageStatus, SearchScope,
};
use crate::domain::user::{Role, SessionUser};
use crate::forms::packages::{
    AssignPackageForm, AssignPackagePayload, CreatePackageForm, PackageListQuery,
};
use crate::repository::{EmployeeReader, PackageReader, PackageWriter};
use crate::services::{ServiceError, ServiceResult, ensure_access, repository_to_form};

/// Data required to render the admin packages page.
#[derive(Debug, Serialize)]
pub struct PackagesPageData {
    pub packages: Vec<Package>,
    pub stats: PackageStats,
    /// Active couriers offered in the assignment form.
    pub couriers: Vec<Employee>,
    pub statuses: Vec<PackageStatus>,
    pub search: String,
    pub status: Option<String>,
    pub can_manage: bool,
}

fn active_couriers(employees: Vec<Employee>) -> Vec<Employee> {
    employees
        .into_iter()
        .filter(|employee| employee.role == Role::Courier && employee.is_active())
        .collect()
}

pub async fn load_packages_page<R>(
    repo: &R,
    user: &SessionUser,
    query: &PackageListQuery,
) -> ServiceResult<PackagesPageData>
where
    R: PackageReader + EmployeeReader + ?Sized,
{
    ensure_access(user, Area::Staff)?;

    let packages = repo.list_packages(user.bearer()).await.map_err(|err| {
        log::error!("Failed to list packages: {err}");
        err
    })?;

    // The page stays usable without the courier list.
    let couriers = match repo.list_employees(user.bearer()).await {
        Ok(employees) => active_couriers(employees),
        Err(err) => {
            log::warn!("Failed to list couriers: {err}");
            Vec::new()
        }
    };

    let filter = PackageFilter::from(query);
    Ok(PackagesPageData {
        stats: PackageStats::from_packages(&packages),
        packages: filter.apply(&packages, SearchScope::Staff),
        couriers,
        statuses: PackageStatus::SELECTABLE.to_vec(),
        search: filter.search().to_string(),
        status: filter.status().map(|status| status.key().to_string()),
        can_manage: ensure_access(user, Area::PackageManagement).is_ok(),
    })
}

/// Creates a shipment and returns it as echoed by the backend.
pub async fn create_package<R>(
    repo: &R,
    user: &SessionUser,
    form: CreatePackageForm,
) -> ServiceResult<Package>
where
    R: PackageWriter + ?Sized,
{
    ensure_access(user, Area::PackageManagement)?;

    let package = NewPackage::try_from(form)?;
    let created = repo
        .create_package(user.bearer(), &package)
        .await
        .map_err(repository_to_form)?;
    log::info!(
        "{} created package {} for {}",
        user.email,
        created.tracking_id,
        package.receiver_name
    );
    Ok(created)
}

/// Assigns a package to an active courier; returns the courier's name.
pub async fn assign_package<R>(
    repo: &R,
    user: &SessionUser,
    form: AssignPackageForm,
) -> ServiceResult<String>
where
    R: PackageWriter + EmployeeReader + ?Sized,
{
    ensure_access(user, Area::PackageManagement)?;

    let payload = AssignPackagePayload::try_from(form)?;
    let courier = active_couriers(repo.list_employees(user.bearer()).await?)
        .into_iter()
        .find(|employee| employee.email.eq_ignore_ascii_case(payload.courier_email.as_str()))
        .ok_or_else(|| ServiceError::Form("Selecciona un mensajero activo".to_string()))?;

    repo.assign_package(user.bearer(), &payload.package_id, &payload.courier_email)
        .await
        .map_err(repository_to_form)?;
    log::info!(
        "{} assigned package {} to {}",
        user.email,
        payload.package_id,
        payload.courier_email
    );
    Ok(courier.name)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::employee::EmployeeStatus;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::user;

    fn employees() -> Vec<Employee> {
        vec![
            Employee {
                name: "Carlos Ruiz".to_string(),
                email: "carlos@nicaflex.com".to_string(),
                role: Role::Courier,
                ..Employee::default()
            },
            Employee {
                name: "Ana Gómez".to_string(),
                email: "ana@nicaflex.com".to_string(),
                role: Role::Courier,
                status: EmployeeStatus::Inactive,
                ..Employee::default()
            },
            Employee {
                name: "María López".to_string(),
                email: "maria@nicaflex.com".to_string(),
                role: Role::Manager,
                ..Employee::default()
            },
        ]
    }

    fn create_form() -> CreatePackageForm {
        CreatePackageForm {
            sender_first_name: "Juan".to_string(),
            sender_second_name: String::new(),
            sender_first_last_name: "Pérez".to_string(),
            sender_second_last_name: String::new(),
            origin_address_id: "1".to_string(),
            destination_address_id: "2".to_string(),
            receiver_name: "María López".to_string(),
            weight: "2,5".to_string(),
            length: String::new(),
            width: String::new(),
            height: String::new(),
            status: String::new(),
        }
    }

    fn assign_form(email: &str) -> AssignPackageForm {
        AssignPackageForm {
            package_id: "7".to_string(),
            courier_email: email.to_string(),
        }
    }

    #[actix_web::test]
    async fn page_lists_only_active_couriers() {
        let mut repo = MockRepository::new();
        repo.expect_list_packages().returning(|_| {
            Ok(vec![Package {
                tracking_id: "NCF-1".to_string(),
                ..Package::default()
            }])
        });
        repo.expect_list_employees().returning(|_| Ok(employees()));

        let data = load_packages_page(&repo, &user(Role::Manager), &PackageListQuery::default())
            .await
            .unwrap();
        assert!(data.can_manage);
        assert_eq!(data.packages.len(), 1);
        assert_eq!(data.couriers.len(), 1);
        assert_eq!(data.couriers[0].email, "carlos@nicaflex.com");
    }

    #[actix_web::test]
    async fn courier_list_failure_keeps_page() {
        let mut repo = MockRepository::new();
        repo.expect_list_packages().returning(|_| Ok(Vec::new()));
        repo.expect_list_employees()
            .returning(|_| Err(RepositoryError::Connection("reset".to_string())));

        let data = load_packages_page(&repo, &user(Role::Admin), &PackageListQuery::default())
            .await
            .unwrap();
        assert!(data.couriers.is_empty());
    }

    #[actix_web::test]
    async fn couriers_cannot_create_packages() {
        let mut repo = MockRepository::new();
        repo.expect_create_package().times(0);

        let result = create_package(&repo, &user(Role::Courier), create_form()).await;
        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }

    #[actix_web::test]
    async fn create_sends_validated_package() {
        let mut repo = MockRepository::new();
        repo.expect_create_package()
            .withf(|token, package| {
                token == "token"
                    && package.weight.get() == 2.5
                    && package.initial_status == PackageStatus::Processing
            })
            .times(1)
            .returning(|_, _| {
                Ok(Package {
                    tracking_id: "NCF-2025-010".to_string(),
                    ..Package::default()
                })
            });

        let created = create_package(&repo, &user(Role::Admin), create_form())
            .await
            .unwrap();
        assert_eq!(created.tracking_id, "NCF-2025-010");
    }

    #[actix_web::test]
    async fn inactive_courier_cannot_be_assigned() {
        let mut repo = MockRepository::new();
        repo.expect_list_employees().returning(|_| Ok(employees()));
        repo.expect_assign_package().times(0);

        let result = assign_package(&repo, &user(Role::Admin), assign_form("ana@nicaflex.com")).await;
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[actix_web::test]
    async fn assignment_returns_courier_name() {
        let mut repo = MockRepository::new();
        repo.expect_list_employees().returning(|_| Ok(employees()));
        repo.expect_assign_package()
            .withf(|_, id, email| id == "7" && email.as_str() == "carlos@nicaflex.com")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let name = assign_package(&repo, &user(Role::Manager), assign_form("Carlos@NicaFlex.com"))
            .await
            .unwrap();
        assert_eq!(name, "Carlos Ruiz");
    }
}

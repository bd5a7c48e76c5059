//! Courier dashboard: assigned packages and status updates.

use serde::Serialize;

use crate::domain::access::Area;
use crate::domain::package::{Package, PackageFilter, PackageStats, SearchScope, StatusUpdate};
use crate::domain::user::SessionUser;
use crate::forms::packages::{PackageListQuery, UpdateStatusForm, UpdateStatusPayload};
use crate::repository::{PackageReader, PackageWriter};
use crate::services::{ServiceError, ServiceResult, ensure_access, repository_to_form};

/// Data required to render the courier dashboard.
#[derive(Debug, Serialize)]
pub struct CourierPageData {
    pub packages: Vec<Package>,
    pub stats: PackageStats,
    pub search: String,
    pub status: Option<String>,
}

pub async fn load_courier_page<R>(
    repo: &R,
    user: &SessionUser,
    query: &PackageListQuery,
) -> ServiceResult<CourierPageData>
where
    R: PackageReader + ?Sized,
{
    ensure_access(user, Area::Courier)?;

    let packages = repo
        .list_courier_packages(user.bearer())
        .await
        .map_err(|err| {
            log::error!("Failed to load packages of courier {}: {err}", user.email);
            err
        })?;

    let filter = PackageFilter::from(query);
    Ok(CourierPageData {
        stats: PackageStats::from_packages(&packages),
        packages: filter.apply(&packages, SearchScope::Staff),
        search: filter.search().to_string(),
        status: filter.status().map(|status| status.key().to_string()),
    })
}

/// Changes the status of one of the courier's packages. Delivered packages
/// are final, and the location defaults to the package destination.
pub async fn update_status<R>(
    repo: &R,
    user: &SessionUser,
    form: UpdateStatusForm,
) -> ServiceResult<Package>
where
    R: PackageReader + PackageWriter + ?Sized,
{
    ensure_access(user, Area::Courier)?;

    let payload = UpdateStatusPayload::try_from(form)?;

    let package = repo
        .list_courier_packages(user.bearer())
        .await?
        .into_iter()
        .find(|package| package.id == payload.package_id)
        .ok_or(ServiceError::NotFound)?;

    if package.current_status.is_delivered() {
        return Err(ServiceError::Form(
            "El paquete ya fue entregado y no admite cambios".to_string(),
        ));
    }

    let update = StatusUpdate {
        status: payload.status,
        location: payload
            .location
            .unwrap_or_else(|| package.destination.clone()),
    };

    repo.update_package_status(user.bearer(), &package.id, &update)
        .await
        .map_err(repository_to_form)?;

    log::info!(
        "Courier {} moved {} to {}",
        user.email,
        package.tracking_id,
        update.status.label()
    );
    Ok(Package {
        current_status: update.status,
        ..package
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::package::PackageStatus;
    use crate::domain::user::Role;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::user;

    fn assigned() -> Vec<Package> {
        vec![
            Package {
                id: "10".to_string(),
                tracking_id: "NCF-10".to_string(),
                destination: "Granada, Nicaragua".to_string(),
                current_status: PackageStatus::InTransit,
                ..Package::default()
            },
            Package {
                id: "11".to_string(),
                tracking_id: "NCF-11".to_string(),
                current_status: PackageStatus::Delivered,
                ..Package::default()
            },
        ]
    }

    fn form(id: &str, location: &str) -> UpdateStatusForm {
        UpdateStatusForm {
            package_id: id.to_string(),
            status: "En camino a entrega".to_string(),
            location: location.to_string(),
        }
    }

    #[actix_web::test]
    async fn customers_cannot_open_courier_dashboard() {
        let repo = MockRepository::new();
        let result =
            load_courier_page(&repo, &user(Role::Customer), &PackageListQuery::default()).await;
        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }

    #[actix_web::test]
    async fn location_defaults_to_destination() {
        let mut repo = MockRepository::new();
        repo.expect_list_courier_packages()
            .returning(|_| Ok(assigned()));
        repo.expect_update_package_status()
            .withf(|token, id, update| {
                token == "token"
                    && id == "10"
                    && update.status == PackageStatus::OutForDelivery
                    && update.location == "Granada, Nicaragua"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let package = update_status(&repo, &user(Role::Courier), form("10", ""))
            .await
            .unwrap();
        assert_eq!(package.current_status, PackageStatus::OutForDelivery);
    }

    #[actix_web::test]
    async fn delivered_packages_are_final() {
        let mut repo = MockRepository::new();
        repo.expect_list_courier_packages()
            .returning(|_| Ok(assigned()));
        repo.expect_update_package_status().times(0);

        let result = update_status(&repo, &user(Role::Courier), form("11", "León")).await;
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[actix_web::test]
    async fn unknown_package_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_list_courier_packages()
            .returning(|_| Ok(assigned()));

        let result = update_status(&repo, &user(Role::Courier), form("99", "")).await;
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[actix_web::test]
    async fn stats_cover_all_assigned_packages() {
        let mut repo = MockRepository::new();
        repo.expect_list_courier_packages()
            .returning(|_| Ok(assigned()));

        let query = PackageListQuery {
            search: Some("ncf-10".to_string()),
            status: None,
        };
        let data = load_courier_page(&repo, &user(Role::Courier), &query)
            .await
            .unwrap();
        assert_eq!(data.stats.total, 2);
        assert_eq!(data.stats.pending, 1);
        assert_eq!(data.packages.len(), 1);
    }
}

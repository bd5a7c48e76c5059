//! Customer self-service: package history and address book.

use serde::Serialize;

use crate::domain::access::Area;
use crate::domain::address::{Address, NewAddress};
use crate::domain::package::{Package, PackageFilter, PackageStats, SearchScope};
use crate::domain::user::SessionUser;
use crate::forms::addresses::AddAddressForm;
use crate::forms::packages::PackageListQuery;
use crate::repository::{AccountGateway, PackageReader};
use crate::services::{ServiceResult, ensure_access, repository_to_form};

/// Data required to render the customer's package history.
#[derive(Debug, Serialize)]
pub struct MyPackagesPageData {
    pub packages: Vec<Package>,
    /// Counters over the whole history, before search and filter.
    pub stats: PackageStats,
    pub search: String,
    pub status: Option<String>,
}

/// Keeps packages addressed to `email`; packages without a receiver email
/// are trusted to the backend's own scoping.
fn belongs_to(package: &Package, email: &str) -> bool {
    package.receiver_email.is_empty() || package.receiver_email.eq_ignore_ascii_case(email)
}

pub async fn load_my_packages<R>(
    repo: &R,
    user: &SessionUser,
    query: &PackageListQuery,
) -> ServiceResult<MyPackagesPageData>
where
    R: PackageReader + ?Sized,
{
    ensure_access(user, Area::Customer)?;

    let packages: Vec<Package> = repo
        .list_customer_packages(user.bearer())
        .await
        .map_err(|err| {
            log::error!("Failed to load packages of {}: {err}", user.email);
            err
        })?
        .into_iter()
        .filter(|package| belongs_to(package, &user.email))
        .collect();

    let stats = PackageStats::from_packages(&packages);
    let filter = PackageFilter::from(query);

    Ok(MyPackagesPageData {
        packages: filter.apply(&packages, SearchScope::Customer),
        stats,
        search: filter.search().to_string(),
        status: filter.status().map(|status| status.key().to_string()),
    })
}

pub async fn load_addresses<R>(repo: &R, user: &SessionUser) -> ServiceResult<Vec<Address>>
where
    R: AccountGateway + ?Sized,
{
    ensure_access(user, Area::Customer)?;

    let addresses = repo.list_addresses(user.bearer()).await.map_err(|err| {
        log::error!("Failed to load addresses of {}: {err}", user.email);
        err
    })?;
    Ok(addresses)
}

pub async fn add_address<R>(repo: &R, user: &SessionUser, form: AddAddressForm) -> ServiceResult<()>
where
    R: AccountGateway + ?Sized,
{
    ensure_access(user, Area::Customer)?;

    let address = NewAddress::try_from(form)?;
    repo.add_address(user.bearer(), &address)
        .await
        .map_err(repository_to_form)?;
    log::info!("User {} added an address in {}", user.email, address.city);
    Ok(())
}

//! Access to the REST backend, split into narrow traits so services only
//! depend on the calls they make.

use async_trait::async_trait;

use crate::domain::address::{Address, NewAddress};
use crate::domain::employee::{Employee, EmployeeStatus, NewEmployee};
use crate::domain::package::{NewPackage, Package, StatusUpdate};
use crate::domain::types::{EmailAddress, TrackingId};
use crate::domain::user::{NewCustomer, SessionUser};
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use http::HttpRepository;

/// Sign-in, sign-up and the customer's address book.
#[async_trait]
pub trait AccountGateway: Send + Sync {
    async fn login(&self, email: &EmailAddress, password: &str) -> RepositoryResult<SessionUser>;
    async fn register_customer(&self, customer: &NewCustomer) -> RepositoryResult<SessionUser>;
    async fn add_address(&self, token: &str, address: &NewAddress) -> RepositoryResult<()>;
    async fn list_addresses(&self, token: &str) -> RepositoryResult<Vec<Address>>;
}

#[async_trait]
pub trait PackageReader: Send + Sync {
    /// Public lookup; an unknown code yields `Ok(None)`.
    async fn track_package(&self, code: &TrackingId) -> RepositoryResult<Option<Package>>;
    /// Every package, as used by the admin panel and reports.
    async fn list_packages(&self, token: &str) -> RepositoryResult<Vec<Package>>;
    /// Packages assigned to the courier owning `token`.
    async fn list_courier_packages(&self, token: &str) -> RepositoryResult<Vec<Package>>;
    /// Packages of the customer owning `token`.
    async fn list_customer_packages(&self, token: &str) -> RepositoryResult<Vec<Package>>;
}

#[async_trait]
pub trait PackageWriter: Send + Sync {
    async fn create_package(&self, token: &str, package: &NewPackage) -> RepositoryResult<Package>;
    async fn assign_package(
        &self,
        token: &str,
        package_id: &str,
        courier_email: &EmailAddress,
    ) -> RepositoryResult<()>;
    async fn update_package_status(
        &self,
        token: &str,
        package_id: &str,
        update: &StatusUpdate,
    ) -> RepositoryResult<()>;
}

#[async_trait]
pub trait EmployeeReader: Send + Sync {
    async fn list_employees(&self, token: &str) -> RepositoryResult<Vec<Employee>>;
}

#[async_trait]
pub trait EmployeeWriter: Send + Sync {
    async fn register_employee(&self, token: &str, employee: &NewEmployee) -> RepositoryResult<()>;
    async fn update_employee_status(
        &self,
        token: &str,
        email: &EmailAddress,
        status: EmployeeStatus,
    ) -> RepositoryResult<()>;
    async fn delete_employee(&self, token: &str, email: &EmailAddress) -> RepositoryResult<()>;
}

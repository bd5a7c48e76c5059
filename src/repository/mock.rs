//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::address::{Address, NewAddress};
use crate::domain::employee::{Employee, EmployeeStatus, NewEmployee};
use crate::domain::package::{NewPackage, Package, StatusUpdate};
use crate::domain::types::{EmailAddress, TrackingId};
use crate::domain::user::{NewCustomer, SessionUser};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AccountGateway, EmployeeReader, EmployeeWriter, PackageReader, PackageWriter,
};

mock! {
    pub Repository {}

    #[async_trait]
    impl AccountGateway for Repository {
        async fn login(&self, email: &EmailAddress, password: &str) -> RepositoryResult<SessionUser>;
        async fn register_customer(&self, customer: &NewCustomer) -> RepositoryResult<SessionUser>;
        async fn add_address(&self, token: &str, address: &NewAddress) -> RepositoryResult<()>;
        async fn list_addresses(&self, token: &str) -> RepositoryResult<Vec<Address>>;
    }

    #[async_trait]
    impl PackageReader for Repository {
        async fn track_package(&self, code: &TrackingId) -> RepositoryResult<Option<Package>>;
        async fn list_packages(&self, token: &str) -> RepositoryResult<Vec<Package>>;
        async fn list_courier_packages(&self, token: &str) -> RepositoryResult<Vec<Package>>;
        async fn list_customer_packages(&self, token: &str) -> RepositoryResult<Vec<Package>>;
    }

    #[async_trait]
    impl PackageWriter for Repository {
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
    impl EmployeeReader for Repository {
        async fn list_employees(&self, token: &str) -> RepositoryResult<Vec<Employee>>;
    }

    #[async_trait]
    impl EmployeeWriter for Repository {
        async fn register_employee(&self, token: &str, employee: &NewEmployee) -> RepositoryResult<()>;
        async fn update_employee_status(
            &self,
            token: &str,
            email: &EmailAddress,
            status: EmployeeStatus,
        ) -> RepositoryResult<()>;
        async fn delete_employee(&self, token: &str, email: &EmailAddress) -> RepositoryResult<()>;
    }
}

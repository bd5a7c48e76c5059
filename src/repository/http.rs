//! Reqwest-backed implementation of every repository trait.
//!
//! The adapter owns transport details only: URL building, bearer tokens,
//! HTTP error mapping and JSON decoding into domain types.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::address::{Address, NewAddress};
use crate::domain::employee::{Employee, EmployeeStatus, NewEmployee};
use crate::domain::package::{NewPackage, Package, StatusUpdate};
use crate::domain::types::{EmailAddress, TrackingId};
use crate::domain::user::{NewCustomer, SessionUser};
use crate::models::account::{LoginRequest, RegisterUserRequest, UserResponse};
use crate::models::address as address_models;
use crate::models::employee as employee_models;
use crate::models::package as package_models;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    AccountGateway, EmployeeReader, EmployeeWriter, PackageReader, PackageWriter,
};

/// Client for the Nica Flex REST backend.
#[derive(Clone, Debug)]
pub struct HttpRepository {
    client: Client,
    base_url: Url,
}

impl HttpRepository {
    /// Builds the adapter with one shared connection pool and a request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidRequest`] when `base_url` is not an
    /// absolute http(s) URL and [`RepositoryError::Connection`] when the
    /// reqwest client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> RepositoryResult<Self> {
        let base_url = Url::parse(base_url.trim().trim_end_matches('/')).map_err(|err| {
            RepositoryError::InvalidRequest(format!("invalid backend url `{base_url}`: {err}"))
        })?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(RepositoryError::InvalidRequest(format!(
                "backend url `{base_url}` must be an absolute http(s) url"
            )));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| RepositoryError::Connection(err.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> RepositoryResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                RepositoryError::InvalidRequest("backend url cannot carry a path".to_string())
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
        token: Option<&str>,
    ) -> RepositoryResult<RequestBuilder> {
        let url = self.endpoint(segments)?;
        log::debug!("{method} {url}");
        let mut builder = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        if let Some(token) = token.filter(|token| !token.is_empty()) {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        token: Option<&str>,
    ) -> RepositoryResult<T> {
        let body = send(self.request(Method::GET, segments, token)?).await?;
        decode(&body)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        token: &str,
    ) -> RepositoryResult<Vec<T>> {
        let body = send(self.request(Method::GET, segments, Some(token))?).await?;
        decode_list(&body)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        token: Option<&str>,
        payload: &B,
    ) -> RepositoryResult<Vec<u8>> {
        send(self.request(method, segments, token)?.json(payload)).await
    }
}

async fn send(builder: RequestBuilder) -> RepositoryResult<Vec<u8>> {
    let response = builder.send().await.map_err(map_transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        let err = map_status_error(status, body.as_ref());
        log::warn!("Backend answered {status}: {err}");
        return Err(err);
    }
    Ok(body.to_vec())
}

fn map_transport_error(err: reqwest::Error) -> RepositoryError {
    RepositoryError::Connection(err.to_string())
}

/// Uses the backend's `message` when the error body carries one.
fn map_status_error(status: StatusCode, body: &[u8]) -> RepositoryError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "mensaje"]
                .iter()
                .find_map(|key| value.get(key).and_then(Value::as_str).map(str::to_owned))
        })
        .filter(|message| !message.trim().is_empty());

    match message {
        Some(message) => RepositoryError::Status {
            status: status.as_u16(),
            message,
        },
        None if status == StatusCode::NOT_FOUND => RepositoryError::NotFound,
        None => RepositoryError::Status {
            status: status.as_u16(),
            message: format!("Error: {}", status.as_u16()),
        },
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> RepositoryResult<T> {
    serde_json::from_slice(body).map_err(|err| RepositoryError::Decode(err.to_string()))
}

/// Lists come either as a bare array or wrapped in `{"data": [...]}`.
fn decode_list<T: DeserializeOwned>(body: &[u8]) -> RepositoryResult<Vec<T>> {
    let value: Value = decode(body)?;
    let items = match value {
        Value::Array(_) => value,
        Value::Object(mut object) => object.remove("data").unwrap_or(Value::Array(Vec::new())),
        Value::Null => Value::Array(Vec::new()),
        other => {
            return Err(RepositoryError::Decode(format!(
                "expected a list, got `{other}`"
            )));
        }
    };
    serde_json::from_value(items).map_err(|err| RepositoryError::Decode(err.to_string()))
}

fn into_domain<W, D>(items: Vec<W>) -> Vec<D>
where
    W: Into<D>,
{
    items.into_iter().map(Into::into).collect()
}

#[async_trait]
impl AccountGateway for HttpRepository {
    async fn login(&self, email: &EmailAddress, password: &str) -> RepositoryResult<SessionUser> {
        let payload = LoginRequest {
            email: email.as_str(),
            password,
        };
        let body = self
            .send_json(Method::POST, &["user", "login"], None, &payload)
            .await?;
        let response: UserResponse = decode(&body)?;
        Ok(response.into())
    }

    async fn register_customer(&self, customer: &NewCustomer) -> RepositoryResult<SessionUser> {
        let payload = RegisterUserRequest::from(customer);
        let body = self
            .send_json(Method::POST, &["user", "register"], None, &payload)
            .await?;
        let response: UserResponse = decode(&body)?;
        Ok(response.into())
    }

    async fn add_address(&self, token: &str, address: &NewAddress) -> RepositoryResult<()> {
        let payload = address_models::NewAddress::from(address);
        self.send_json(Method::POST, &["user", "dirección"], Some(token), &payload)
            .await?;
        Ok(())
    }

    async fn list_addresses(&self, token: &str) -> RepositoryResult<Vec<Address>> {
        let addresses: Vec<address_models::Address> =
            self.get_list(&["user", "misDirecciones"], token).await?;
        Ok(into_domain(addresses))
    }
}

#[async_trait]
impl PackageReader for HttpRepository {
    async fn track_package(&self, code: &TrackingId) -> RepositoryResult<Option<Package>> {
        let result: RepositoryResult<Option<package_models::Package>> =
            self.get(&["user", "tracking", code.as_str()], None).await;
        match result {
            Ok(package) => Ok(package.map(Into::into)),
            Err(RepositoryError::NotFound | RepositoryError::Status { status: 404, .. }) => {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn list_packages(&self, token: &str) -> RepositoryResult<Vec<Package>> {
        let packages: Vec<package_models::Package> = self
            .get_list(&["admin", "paquetes", "reportes"], token)
            .await?;
        Ok(into_domain(packages))
    }

    async fn list_courier_packages(&self, token: &str) -> RepositoryResult<Vec<Package>> {
        let packages: Vec<package_models::Package> =
            self.get_list(&["courier", "paquetes"], token).await?;
        Ok(into_domain(packages))
    }

    async fn list_customer_packages(&self, token: &str) -> RepositoryResult<Vec<Package>> {
        let packages: Vec<package_models::Package> =
            self.get_list(&["user", "misPaquetes"], token).await?;
        Ok(into_domain(packages))
    }
}

#[async_trait]
impl PackageWriter for HttpRepository {
    async fn create_package(&self, token: &str, package: &NewPackage) -> RepositoryResult<Package> {
        let payload = package_models::NewPackage::from(package);
        let body = self
            .send_json(
                Method::POST,
                &["admin", "paquetes", "crear"],
                Some(token),
                &payload,
            )
            .await?;
        let created: package_models::Package = decode(&body)?;
        Ok(created.into())
    }

    async fn assign_package(
        &self,
        token: &str,
        package_id: &str,
        courier_email: &EmailAddress,
    ) -> RepositoryResult<()> {
        let payload = package_models::AssignPackage {
            assigned_to: courier_email.as_str(),
        };
        self.send_json(
            Method::PUT,
            &["admin", "paquetes", "asignar", package_id],
            Some(token),
            &payload,
        )
        .await?;
        Ok(())
    }

    async fn update_package_status(
        &self,
        token: &str,
        package_id: &str,
        update: &StatusUpdate,
    ) -> RepositoryResult<()> {
        let payload = package_models::UpdatePackageStatus::from(update);
        self.send_json(
            Method::PUT,
            &["courier", "paquetes", package_id],
            Some(token),
            &payload,
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl EmployeeReader for HttpRepository {
    async fn list_employees(&self, token: &str) -> RepositoryResult<Vec<Employee>> {
        let managers: Vec<employee_models::Manager> = self
            .get_list(&["admin", "manager", "roles"], token)
            .await?;
        Ok(into_domain(managers))
    }
}

#[async_trait]
impl EmployeeWriter for HttpRepository {
    async fn register_employee(&self, token: &str, employee: &NewEmployee) -> RepositoryResult<()> {
        let payload = employee_models::NewManager::from(employee);
        self.send_json(
            Method::POST,
            &["admin", "manager", "register"],
            Some(token),
            &payload,
        )
        .await?;
        Ok(())
    }

    async fn update_employee_status(
        &self,
        token: &str,
        email: &EmailAddress,
        status: EmployeeStatus,
    ) -> RepositoryResult<()> {
        let payload = employee_models::UpdateManagerStatus::from(status);
        self.send_json(
            Method::PUT,
            &["admin", "manager", "update", email.as_str()],
            Some(token),
            &payload,
        )
        .await?;
        Ok(())
    }

    async fn delete_employee(&self, token: &str, email: &EmailAddress) -> RepositoryResult<()> {
        let request = self.request(
            Method::DELETE,
            &["admin", "manager", "delete", email.as_str()],
            Some(token),
        )?;
        send(request).await?;
        Ok(())
    }
}

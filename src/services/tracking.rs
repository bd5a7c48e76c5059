use serde::Serialize;

use crate::domain::package::Package;
use crate::domain::types::TrackingId;
use crate::repository::PackageReader;
use crate::services::{ServiceError, ServiceResult};

/// Data required to render the tracking page.
#[derive(Debug, Serialize)]
pub struct TrackingPageData {
    /// Normalized code that was searched, if any.
    pub query: Option<String>,
    pub package: Option<Package>,
    /// Set when a search ran and found nothing.
    pub not_found: bool,
}

/// Looks a package up by tracking code. A blank or missing code renders the
/// empty search form.
pub async fn track_package<R>(repo: &R, code: Option<&str>) -> ServiceResult<TrackingPageData>
where
    R: PackageReader + ?Sized,
{
    let Some(code) = code.and_then(|code| TrackingId::new(code).ok()) else {
        return Ok(TrackingPageData {
            query: None,
            package: None,
            not_found: false,
        });
    };

    let package = repo.track_package(&code).await.map_err(|err| {
        log::error!("Failed to track package {code}: {err}");
        ServiceError::from(err)
    })?;

    Ok(TrackingPageData {
        query: Some(code.as_str().to_string()),
        not_found: package.is_none(),
        package,
    })
}

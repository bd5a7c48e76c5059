//! Package creation, assignment and status forms plus the list queries.

use serde::Deserialize;

use crate::domain::package::{NewPackage, PackageFilter, PackageStatus};
use crate::domain::types::{Dimension, EmailAddress, Weight};
use crate::forms::{FormError, optional_name, required, required_name};

#[derive(Debug, Deserialize)]
pub struct CreatePackageForm {
    pub sender_first_name: String,
    #[serde(default)]
    pub sender_second_name: String,
    pub sender_first_last_name: String,
    #[serde(default)]
    pub sender_second_last_name: String,
    pub origin_address_id: String,
    pub destination_address_id: String,
    pub receiver_name: String,
    pub weight: String,
    #[serde(default)]
    pub length: String,
    #[serde(default)]
    pub width: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub status: String,
}

fn parse_address_id(value: &str) -> Result<i64, FormError> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or(FormError::InvalidAddressId)
}

/// Accepts a decimal comma as well as a point.
fn parse_number(value: &str) -> Option<f64> {
    value.trim().replace(',', ".").parse::<f64>().ok()
}

fn parse_dimension(value: &str) -> Result<Option<Dimension>, FormError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    let number = parse_number(value).ok_or(FormError::InvalidDimension)?;
    Dimension::new(number)
        .map(Some)
        .map_err(|_| FormError::InvalidDimension)
}

/// Parses a status picked from the known list; free text is rejected.
fn parse_known_status(value: &str) -> Result<PackageStatus, FormError> {
    match PackageStatus::parse(value) {
        PackageStatus::Other(_) => Err(FormError::InvalidStatus),
        status => Ok(status),
    }
}

impl TryFrom<CreatePackageForm> for NewPackage {
    type Error = FormError;

    fn try_from(form: CreatePackageForm) -> Result<Self, Self::Error> {
        let weight = parse_number(&form.weight)
            .and_then(|value| Weight::new(value).ok())
            .ok_or(FormError::InvalidWeight)?;
        let initial_status = if form.status.trim().is_empty() {
            PackageStatus::default()
        } else {
            parse_known_status(&form.status)?
        };

        Ok(Self {
            sender_first_name: required_name(&form.sender_first_name, 1)?,
            sender_second_name: optional_name(&form.sender_second_name)?,
            sender_first_last_name: required_name(&form.sender_first_last_name, 1)?,
            sender_second_last_name: optional_name(&form.sender_second_last_name)?,
            origin_address_id: parse_address_id(&form.origin_address_id)?,
            destination_address_id: parse_address_id(&form.destination_address_id)?,
            receiver_name: required(&form.receiver_name, "receptor")?,
            weight,
            length: parse_dimension(&form.length)?,
            width: parse_dimension(&form.width)?,
            height: parse_dimension(&form.height)?,
            initial_status,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct AssignPackageForm {
    pub package_id: String,
    pub courier_email: String,
}

pub struct AssignPackagePayload {
    pub package_id: String,
    pub courier_email: EmailAddress,
}

impl TryFrom<AssignPackageForm> for AssignPackagePayload {
    type Error = FormError;

    fn try_from(form: AssignPackageForm) -> Result<Self, Self::Error> {
        Ok(Self {
            package_id: required(&form.package_id, "paquete")?,
            courier_email: EmailAddress::new(form.courier_email)
                .map_err(|_| FormError::InvalidEmail)?,
        })
    }
}

/// Courier status change. A blank location falls back to the destination.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusForm {
    pub package_id: String,
    pub status: String,
    #[serde(default)]
    pub location: String,
}

pub struct UpdateStatusPayload {
    pub package_id: String,
    pub status: PackageStatus,
    pub location: Option<String>,
}

impl TryFrom<UpdateStatusForm> for UpdateStatusPayload {
    type Error = FormError;

    fn try_from(form: UpdateStatusForm) -> Result<Self, Self::Error> {
        let location = form.location.trim().to_string();
        Ok(Self {
            package_id: required(&form.package_id, "paquete")?,
            status: parse_known_status(&form.status)?,
            location: (!location.is_empty()).then_some(location),
        })
    }
}

/// Search box and status select shared by the package lists.
#[derive(Debug, Default, Deserialize)]
pub struct PackageListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
}

impl From<&PackageListQuery> for PackageFilter {
    fn from(query: &PackageListQuery) -> Self {
        PackageFilter::new(query.search.as_deref(), query.status.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TrackingQuery {
    pub id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_form() -> CreatePackageForm {
        CreatePackageForm {
            sender_first_name: "Tech".to_string(),
            sender_second_name: String::new(),
            sender_first_last_name: "Store".to_string(),
            sender_second_last_name: String::new(),
            origin_address_id: "1".to_string(),
            destination_address_id: " 2 ".to_string(),
            receiver_name: "Juan Pérez".to_string(),
            weight: "2,5".to_string(),
            length: "30".to_string(),
            width: String::new(),
            height: String::new(),
            status: String::new(),
        }
    }

    #[test]
    fn create_form_parses_numbers() {
        let package = NewPackage::try_from(create_form()).unwrap();
        assert_eq!(package.weight.get(), 2.5);
        assert_eq!(package.destination_address_id, 2);
        assert_eq!(package.length.map(Dimension::get), Some(30.0));
        assert_eq!(package.width, None);
        assert_eq!(package.initial_status, PackageStatus::Processing);
    }

    #[test]
    fn free_text_reaches_the_backend_verbatim() {
        let form = CreatePackageForm {
            receiver_name: " Pérez & Hijos <Ltda> ".to_string(),
            ..create_form()
        };
        let package = NewPackage::try_from(form).unwrap();
        assert_eq!(package.receiver_name, "Pérez & Hijos <Ltda>");

        let payload = UpdateStatusPayload::try_from(UpdateStatusForm {
            package_id: "7".to_string(),
            status: "en tránsito".to_string(),
            location: "Rotonda A&B".to_string(),
        })
        .unwrap();
        assert_eq!(payload.location.as_deref(), Some("Rotonda A&B"));
    }

    #[test]
    fn create_form_rejects_light_packages_and_bad_dimensions() {
        let form = CreatePackageForm {
            weight: "0.05".to_string(),
            ..create_form()
        };
        assert!(matches!(
            NewPackage::try_from(form),
            Err(FormError::InvalidWeight)
        ));

        let form = CreatePackageForm {
            height: "-3".to_string(),
            ..create_form()
        };
        assert!(matches!(
            NewPackage::try_from(form),
            Err(FormError::InvalidDimension)
        ));

        let form = CreatePackageForm {
            origin_address_id: "abc".to_string(),
            ..create_form()
        };
        assert!(matches!(
            NewPackage::try_from(form),
            Err(FormError::InvalidAddressId)
        ));
    }

    #[test]
    fn status_form_rejects_unknown_status() {
        let form = UpdateStatusForm {
            package_id: "7".to_string(),
            status: "Perdido".to_string(),
            location: String::new(),
        };
        assert!(matches!(
            UpdateStatusPayload::try_from(form),
            Err(FormError::InvalidStatus)
        ));

        let form = UpdateStatusForm {
            package_id: "7".to_string(),
            status: "en aduana".to_string(),
            location: "  ".to_string(),
        };
        let payload = UpdateStatusPayload::try_from(form).unwrap();
        assert_eq!(payload.status, PackageStatus::Customs);
        assert_eq!(payload.location, None);
    }
}

//! Package payloads exchanged with the backend.

use serde::{Deserialize, Serialize};

use crate::domain::package::{
    Coordinates as DomainCoordinates, NewPackage as DomainNewPackage, Package as DomainPackage,
    PackageStatus, StatusEvent as DomainStatusEvent, StatusUpdate,
};
use crate::models::{lenient_optional_string, lenient_string};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusEvent {
    #[serde(deserialize_with = "lenient_string", alias = "estado")]
    pub status: String,
    #[serde(deserialize_with = "lenient_string", alias = "ubicacion")]
    pub location: String,
    #[serde(deserialize_with = "lenient_string", alias = "fecha")]
    pub date: String,
    #[serde(deserialize_with = "lenient_string", alias = "hora")]
    pub time: String,
    #[serde(alias = "completado")]
    pub completed: bool,
}

impl From<StatusEvent> for DomainStatusEvent {
    fn from(event: StatusEvent) -> Self {
        Self {
            status: event.status,
            location: event.location,
            date: event.date,
            time: event.time,
            completed: event.completed,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    #[serde(alias = "lon", alias = "long")]
    pub lng: f64,
}

/// Package as returned by tracking, listing and mutation endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Package {
    #[serde(
        deserialize_with = "lenient_string",
        alias = "ID",
        alias = "_id",
        alias = "ID_Paquete"
    )]
    pub id: String,
    #[serde(
        deserialize_with = "lenient_string",
        alias = "trackingId",
        alias = "codigo",
        alias = "codigoSeguimiento"
    )]
    pub tracking_id: String,
    #[serde(deserialize_with = "lenient_string", alias = "descripcion")]
    pub description: String,
    #[serde(deserialize_with = "lenient_string", alias = "Peso", alias = "peso")]
    pub weight: String,
    #[serde(deserialize_with = "lenient_string", alias = "origen")]
    pub origin: String,
    #[serde(deserialize_with = "lenient_string", alias = "destino")]
    pub destination: String,
    #[serde(deserialize_with = "lenient_string", alias = "remitente")]
    pub sender: String,
    #[serde(
        deserialize_with = "lenient_string",
        alias = "receptor",
        alias = "n_Receptor"
    )]
    pub receiver: String,
    #[serde(
        deserialize_with = "lenient_string",
        alias = "receiverEmail",
        alias = "emailReceptor"
    )]
    pub receiver_email: String,
    #[serde(
        deserialize_with = "lenient_string",
        alias = "currentStatus",
        alias = "estado",
        alias = "nombreEstado"
    )]
    pub current_status: String,
    #[serde(
        deserialize_with = "lenient_string",
        alias = "estimatedDelivery",
        alias = "fechaEstimada"
    )]
    pub estimated_delivery: String,
    #[serde(
        deserialize_with = "lenient_string",
        alias = "createdAt",
        alias = "fechaCreacion"
    )]
    pub created_at: String,
    #[serde(deserialize_with = "lenient_optional_string", alias = "assignedTo")]
    pub assigned_to: Option<String>,
    #[serde(
        deserialize_with = "lenient_optional_string",
        alias = "assignedToName"
    )]
    pub assigned_to_name: Option<String>,
    pub coordinates: Option<Coordinates>,
    #[serde(alias = "historial")]
    pub history: Option<Vec<StatusEvent>>,
}

impl From<Package> for DomainPackage {
    fn from(package: Package) -> Self {
        Self {
            id: package.id,
            tracking_id: package.tracking_id.trim().to_uppercase(),
            description: package.description,
            weight: package.weight,
            origin: package.origin,
            destination: package.destination,
            sender: package.sender,
            receiver: package.receiver,
            receiver_email: package.receiver_email.trim().to_lowercase(),
            current_status: PackageStatus::parse(&package.current_status),
            estimated_delivery: package.estimated_delivery,
            created_at: package.created_at,
            assigned_to: package.assigned_to.map(|email| email.to_lowercase()),
            assigned_to_name: package.assigned_to_name,
            coordinates: package.coordinates.map(|c| DomainCoordinates {
                lat: c.lat,
                lng: c.lng,
            }),
            history: package
                .history
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

/// Body of `POST /admin/paquetes/crear`.
#[derive(Debug, Serialize)]
pub struct NewPackage<'a> {
    #[serde(rename = "Pnom")]
    pub first_name: &'a str,
    #[serde(rename = "Snom")]
    pub second_name: &'a str,
    #[serde(rename = "Papellido")]
    pub first_last_name: &'a str,
    #[serde(rename = "Sapellido")]
    pub second_last_name: &'a str,
    #[serde(rename = "ID_Direccion_Origen")]
    pub origin_address_id: i64,
    #[serde(rename = "ID_Direccion_Destino")]
    pub destination_address_id: i64,
    #[serde(rename = "n_Receptor")]
    pub receiver_name: &'a str,
    #[serde(rename = "Peso")]
    pub weight: f64,
    #[serde(rename = "Largo", skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(rename = "Ancho", skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(rename = "Alto", skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(rename = "nombreEstado")]
    pub status: &'a str,
}

impl<'a> From<&'a DomainNewPackage> for NewPackage<'a> {
    fn from(package: &'a DomainNewPackage) -> Self {
        Self {
            first_name: package.sender_first_name.as_str(),
            second_name: package.sender_second_name.as_deref().unwrap_or_default(),
            first_last_name: package.sender_first_last_name.as_str(),
            second_last_name: package.sender_second_last_name.as_deref().unwrap_or_default(),
            origin_address_id: package.origin_address_id,
            destination_address_id: package.destination_address_id,
            receiver_name: &package.receiver_name,
            weight: package.weight.get(),
            length: package.length.map(|d| d.get()),
            width: package.width.map(|d| d.get()),
            height: package.height.map(|d| d.get()),
            status: package.initial_status.label(),
        }
    }
}

/// Body of `PUT /admin/paquetes/asignar/{id}`.
#[derive(Debug, Serialize)]
pub struct AssignPackage<'a> {
    #[serde(rename = "assignedTo")]
    pub assigned_to: &'a str,
}

/// Body of `PUT /courier/paquetes/{id}`.
#[derive(Debug, Serialize)]
pub struct UpdatePackageStatus<'a> {
    #[serde(rename = "currentStatus")]
    pub current_status: &'a str,
    pub location: &'a str,
}

impl<'a> From<&'a StatusUpdate> for UpdatePackageStatus<'a> {
    fn from(update: &'a StatusUpdate) -> Self {
        Self {
            current_status: update.status.label(),
            location: &update.location,
        }
    }
}

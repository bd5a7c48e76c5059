use serde::{Deserialize, Serialize};

use crate::domain::address::{Address as DomainAddress, NewAddress as DomainNewAddress};
use crate::models::{lenient_i64, lenient_string};

/// Address as listed by `GET /user/misDirecciones`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Address {
    #[serde(
        deserialize_with = "lenient_i64",
        alias = "ID_Direccion",
        alias = "idDireccion",
        alias = "id_direccion"
    )]
    pub id: i64,
    #[serde(deserialize_with = "lenient_string", alias = "calle")]
    pub street: String,
    #[serde(deserialize_with = "lenient_string", alias = "ciudad")]
    pub city: String,
    #[serde(deserialize_with = "lenient_string", alias = "departamento")]
    pub department: String,
    #[serde(
        deserialize_with = "lenient_string",
        alias = "codigoPostal",
        alias = "postalCode"
    )]
    pub postal_code: String,
    #[serde(deserialize_with = "lenient_string", alias = "pais")]
    pub country: String,
}

impl From<Address> for DomainAddress {
    fn from(address: Address) -> Self {
        Self {
            id: address.id,
            street: address.street,
            city: address.city,
            department: address.department,
            postal_code: address.postal_code,
            country: address.country,
        }
    }
}

/// Body of `POST /user/dirección`.
#[derive(Debug, Serialize)]
pub struct NewAddress<'a> {
    #[serde(rename = "calle")]
    pub street: &'a str,
    #[serde(rename = "ciudad")]
    pub city: &'a str,
    #[serde(rename = "departamento")]
    pub department: &'a str,
    #[serde(rename = "codigoPostal")]
    pub postal_code: &'a str,
    #[serde(rename = "pais")]
    pub country: &'a str,
}

impl<'a> From<&'a DomainNewAddress> for NewAddress<'a> {
    fn from(address: &'a DomainNewAddress) -> Self {
        Self {
            street: address.street.as_str(),
            city: address.city.as_str(),
            department: address.department.as_str(),
            postal_code: address.postal_code.as_str(),
            country: address.country.as_str(),
        }
    }
}

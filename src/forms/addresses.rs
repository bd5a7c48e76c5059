use serde::Deserialize;

use crate::domain::address::NewAddress;
use crate::domain::types::{City, Country, Department, PostalCode, Street};
use crate::forms::FormError;

#[derive(Debug, Deserialize)]
pub struct AddAddressForm {
    pub street: String,
    pub city: String,
    pub department: String,
    pub postal_code: String,
    pub country: String,
}

impl TryFrom<AddAddressForm> for NewAddress {
    type Error = FormError;

    fn try_from(form: AddAddressForm) -> Result<Self, Self::Error> {
        Ok(Self {
            street: Street::new(form.street)
                .map_err(|_| FormError::InvalidAddressField("calle", 40))?,
            city: City::new(form.city).map_err(|_| FormError::InvalidAddressField("ciudad", 40))?,
            department: Department::new(form.department)
                .map_err(|_| FormError::InvalidAddressField("departamento", 30))?,
            postal_code: PostalCode::new(form.postal_code)
                .map_err(|_| FormError::InvalidAddressField("código postal", 20))?,
            country: Country::new(form.country)
                .map_err(|_| FormError::InvalidAddressField("país", 60))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> AddAddressForm {
        AddAddressForm {
            street: " Del Puente El Edén 2c abajo ".to_string(),
            city: "Managua".to_string(),
            department: "Managua".to_string(),
            postal_code: "11001".to_string(),
            country: "Nicaragua".to_string(),
        }
    }

    #[test]
    fn address_fields_are_trimmed() {
        let address = NewAddress::try_from(form()).unwrap();
        assert_eq!(address.street.as_str(), "Del Puente El Edén 2c abajo");
    }

    #[test]
    fn address_limits_are_enforced() {
        let too_long = AddAddressForm {
            department: "x".repeat(31),
            ..form()
        };
        assert_eq!(
            NewAddress::try_from(too_long).unwrap_err(),
            FormError::InvalidAddressField("departamento", 30)
        );

        let blank = AddAddressForm {
            country: " ".to_string(),
            ..form()
        };
        assert_eq!(
            NewAddress::try_from(blank).unwrap_err().to_string(),
            "El campo país es obligatorio y admite hasta 60 caracteres"
        );
    }
}

use serde::Serialize;

use crate::domain::types::{City, Country, Department, PostalCode, Street};

/// Address saved in a customer's address book.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct Address {
    pub id: i64,
    pub street: String,
    pub city: String,
    pub department: String,
    pub postal_code: String,
    pub country: String,
}

impl Address {
    /// One-line rendering used in selects and lists.
    pub fn summary(&self) -> String {
        [
            &self.street,
            &self.city,
            &self.department,
            &self.postal_code,
            &self.country,
        ]
        .into_iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAddress {
    pub street: Street,
    pub city: City,
    pub department: Department,
    pub postal_code: PostalCode,
    pub country: Country,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_skips_blank_parts() {
        let address = Address {
            id: 1,
            street: "De la Rotonda 2c al sur".to_string(),
            city: "Managua".to_string(),
            department: " ".to_string(),
            postal_code: String::new(),
            country: "Nicaragua".to_string(),
        };
        assert_eq!(
            address.summary(),
            "De la Rotonda 2c al sur, Managua, Nicaragua"
        );
    }
}

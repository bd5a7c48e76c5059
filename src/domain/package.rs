//! Packages as reported by the backend, plus the list filters applied to them.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::domain::types::{Dimension, NamePart, Weight};

/// Lifecycle state of a package.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PackageStatus {
    #[default]
    Processing,
    InTransit,
    Customs,
    OutForDelivery,
    Delivered,
    /// Value the backend sent that this client does not know about.
    Other(String),
}

impl PackageStatus {
    /// Statuses a courier or admin can pick from, in lifecycle order.
    pub const SELECTABLE: [PackageStatus; 5] = [
        PackageStatus::Processing,
        PackageStatus::InTransit,
        PackageStatus::Customs,
        PackageStatus::OutForDelivery,
        PackageStatus::Delivered,
    ];

    /// Parses Spanish labels and English slugs, ignoring case and accents on
    /// "tránsito".
    pub fn parse(value: &str) -> Self {
        let normalized = value.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "en procesamiento" | "processing" | "pending" | "pendiente" => Self::Processing,
            "en tránsito" | "en transito" | "in-transit" | "in transit" => Self::InTransit,
            "en aduana" | "customs" | "in-customs" => Self::Customs,
            "en camino a entrega" | "out-for-delivery" => Self::OutForDelivery,
            "entregado" | "delivered" => Self::Delivered,
            _ => Self::Other(value.trim().to_string()),
        }
    }

    /// Spanish label used by the backend and shown in the interface.
    pub fn label(&self) -> &str {
        match self {
            Self::Processing => "En procesamiento",
            Self::InTransit => "En tránsito",
            Self::Customs => "En aduana",
            Self::OutForDelivery => "En camino a entrega",
            Self::Delivered => "Entregado",
            Self::Other(value) => value,
        }
    }

    /// Stable slug used for CSS classes and filter values.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::InTransit => "in-transit",
            Self::Customs => "customs",
            Self::OutForDelivery => "out-for-delivery",
            Self::Delivered => "delivered",
            Self::Other(_) => "other",
        }
    }

    pub fn is_delivered(&self) -> bool {
        *self == Self::Delivered
    }
}

impl Serialize for PackageStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PackageStatus", 2)?;
        state.serialize_field("label", self.label())?;
        state.serialize_field("key", self.key())?;
        state.end()
    }
}

/// One step in the package history timeline.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct StatusEvent {
    pub status: String,
    pub location: String,
    pub date: String,
    pub time: String,
    pub completed: bool,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct Package {
    pub id: String,
    pub tracking_id: String,
    pub description: String,
    pub weight: String,
    pub origin: String,
    pub destination: String,
    pub sender: String,
    pub receiver: String,
    pub receiver_email: String,
    pub current_status: PackageStatus,
    pub estimated_delivery: String,
    pub created_at: String,
    /// Email of the courier the package is assigned to.
    pub assigned_to: Option<String>,
    pub assigned_to_name: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub history: Vec<StatusEvent>,
}

impl Package {
    /// City part of the destination, i.e. the text before the first comma.
    pub fn destination_city(&self) -> &str {
        self.destination
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
    }
}

/// Which fields a free-text search looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchScope {
    /// Customer history: tracking id or description.
    Customer,
    /// Staff lists: tracking id, receiver or destination.
    Staff,
}

/// Search and status filter over an already loaded package list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackageFilter {
    search: String,
    status: Option<PackageStatus>,
}

impl PackageFilter {
    /// Builds a filter from raw query values. A blank search matches every
    /// package; a blank or `all` status disables the status filter.
    pub fn new(search: Option<&str>, status: Option<&str>) -> Self {
        let search = search.unwrap_or_default().trim().to_lowercase();
        let status = status
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"))
            .map(PackageStatus::parse);
        Self { search, status }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn status(&self) -> Option<&PackageStatus> {
        self.status.as_ref()
    }

    pub fn matches(&self, package: &Package, scope: SearchScope) -> bool {
        self.matches_search(package, scope) && self.matches_status(package)
    }

    fn matches_search(&self, package: &Package, scope: SearchScope) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let contains = |field: &str| field.to_lowercase().contains(&self.search);
        match scope {
            SearchScope::Customer => {
                contains(&package.tracking_id) || contains(&package.description)
            }
            SearchScope::Staff => {
                contains(&package.tracking_id)
                    || contains(&package.receiver)
                    || contains(&package.destination)
            }
        }
    }

    fn matches_status(&self, package: &Package) -> bool {
        self.status
            .as_ref()
            .is_none_or(|status| *status == package.current_status)
    }

    /// Clones the packages this filter keeps.
    pub fn apply(&self, packages: &[Package], scope: SearchScope) -> Vec<Package> {
        packages
            .iter()
            .filter(|package| self.matches(package, scope))
            .cloned()
            .collect()
    }
}

/// Counters shown above package lists.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct PackageStats {
    pub total: usize,
    /// Everything not yet delivered.
    pub pending: usize,
    pub processing: usize,
    pub in_transit: usize,
    pub customs: usize,
    pub delivered: usize,
}

impl PackageStats {
    pub fn from_packages(packages: &[Package]) -> Self {
        let count = |status: PackageStatus| {
            packages
                .iter()
                .filter(|p| p.current_status == status)
                .count()
        };
        let delivered = count(PackageStatus::Delivered);
        Self {
            total: packages.len(),
            pending: packages.len() - delivered,
            processing: count(PackageStatus::Processing),
            in_transit: count(PackageStatus::InTransit),
            customs: count(PackageStatus::Customs),
            delivered,
        }
    }
}

/// Validated data for a new shipment.
#[derive(Clone, Debug, PartialEq)]
pub struct NewPackage {
    pub sender_first_name: NamePart,
    pub sender_second_name: Option<NamePart>,
    pub sender_first_last_name: NamePart,
    pub sender_second_last_name: Option<NamePart>,
    pub origin_address_id: i64,
    pub destination_address_id: i64,
    pub receiver_name: String,
    pub weight: Weight,
    pub length: Option<Dimension>,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub initial_status: PackageStatus,
}

/// Status change reported by a courier.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusUpdate {
    pub status: PackageStatus,
    pub location: String,
}

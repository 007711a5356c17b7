use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyTypeId(pub String);

/// Identifier wrapper for properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyId(pub String);

/// Identifier wrapper for homeowner records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HomeownerId(pub String);

/// Identifier wrapper for contracts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractId(pub String);

/// Catalog entry describing a class of unit (e.g. "Single Attached 80sqm").
/// Names are unique; the check happens ad hoc before insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyType {
    pub id: PropertyTypeId,
    pub name: String,
    pub description: String,
    pub base_price: u64,
}

/// Form payload for creating a catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPropertyType {
    pub name: String,
    pub description: String,
    pub base_price: u64,
}

/// Full-record edit for a catalog entry, as submitted by the edit modal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyTypeUpdate {
    pub name: String,
    pub description: String,
    pub base_price: u64,
}

/// Sales state of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    Available,
    Reserved,
    Sold,
    Leased,
}

impl PropertyStatus {
    pub const fn label(self) -> &'static str {
        match self {
            PropertyStatus::Available => "available",
            PropertyStatus::Reserved => "reserved",
            PropertyStatus::Sold => "sold",
            PropertyStatus::Leased => "leased",
        }
    }
}

/// A unit in the estate, addressed by phase/block/lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub code: String,
    pub name: String,
    pub property_type_id: PropertyTypeId,
    pub phase: String,
    pub block: String,
    pub lot: String,
    pub price: u64,
    pub status: PropertyStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProperty {
    pub code: String,
    pub name: String,
    pub property_type_id: PropertyTypeId,
    pub phase: String,
    pub block: String,
    pub lot: String,
    pub price: u64,
    #[serde(default = "default_property_status")]
    pub status: PropertyStatus,
}

fn default_property_status() -> PropertyStatus {
    PropertyStatus::Available
}

/// A homeowner on file. `property_id` stays empty until a contract exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Homeowner {
    pub id: HomeownerId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<PropertyId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_in_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHomeowner {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub property_id: Option<PropertyId>,
    #[serde(default)]
    pub move_in_date: Option<NaiveDate>,
}

/// Sale or lease agreement referenced by billing and complaint records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractKind {
    Sale,
    Lease,
}

impl ContractKind {
    pub const fn label(self) -> &'static str {
        match self {
            ContractKind::Sale => "sale",
            ContractKind::Lease => "lease",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: ContractId,
    pub homeowner_id: HomeownerId,
    pub property_id: PropertyId,
    pub kind: ContractKind,
    pub monthly_due: u64,
    pub start_date: NaiveDate,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContract {
    pub homeowner_id: HomeownerId,
    pub property_id: PropertyId,
    pub kind: ContractKind,
    pub monthly_due: u64,
    pub start_date: NaiveDate,
}

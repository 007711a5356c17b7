//! Directory of the estate: the property-type catalog, properties, homeowner
//! records, and the contracts tying homeowners to properties. Billing,
//! helpdesk, and tour records reference these by id; nothing here enforces
//! referential integrity beyond the ad-hoc checks the handlers make.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    Contract, ContractId, ContractKind, Homeowner, HomeownerId, NewContract, NewHomeowner,
    NewProperty, NewPropertyType, Property, PropertyId, PropertyStatus, PropertyType,
    PropertyTypeId, PropertyTypeUpdate,
};
pub use repository::{
    ContractRepository, HomeownerRepository, PropertyRepository, PropertyTypeRepository,
};
pub use router::directory_router;
pub use service::{DirectoryError, DirectoryService};

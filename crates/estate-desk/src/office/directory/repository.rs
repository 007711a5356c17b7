use crate::office::store::StoreError;

use super::domain::{
    Contract, ContractId, Homeowner, HomeownerId, Property, PropertyId, PropertyType,
    PropertyTypeId,
};

/// Storage abstraction for the property-type catalog.
pub trait PropertyTypeRepository: Send + Sync {
    fn insert(&self, record: PropertyType) -> Result<PropertyType, StoreError>;
    fn update(&self, record: PropertyType) -> Result<(), StoreError>;
    fn delete(&self, id: &PropertyTypeId) -> Result<(), StoreError>;
    fn fetch(&self, id: &PropertyTypeId) -> Result<Option<PropertyType>, StoreError>;
    fn list(&self) -> Result<Vec<PropertyType>, StoreError>;
}

/// Storage abstraction for properties.
pub trait PropertyRepository: Send + Sync {
    fn insert(&self, record: Property) -> Result<Property, StoreError>;
    fn update(&self, record: Property) -> Result<(), StoreError>;
    fn delete(&self, id: &PropertyId) -> Result<(), StoreError>;
    fn fetch(&self, id: &PropertyId) -> Result<Option<Property>, StoreError>;
    fn list(&self) -> Result<Vec<Property>, StoreError>;
}

/// Storage abstraction for homeowner records.
pub trait HomeownerRepository: Send + Sync {
    fn insert(&self, record: Homeowner) -> Result<Homeowner, StoreError>;
    fn update(&self, record: Homeowner) -> Result<(), StoreError>;
    fn delete(&self, id: &HomeownerId) -> Result<(), StoreError>;
    fn fetch(&self, id: &HomeownerId) -> Result<Option<Homeowner>, StoreError>;
    fn list(&self) -> Result<Vec<Homeowner>, StoreError>;
}

/// Storage abstraction for contracts. Contracts are never hard-deleted by
/// the UI, so the trait stays read-and-append.
pub trait ContractRepository: Send + Sync {
    fn insert(&self, record: Contract) -> Result<Contract, StoreError>;
    fn fetch(&self, id: &ContractId) -> Result<Option<Contract>, StoreError>;
    fn list(&self) -> Result<Vec<Contract>, StoreError>;
}

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::office::store::StoreError;

use super::domain::{
    Contract, ContractId, Homeowner, HomeownerId, NewContract, NewHomeowner, NewProperty,
    NewPropertyType, Property, PropertyId, PropertyType, PropertyTypeId, PropertyTypeUpdate,
};
use super::repository::{
    ContractRepository, HomeownerRepository, PropertyRepository, PropertyTypeRepository,
};

/// Error raised by directory operations.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("property type name '{0}' already exists")]
    DuplicateTypeName(String),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
}

static PROPERTY_TYPE_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static PROPERTY_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static HOMEOWNER_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static CONTRACT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_property_type_id() -> PropertyTypeId {
    let id = PROPERTY_TYPE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    PropertyTypeId(format!("pt-{id:06}"))
}

fn next_property_id() -> PropertyId {
    let id = PROPERTY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    PropertyId(format!("prop-{id:06}"))
}

fn next_homeowner_id() -> HomeownerId {
    let id = HOMEOWNER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    HomeownerId(format!("ho-{id:06}"))
}

fn next_contract_id() -> ContractId {
    let id = CONTRACT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ContractId(format!("ct-{id:06}"))
}

/// Service composing the four directory repositories. Uniqueness of catalog
/// names is the only cross-record invariant; everything else is plain CRUD.
pub struct DirectoryService<PT, P, H, C> {
    property_types: Arc<PT>,
    properties: Arc<P>,
    homeowners: Arc<H>,
    contracts: Arc<C>,
}

impl<PT, P, H, C> DirectoryService<PT, P, H, C>
where
    PT: PropertyTypeRepository + 'static,
    P: PropertyRepository + 'static,
    H: HomeownerRepository + 'static,
    C: ContractRepository + 'static,
{
    pub fn new(
        property_types: Arc<PT>,
        properties: Arc<P>,
        homeowners: Arc<H>,
        contracts: Arc<C>,
    ) -> Self {
        Self {
            property_types,
            properties,
            homeowners,
            contracts,
        }
    }

    // -- property-type catalog -------------------------------------------

    pub fn create_property_type(
        &self,
        form: NewPropertyType,
    ) -> Result<PropertyType, DirectoryError> {
        let name = form.name.trim().to_string();
        if name.is_empty() {
            return Err(DirectoryError::MissingField("name"));
        }
        self.ensure_unique_type_name(&name, None)?;

        let record = PropertyType {
            id: next_property_type_id(),
            name,
            description: form.description,
            base_price: form.base_price,
        };
        Ok(self.property_types.insert(record)?)
    }

    pub fn update_property_type(
        &self,
        id: &PropertyTypeId,
        update: PropertyTypeUpdate,
    ) -> Result<PropertyType, DirectoryError> {
        let name = update.name.trim().to_string();
        if name.is_empty() {
            return Err(DirectoryError::MissingField("name"));
        }

        let existing = self
            .property_types
            .fetch(id)?
            .ok_or(StoreError::NotFound)?;
        self.ensure_unique_type_name(&name, Some(&existing.id))?;

        let record = PropertyType {
            id: existing.id,
            name,
            description: update.description,
            base_price: update.base_price,
        };
        self.property_types.update(record.clone())?;
        Ok(record)
    }

    pub fn delete_property_type(&self, id: &PropertyTypeId) -> Result<(), DirectoryError> {
        Ok(self.property_types.delete(id)?)
    }

    pub fn list_property_types(&self) -> Result<Vec<PropertyType>, DirectoryError> {
        Ok(self.property_types.list()?)
    }

    /// Case-insensitive duplicate-name scan over the full catalog.
    fn ensure_unique_type_name(
        &self,
        name: &str,
        excluding: Option<&PropertyTypeId>,
    ) -> Result<(), DirectoryError> {
        let taken = self.property_types.list()?.into_iter().any(|record| {
            record.name.trim().eq_ignore_ascii_case(name) && Some(&record.id) != excluding
        });
        if taken {
            return Err(DirectoryError::DuplicateTypeName(name.to_string()));
        }
        Ok(())
    }

    // -- properties -------------------------------------------------------

    pub fn create_property(&self, form: NewProperty) -> Result<Property, DirectoryError> {
        if form.code.trim().is_empty() {
            return Err(DirectoryError::MissingField("code"));
        }

        let record = Property {
            id: next_property_id(),
            code: form.code,
            name: form.name,
            property_type_id: form.property_type_id,
            phase: form.phase,
            block: form.block,
            lot: form.lot,
            price: form.price,
            status: form.status,
        };
        Ok(self.properties.insert(record)?)
    }

    pub fn update_property(
        &self,
        id: &PropertyId,
        mut record: Property,
    ) -> Result<Property, DirectoryError> {
        self.properties.fetch(id)?.ok_or(StoreError::NotFound)?;
        record.id = id.clone();
        self.properties.update(record.clone())?;
        Ok(record)
    }

    pub fn delete_property(&self, id: &PropertyId) -> Result<(), DirectoryError> {
        Ok(self.properties.delete(id)?)
    }

    pub fn list_properties(&self) -> Result<Vec<Property>, DirectoryError> {
        Ok(self.properties.list()?)
    }

    // -- homeowners -------------------------------------------------------

    pub fn create_homeowner(&self, form: NewHomeowner) -> Result<Homeowner, DirectoryError> {
        if form.full_name.trim().is_empty() {
            return Err(DirectoryError::MissingField("full_name"));
        }

        let record = Homeowner {
            id: next_homeowner_id(),
            full_name: form.full_name,
            email: form.email,
            phone: form.phone,
            property_id: form.property_id,
            move_in_date: form.move_in_date,
        };
        Ok(self.homeowners.insert(record)?)
    }

    pub fn update_homeowner(
        &self,
        id: &HomeownerId,
        mut record: Homeowner,
    ) -> Result<Homeowner, DirectoryError> {
        self.homeowners.fetch(id)?.ok_or(StoreError::NotFound)?;
        record.id = id.clone();
        self.homeowners.update(record.clone())?;
        Ok(record)
    }

    pub fn delete_homeowner(&self, id: &HomeownerId) -> Result<(), DirectoryError> {
        Ok(self.homeowners.delete(id)?)
    }

    /// Full snapshot, optionally narrowed by a case-insensitive name/email
    /// search. The store is fetched whole and filtered in memory.
    pub fn list_homeowners(&self, search: Option<&str>) -> Result<Vec<Homeowner>, DirectoryError> {
        let mut records = self.homeowners.list()?;
        if let Some(query) = search.map(str::trim).filter(|q| !q.is_empty()) {
            let needle = query.to_lowercase();
            records.retain(|record| {
                record.full_name.to_lowercase().contains(&needle)
                    || record.email.to_lowercase().contains(&needle)
            });
        }
        Ok(records)
    }

    // -- contracts --------------------------------------------------------

    pub fn create_contract(&self, form: NewContract) -> Result<Contract, DirectoryError> {
        let record = Contract {
            id: next_contract_id(),
            homeowner_id: form.homeowner_id,
            property_id: form.property_id,
            kind: form.kind,
            monthly_due: form.monthly_due,
            start_date: form.start_date,
            active: true,
        };
        Ok(self.contracts.insert(record)?)
    }

    pub fn get_contract(&self, id: &ContractId) -> Result<Contract, DirectoryError> {
        let record = self.contracts.fetch(id)?.ok_or(StoreError::NotFound)?;
        Ok(record)
    }

    pub fn list_contracts(
        &self,
        homeowner_id: Option<&HomeownerId>,
    ) -> Result<Vec<Contract>, DirectoryError> {
        let mut records = self.contracts.list()?;
        if let Some(owner) = homeowner_id {
            records.retain(|record| &record.homeowner_id == owner);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::office::directory::domain::{ContractKind, PropertyStatus};
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryCatalog {
        records: Mutex<HashMap<PropertyTypeId, PropertyType>>,
    }

    impl PropertyTypeRepository for MemoryCatalog {
        fn insert(&self, record: PropertyType) -> Result<PropertyType, StoreError> {
            let mut guard = self.records.lock().expect("catalog mutex poisoned");
            if guard.contains_key(&record.id) {
                return Err(StoreError::Conflict);
            }
            guard.insert(record.id.clone(), record.clone());
            Ok(record)
        }

        fn update(&self, record: PropertyType) -> Result<(), StoreError> {
            let mut guard = self.records.lock().expect("catalog mutex poisoned");
            guard.insert(record.id.clone(), record);
            Ok(())
        }

        fn delete(&self, id: &PropertyTypeId) -> Result<(), StoreError> {
            let mut guard = self.records.lock().expect("catalog mutex poisoned");
            guard.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
        }

        fn fetch(&self, id: &PropertyTypeId) -> Result<Option<PropertyType>, StoreError> {
            let guard = self.records.lock().expect("catalog mutex poisoned");
            Ok(guard.get(id).cloned())
        }

        fn list(&self) -> Result<Vec<PropertyType>, StoreError> {
            let guard = self.records.lock().expect("catalog mutex poisoned");
            Ok(guard.values().cloned().collect())
        }
    }

    #[derive(Default)]
    struct MemoryProperties {
        records: Mutex<HashMap<PropertyId, Property>>,
    }

    impl PropertyRepository for MemoryProperties {
        fn insert(&self, record: Property) -> Result<Property, StoreError> {
            let mut guard = self.records.lock().expect("property mutex poisoned");
            guard.insert(record.id.clone(), record.clone());
            Ok(record)
        }

        fn update(&self, record: Property) -> Result<(), StoreError> {
            let mut guard = self.records.lock().expect("property mutex poisoned");
            guard.insert(record.id.clone(), record);
            Ok(())
        }

        fn delete(&self, id: &PropertyId) -> Result<(), StoreError> {
            let mut guard = self.records.lock().expect("property mutex poisoned");
            guard.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
        }

        fn fetch(&self, id: &PropertyId) -> Result<Option<Property>, StoreError> {
            let guard = self.records.lock().expect("property mutex poisoned");
            Ok(guard.get(id).cloned())
        }

        fn list(&self) -> Result<Vec<Property>, StoreError> {
            let guard = self.records.lock().expect("property mutex poisoned");
            Ok(guard.values().cloned().collect())
        }
    }

    #[derive(Default)]
    struct MemoryHomeowners {
        records: Mutex<HashMap<HomeownerId, Homeowner>>,
    }

    impl HomeownerRepository for MemoryHomeowners {
        fn insert(&self, record: Homeowner) -> Result<Homeowner, StoreError> {
            let mut guard = self.records.lock().expect("homeowner mutex poisoned");
            guard.insert(record.id.clone(), record.clone());
            Ok(record)
        }

        fn update(&self, record: Homeowner) -> Result<(), StoreError> {
            let mut guard = self.records.lock().expect("homeowner mutex poisoned");
            guard.insert(record.id.clone(), record);
            Ok(())
        }

        fn delete(&self, id: &HomeownerId) -> Result<(), StoreError> {
            let mut guard = self.records.lock().expect("homeowner mutex poisoned");
            guard.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
        }

        fn fetch(&self, id: &HomeownerId) -> Result<Option<Homeowner>, StoreError> {
            let guard = self.records.lock().expect("homeowner mutex poisoned");
            Ok(guard.get(id).cloned())
        }

        fn list(&self) -> Result<Vec<Homeowner>, StoreError> {
            let guard = self.records.lock().expect("homeowner mutex poisoned");
            Ok(guard.values().cloned().collect())
        }
    }

    #[derive(Default)]
    struct MemoryContracts {
        records: Mutex<HashMap<ContractId, Contract>>,
    }

    impl ContractRepository for MemoryContracts {
        fn insert(&self, record: Contract) -> Result<Contract, StoreError> {
            let mut guard = self.records.lock().expect("contract mutex poisoned");
            guard.insert(record.id.clone(), record.clone());
            Ok(record)
        }

        fn fetch(&self, id: &ContractId) -> Result<Option<Contract>, StoreError> {
            let guard = self.records.lock().expect("contract mutex poisoned");
            Ok(guard.get(id).cloned())
        }

        fn list(&self) -> Result<Vec<Contract>, StoreError> {
            let guard = self.records.lock().expect("contract mutex poisoned");
            Ok(guard.values().cloned().collect())
        }
    }

    type MemoryDirectory =
        DirectoryService<MemoryCatalog, MemoryProperties, MemoryHomeowners, MemoryContracts>;

    fn service() -> MemoryDirectory {
        DirectoryService::new(
            Arc::new(MemoryCatalog::default()),
            Arc::new(MemoryProperties::default()),
            Arc::new(MemoryHomeowners::default()),
            Arc::new(MemoryContracts::default()),
        )
    }

    fn bungalow() -> NewPropertyType {
        NewPropertyType {
            name: "Bungalow 120".to_string(),
            description: "Single storey, 120 sqm lot".to_string(),
            base_price: 2_450_000,
        }
    }

    #[test]
    fn duplicate_catalog_names_are_refused() {
        let service = service();
        service.create_property_type(bungalow()).expect("first insert");

        let mut dup = bungalow();
        dup.name = "  bungalow 120 ".to_string();
        match service.create_property_type(dup) {
            Err(DirectoryError::DuplicateTypeName(name)) => {
                assert_eq!(name, "bungalow 120");
            }
            other => panic!("expected duplicate-name error, got {other:?}"),
        }
    }

    #[test]
    fn rename_to_own_name_is_allowed() {
        let service = service();
        let created = service.create_property_type(bungalow()).expect("insert");

        let updated = service
            .update_property_type(
                &created.id,
                PropertyTypeUpdate {
                    name: created.name.clone(),
                    description: "updated copy".to_string(),
                    base_price: 2_500_000,
                },
            )
            .expect("rename to own name succeeds");
        assert_eq!(updated.description, "updated copy");
    }

    #[test]
    fn blank_catalog_name_is_refused() {
        let service = service();
        let mut form = bungalow();
        form.name = "   ".to_string();
        assert!(matches!(
            service.create_property_type(form),
            Err(DirectoryError::MissingField("name"))
        ));
    }

    #[test]
    fn homeowner_search_matches_name_and_email() {
        let service = service();
        service
            .create_homeowner(NewHomeowner {
                full_name: "Alma Reyes".to_string(),
                email: "alma@example.com".to_string(),
                phone: "0917-000-1111".to_string(),
                property_id: None,
                move_in_date: None,
            })
            .expect("insert alma");
        service
            .create_homeowner(NewHomeowner {
                full_name: "Benjie Cruz".to_string(),
                email: "bcruz@example.com".to_string(),
                phone: "0917-000-2222".to_string(),
                property_id: None,
                move_in_date: None,
            })
            .expect("insert benjie");

        let hits = service.list_homeowners(Some("alma")).expect("search runs");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].full_name, "Alma Reyes");

        let by_email = service.list_homeowners(Some("BCRUZ")).expect("search runs");
        assert_eq!(by_email.len(), 1);

        let all = service.list_homeowners(Some("  ")).expect("blank query");
        assert_eq!(all.len(), 2, "blank search returns the full snapshot");
    }

    #[test]
    fn contract_listing_filters_by_homeowner() {
        let service = service();
        let alma = service
            .create_homeowner(NewHomeowner {
                full_name: "Alma Reyes".to_string(),
                email: "alma@example.com".to_string(),
                phone: "0917-000-1111".to_string(),
                property_id: None,
                move_in_date: None,
            })
            .expect("insert homeowner");

        let start = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
        service
            .create_contract(NewContract {
                homeowner_id: alma.id.clone(),
                property_id: PropertyId("prop-900001".to_string()),
                kind: ContractKind::Sale,
                monthly_due: 18_500,
                start_date: start,
            })
            .expect("insert contract");
        service
            .create_contract(NewContract {
                homeowner_id: HomeownerId("ho-999999".to_string()),
                property_id: PropertyId("prop-900002".to_string()),
                kind: ContractKind::Lease,
                monthly_due: 12_000,
                start_date: start,
            })
            .expect("insert other contract");

        let mine = service
            .list_contracts(Some(&alma.id))
            .expect("filtered list");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].kind, ContractKind::Sale);
    }

    #[test]
    fn property_update_requires_existing_record() {
        let service = service();
        let ghost = Property {
            id: PropertyId("prop-404404".to_string()),
            code: "PH1-B2-L3".to_string(),
            name: "Phase 1 Block 2 Lot 3".to_string(),
            property_type_id: PropertyTypeId("pt-000001".to_string()),
            phase: "1".to_string(),
            block: "2".to_string(),
            lot: "3".to_string(),
            price: 2_450_000,
            status: PropertyStatus::Available,
        };

        match service.update_property(&ghost.id.clone(), ghost) {
            Err(DirectoryError::Store(StoreError::NotFound)) => {}
            other => panic!("expected not-found, got {other:?}"),
        }
    }
}

use chrono::NaiveDate;
use estate_desk::office::announcements::{Announcement, AnnouncementId, AnnouncementRepository};
use estate_desk::office::billing::{
    BillingId, BillingRecord, BillingRepository, PaymentTransaction, TransactionId,
    TransactionRepository,
};
use estate_desk::office::broadcast::{BroadcastError, BroadcastEvent, BroadcastPublisher};
use estate_desk::office::directory::{
    Contract, ContractId, ContractRepository, Homeowner, HomeownerId, HomeownerRepository,
    Property, PropertyId, PropertyRepository, PropertyType, PropertyTypeId, PropertyTypeRepository,
};
use estate_desk::office::helpdesk::{
    ClientInquiry, Complaint, ComplaintId, ComplaintRepository, InquiryId, InquiryRepository,
    ServiceRequest, ServiceRequestId, ServiceRequestRepository,
};
use estate_desk::office::store::StoreError;
use estate_desk::office::tours::{TourAppointment, TourId, TourRepository};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Store handles the reporting endpoints read from directly, bypassing the
/// per-domain services. The report is a pure computation over whatever the
/// stores hold when the request lands.
#[derive(Clone)]
pub(crate) struct ReportSources {
    pub(crate) billing: Arc<InMemoryBillingRepository>,
    pub(crate) transactions: Arc<InMemoryTransactionRepository>,
    pub(crate) complaints: Arc<InMemoryComplaintRepository>,
    pub(crate) service_requests: Arc<InMemoryServiceRequestRepository>,
    pub(crate) inquiries: Arc<InMemoryInquiryRepository>,
    pub(crate) tours: Arc<InMemoryTourRepository>,
    pub(crate) properties: Arc<InMemoryPropertyRepository>,
    pub(crate) contracts: Arc<InMemoryContractRepository>,
    pub(crate) homeowners: Arc<InMemoryHomeownerRepository>,
}

/// Keyed table behind every in-memory repository. Insert refuses duplicate
/// ids and update refuses missing ones, matching the managed store the
/// deployment swaps in.
struct MemoryTable<K, V> {
    records: Arc<Mutex<HashMap<K, V>>>,
}

impl<K, V> Default for MemoryTable<K, V> {
    fn default() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<K, V> Clone for MemoryTable<K, V> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
        }
    }
}

impl<K, V> MemoryTable<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn insert(&self, key: K, record: V) -> Result<V, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&key) {
            return Err(StoreError::Conflict);
        }
        guard.insert(key, record.clone());
        Ok(record)
    }

    fn update(&self, key: K, record: V) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&key) {
            guard.insert(key, record);
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }

    fn remove(&self, key: &K) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.remove(key).map(|_| ()).ok_or(StoreError::NotFound)
    }

    fn fetch(&self, key: &K) -> Result<Option<V>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(key).cloned())
    }

    fn list(&self) -> Result<Vec<V>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPropertyTypeRepository {
    records: MemoryTable<PropertyTypeId, PropertyType>,
}

impl PropertyTypeRepository for InMemoryPropertyTypeRepository {
    fn insert(&self, record: PropertyType) -> Result<PropertyType, StoreError> {
        self.records.insert(record.id.clone(), record)
    }

    fn update(&self, record: PropertyType) -> Result<(), StoreError> {
        self.records.update(record.id.clone(), record)
    }

    fn delete(&self, id: &PropertyTypeId) -> Result<(), StoreError> {
        self.records.remove(id)
    }

    fn fetch(&self, id: &PropertyTypeId) -> Result<Option<PropertyType>, StoreError> {
        self.records.fetch(id)
    }

    fn list(&self) -> Result<Vec<PropertyType>, StoreError> {
        self.records.list()
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPropertyRepository {
    records: MemoryTable<PropertyId, Property>,
}

impl PropertyRepository for InMemoryPropertyRepository {
    fn insert(&self, record: Property) -> Result<Property, StoreError> {
        self.records.insert(record.id.clone(), record)
    }

    fn update(&self, record: Property) -> Result<(), StoreError> {
        self.records.update(record.id.clone(), record)
    }

    fn delete(&self, id: &PropertyId) -> Result<(), StoreError> {
        self.records.remove(id)
    }

    fn fetch(&self, id: &PropertyId) -> Result<Option<Property>, StoreError> {
        self.records.fetch(id)
    }

    fn list(&self) -> Result<Vec<Property>, StoreError> {
        self.records.list()
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryHomeownerRepository {
    records: MemoryTable<HomeownerId, Homeowner>,
}

impl HomeownerRepository for InMemoryHomeownerRepository {
    fn insert(&self, record: Homeowner) -> Result<Homeowner, StoreError> {
        self.records.insert(record.id.clone(), record)
    }

    fn update(&self, record: Homeowner) -> Result<(), StoreError> {
        self.records.update(record.id.clone(), record)
    }

    fn delete(&self, id: &HomeownerId) -> Result<(), StoreError> {
        self.records.remove(id)
    }

    fn fetch(&self, id: &HomeownerId) -> Result<Option<Homeowner>, StoreError> {
        self.records.fetch(id)
    }

    fn list(&self) -> Result<Vec<Homeowner>, StoreError> {
        self.records.list()
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryContractRepository {
    records: MemoryTable<ContractId, Contract>,
}

impl ContractRepository for InMemoryContractRepository {
    fn insert(&self, record: Contract) -> Result<Contract, StoreError> {
        self.records.insert(record.id.clone(), record)
    }

    fn fetch(&self, id: &ContractId) -> Result<Option<Contract>, StoreError> {
        self.records.fetch(id)
    }

    fn list(&self) -> Result<Vec<Contract>, StoreError> {
        self.records.list()
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryBillingRepository {
    records: MemoryTable<BillingId, BillingRecord>,
}

impl BillingRepository for InMemoryBillingRepository {
    fn insert(&self, record: BillingRecord) -> Result<BillingRecord, StoreError> {
        self.records.insert(record.id.clone(), record)
    }

    fn update(&self, record: BillingRecord) -> Result<(), StoreError> {
        self.records.update(record.id.clone(), record)
    }

    fn delete(&self, id: &BillingId) -> Result<(), StoreError> {
        self.records.remove(id)
    }

    fn fetch(&self, id: &BillingId) -> Result<Option<BillingRecord>, StoreError> {
        self.records.fetch(id)
    }

    fn list(&self) -> Result<Vec<BillingRecord>, StoreError> {
        self.records.list()
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryTransactionRepository {
    records: MemoryTable<TransactionId, PaymentTransaction>,
}

impl TransactionRepository for InMemoryTransactionRepository {
    fn insert(&self, record: PaymentTransaction) -> Result<PaymentTransaction, StoreError> {
        self.records.insert(record.id.clone(), record)
    }

    fn fetch(&self, id: &TransactionId) -> Result<Option<PaymentTransaction>, StoreError> {
        self.records.fetch(id)
    }

    fn list(&self) -> Result<Vec<PaymentTransaction>, StoreError> {
        self.records.list()
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryComplaintRepository {
    records: MemoryTable<ComplaintId, Complaint>,
}

impl ComplaintRepository for InMemoryComplaintRepository {
    fn insert(&self, record: Complaint) -> Result<Complaint, StoreError> {
        self.records.insert(record.id.clone(), record)
    }

    fn update(&self, record: Complaint) -> Result<(), StoreError> {
        self.records.update(record.id.clone(), record)
    }

    fn delete(&self, id: &ComplaintId) -> Result<(), StoreError> {
        self.records.remove(id)
    }

    fn fetch(&self, id: &ComplaintId) -> Result<Option<Complaint>, StoreError> {
        self.records.fetch(id)
    }

    fn list(&self) -> Result<Vec<Complaint>, StoreError> {
        self.records.list()
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryServiceRequestRepository {
    records: MemoryTable<ServiceRequestId, ServiceRequest>,
}

impl ServiceRequestRepository for InMemoryServiceRequestRepository {
    fn insert(&self, record: ServiceRequest) -> Result<ServiceRequest, StoreError> {
        self.records.insert(record.id.clone(), record)
    }

    fn update(&self, record: ServiceRequest) -> Result<(), StoreError> {
        self.records.update(record.id.clone(), record)
    }

    fn delete(&self, id: &ServiceRequestId) -> Result<(), StoreError> {
        self.records.remove(id)
    }

    fn fetch(&self, id: &ServiceRequestId) -> Result<Option<ServiceRequest>, StoreError> {
        self.records.fetch(id)
    }

    fn list(&self) -> Result<Vec<ServiceRequest>, StoreError> {
        self.records.list()
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryInquiryRepository {
    records: MemoryTable<InquiryId, ClientInquiry>,
}

impl InquiryRepository for InMemoryInquiryRepository {
    fn insert(&self, record: ClientInquiry) -> Result<ClientInquiry, StoreError> {
        self.records.insert(record.id.clone(), record)
    }

    fn update(&self, record: ClientInquiry) -> Result<(), StoreError> {
        self.records.update(record.id.clone(), record)
    }

    fn fetch(&self, id: &InquiryId) -> Result<Option<ClientInquiry>, StoreError> {
        self.records.fetch(id)
    }

    fn list(&self) -> Result<Vec<ClientInquiry>, StoreError> {
        self.records.list()
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryTourRepository {
    records: MemoryTable<TourId, TourAppointment>,
}

impl TourRepository for InMemoryTourRepository {
    fn insert(&self, record: TourAppointment) -> Result<TourAppointment, StoreError> {
        self.records.insert(record.id.clone(), record)
    }

    fn update(&self, record: TourAppointment) -> Result<(), StoreError> {
        self.records.update(record.id.clone(), record)
    }

    fn fetch(&self, id: &TourId) -> Result<Option<TourAppointment>, StoreError> {
        self.records.fetch(id)
    }

    fn list(&self) -> Result<Vec<TourAppointment>, StoreError> {
        self.records.list()
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAnnouncementRepository {
    records: MemoryTable<AnnouncementId, Announcement>,
}

impl AnnouncementRepository for InMemoryAnnouncementRepository {
    fn insert(&self, record: Announcement) -> Result<Announcement, StoreError> {
        self.records.insert(record.id.clone(), record)
    }

    fn update(&self, record: Announcement) -> Result<(), StoreError> {
        self.records.update(record.id.clone(), record)
    }

    fn delete(&self, id: &AnnouncementId) -> Result<(), StoreError> {
        self.records.remove(id)
    }

    fn fetch(&self, id: &AnnouncementId) -> Result<Option<Announcement>, StoreError> {
        self.records.fetch(id)
    }

    fn list(&self) -> Result<Vec<Announcement>, StoreError> {
        self.records.list()
    }
}

/// Collects relayed events instead of pushing them to a realtime endpoint.
/// The demo prints what was captured after the walkthrough.
#[derive(Default, Clone)]
pub(crate) struct InMemoryBroadcastPublisher {
    events: Arc<Mutex<Vec<BroadcastEvent>>>,
}

impl BroadcastPublisher for InMemoryBroadcastPublisher {
    fn publish(&self, event: BroadcastEvent) -> Result<(), BroadcastError> {
        let mut guard = self.events.lock().expect("broadcast mutex poisoned");
        guard.push(event);
        Ok(())
    }
}

impl InMemoryBroadcastPublisher {
    pub(crate) fn events(&self) -> Vec<BroadcastEvent> {
        self.events.lock().expect("broadcast mutex poisoned").clone()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD, got '{raw}' ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

use folio_core_contact_impl::ContactFeatureServiceImpl;
use folio_extern_impl::delivery::SimulatedDeliveryServiceImpl;
use folio_persistence_local::LocalArchiveRepository;
use folio_shared_impl::time::TimeServiceImpl;

// Persistence
pub type ArchiveRepo = LocalArchiveRepository;

// Extern
pub type Delivery = SimulatedDeliveryServiceImpl;

// Shared
pub type Time = TimeServiceImpl;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<Time, Delivery, ArchiveRepo>;
pub type ContactForm = folio_core_contact_impl::form::ContactForm<ContactFeature, Time>;

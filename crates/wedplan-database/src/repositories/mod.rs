//! Repository implementations for Wedplan entities.

pub mod audit;
pub mod guest;
pub mod table;

pub use audit::AuditLogRepository;
pub use guest::GuestRepository;
pub use table::TableRepository;

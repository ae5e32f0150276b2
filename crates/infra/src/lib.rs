//! `stocktrack-infra`: in-memory storage behind the inventory service.
//!
//! Nothing here outlives the process: records live in maps guarded by
//! `RwLock`s and are gone on restart.

pub mod inventory_store;
pub mod repository;

pub use inventory_store::InventoryStore;
pub use repository::InMemoryRepository;

//! Ship records, their identifiers, and the stores that resolve them.

mod imo;
mod lookup_result;
mod record;
mod store;

pub use imo::ImoNumber;
pub use lookup_result::LookupResult;
pub use record::{RegistryRecord, ShipRecord, VoyageRecord};
pub use store::{FleetStore, JsonStore, MemoryStore, resolve};

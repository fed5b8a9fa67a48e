//! Repository implementations for the mirrored country collection.

pub mod memory;
pub mod mysql;

pub use memory::InMemoryCountryRepository;
pub use mysql::MySqlCountryRepository;

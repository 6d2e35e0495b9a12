//! SQLite storage for relocation scenarios.
//!
//! Each scenario is one row in the `scenario` table; its inputs are kept as
//! a JSON document so the schema does not track the input model.

pub mod factory;
pub mod repository;

pub use factory::SqliteRepositoryFactory;
pub use repository::SqliteScenarioRepository;

pub mod calculations;
pub mod db;
pub mod models;

pub use db::repository::{RepositoryError, ScenarioRepository};
pub use models::*;

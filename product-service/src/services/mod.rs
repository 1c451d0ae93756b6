pub mod database;
pub mod error;
pub mod memory;
pub mod store;

pub use database::ProductDb;
pub use error::ProductError;
pub use memory::InMemoryProductStore;
pub use store::{MongoProductStore, ProductStore};

pub mod file_store;
pub mod memory_store;
pub mod store;

pub use file_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use store::{load_record, save_record, KeyValueStore, TRIPS_KEY, USER_KEY};

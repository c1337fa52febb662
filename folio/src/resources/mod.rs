pub mod counter_store;
pub mod read_cache;
pub mod resource;

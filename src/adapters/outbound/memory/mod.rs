mod release_store;

pub use release_store::InMemoryReleaseStore;

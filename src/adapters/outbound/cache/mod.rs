/// Cache adapters
mod parsing_result_cache;

pub use parsing_result_cache::{
    InMemoryParsingResultCache, DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_TTL,
};

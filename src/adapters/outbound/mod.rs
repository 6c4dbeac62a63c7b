/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod cache;
pub mod filesystem;
pub mod generators;
pub mod memory;
pub mod network;
pub mod parsers;

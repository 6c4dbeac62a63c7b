/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the outbound ports:
/// attachment parsers, output generators, stores and the result cache.
pub mod outbound;

mod generator_factory;
mod parser_factory;

pub use generator_factory::GeneratorRegistry;
pub use parser_factory::ParserFactory;

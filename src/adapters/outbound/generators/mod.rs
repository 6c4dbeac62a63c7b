/// Output generators rendering the license report read model
mod docx_body;
mod docx_generator;
mod template_support;
mod text_generator;
mod xhtml_generator;

pub use docx_generator::DocxGenerator;
pub use text_generator::TextGenerator;
pub use xhtml_generator::XhtmlGenerator;

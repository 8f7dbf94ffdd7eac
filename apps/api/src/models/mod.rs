pub mod document;
pub mod generation;
pub mod rendered;

pub use document::{DocumentFormat, ExtractedText, SourceDocument};
pub use generation::{GeneratedText, GenerationRequest, Language, TemplateKey};
pub use rendered::{OutputFormat, RenderedDocument};

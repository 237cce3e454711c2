pub mod content_classifier;
pub mod identifier_extractor;
pub mod page_scanner;
pub mod query_param;

pub use content_classifier::ContentClassifier;
pub use identifier_extractor::IdentifierExtractor;
pub use page_scanner::PageScanner;

pub mod config;
pub mod models;
pub mod processing;
pub mod validation;
pub mod utils;
pub mod id_card_scanner;

pub use config::ScannerConfig;
pub use id_card_scanner::IdCardScanner;
pub use models::{FieldRecord, MergedRecord, ScanResponse};
pub use processing::FieldExtractor;

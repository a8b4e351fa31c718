//! Infrastructure layer: asset loading and output document I/O.

pub mod assets;
pub mod document;
pub mod error;

pub use assets::{load_assets, Assets, CODES_FILE, CRITERIA_FILE, FEATURES_FILE};
pub use document::{depth_labels, KeysDocument, Metadata, Navigation, SCHEMA_VERSION, SOURCE};
pub use error::{InfraError, InfraResult};

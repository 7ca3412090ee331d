pub mod bundled;
pub mod directory;
pub mod record;

pub use directory::{CountryDirectory, DataSource};
pub use record::{CountryRecord, FieldKind};

pub mod countries;
pub mod error;
pub mod restcountries;
pub mod settings;
pub mod telemetry;

pub use countries::{CountryDirectory, CountryRecord, DataSource, FieldKind};
pub use error::{Error, Result};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{Error, Result};

/// One row of the country table.
///
/// `un_code` is the zero-padded UN M49 code and is empty for entities
/// without one (Kosovo in the bundled table).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountryRecord {
    pub name: String,
    pub native_name: String,
    pub alpha2: String,
    pub alpha3: String,
    pub un_code: String,
}

impl CountryRecord {
    pub fn field(&self, kind: FieldKind) -> &str {
        match kind {
            FieldKind::CountryName => &self.name,
            FieldKind::NativeName => &self.native_name,
            FieldKind::Alpha2 => &self.alpha2,
            FieldKind::Alpha3 => &self.alpha3,
            FieldKind::UnCode => &self.un_code,
        }
    }
}

/// Selects which attribute of a [`CountryRecord`] a lookup matches against.
///
/// Parses from the legacy selector strings (`name`, `nativeName`, `2letter`,
/// `3letter`, `un`) as well as a few snake_case aliases, ignoring ASCII case.
#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, PartialEq, Eq, Hash)]
#[strum(ascii_case_insensitive)]
pub enum FieldKind {
    #[strum(to_string = "name", serialize = "country_name")]
    CountryName,
    #[strum(to_string = "nativeName", serialize = "native_name")]
    NativeName,
    #[strum(to_string = "2letter", serialize = "alpha2")]
    Alpha2,
    #[strum(to_string = "3letter", serialize = "alpha3")]
    Alpha3,
    #[strum(to_string = "un", serialize = "un_code", serialize = "numeric")]
    UnCode,
}

impl FieldKind {
    pub fn from_key(key: &str) -> Result<FieldKind> {
        key.trim()
            .parse()
            .map_err(|_| Error::InvalidFieldKind(key.to_string()))
    }
}

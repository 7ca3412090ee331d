use std::borrow::Cow;

use super::bundled;
use super::record::{CountryRecord, FieldKind};
use crate::error::{Error, Result};
use crate::restcountries::client::RestCountriesClient;
use crate::settings::Settings;
use crate::telemetry::{error, info, warn, LogKey};

/// Which table an operation reads from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DataSource {
    #[default]
    Bundled,
    /// A fresh fetch from the countries API, used for this call only.
    Remote,
}

impl From<bool> for DataSource {
    fn from(use_remote: bool) -> Self {
        match use_remote {
            true => DataSource::Remote,
            false => DataSource::Bundled,
        }
    }
}

/// Trims and uppercases a lookup value. Blank values are rejected.
pub fn normalize_query(value: &str) -> Result<String> {
    let query = value.trim().to_uppercase();
    match query.is_empty() {
        true => Err(Error::EmptyQueryValue),
        false => Ok(query),
    }
}

fn matches(record: &CountryRecord, kind: FieldKind, query: &str) -> bool {
    // Name fields are uppercased too, so every kind compares case-insensitively.
    record.field(kind).to_uppercase() == query
}

/// First record in table order whose `kind` field equals an already
/// normalized `query`.
pub fn first_match<'a>(
    table: &'a [CountryRecord],
    kind: FieldKind,
    query: &str,
) -> Option<&'a CountryRecord> {
    table.iter().find(|record| matches(record, kind, query))
}

/// Looks countries up by any of their five fields.
///
/// Nothing here returns an error for expected conditions: a blank value, an
/// unknown selector or a failed remote fetch all come back as "no data". Use
/// [`CountryDirectory::try_list_remote`] when the cause matters.
pub struct CountryDirectory {
    table: Cow<'static, [CountryRecord]>,
    remote: RestCountriesClient,
}

impl CountryDirectory {
    pub fn new() -> Result<CountryDirectory> {
        Ok(CountryDirectory::with_table(
            bundled::all(),
            RestCountriesClient::new(None, None)?,
        ))
    }

    pub fn from_settings(settings: &Settings) -> Result<CountryDirectory> {
        let remote = RestCountriesClient::new(
            Some(&settings.countries_api_url),
            Some(settings.request_timeout()),
        )?;
        Ok(CountryDirectory::with_table(bundled::all(), remote))
    }

    pub fn with_table(
        table: impl Into<Cow<'static, [CountryRecord]>>,
        remote: RestCountriesClient,
    ) -> CountryDirectory {
        CountryDirectory {
            table: table.into(),
            remote,
        }
    }

    pub fn find(&self, kind: FieldKind, value: &str, source: DataSource) -> Option<CountryRecord> {
        let query = match normalize_query(value) {
            Ok(query) => query,
            Err(e) => {
                warn(&LogKey::EmptyQueryValue, &e.to_string());
                return None;
            }
        };
        match source {
            DataSource::Bundled => first_match(&self.table, kind, &query).cloned(),
            DataSource::Remote => self
                .list_all(DataSource::Remote)
                .into_iter()
                .find(|record| matches(record, kind, &query)),
        }
    }

    /// Same as [`CountryDirectory::find`] with the selector given as a
    /// string such as `"2letter"` or `"nativeName"`.
    pub fn find_by_key(&self, key: &str, value: &str, source: DataSource) -> Option<CountryRecord> {
        match FieldKind::from_key(key) {
            Ok(kind) => self.find(kind, value, source),
            Err(e) => {
                warn(&LogKey::InvalidFieldKind, &e.to_string());
                None
            }
        }
    }

    /// The whole active table in source order. A failed remote fetch yields
    /// an empty list; it never falls back to the bundled table.
    pub fn list_all(&self, source: DataSource) -> Vec<CountryRecord> {
        match source {
            DataSource::Bundled => self.table.to_vec(),
            DataSource::Remote => match self.try_list_remote() {
                Ok(countries) => countries,
                Err(e) => {
                    error(
                        &LogKey::RemoteFetchFailed,
                        "Could not get countries from the countries API.",
                        Some(&e),
                    );
                    Vec::new()
                }
            },
        }
    }

    pub fn try_list_remote(&self) -> Result<Vec<CountryRecord>> {
        let countries = self.remote.fetch_countries()?;
        info(
            &LogKey::RemoteFetchSucceeded,
            &format!("Received {} countries from the countries API.", countries.len()),
        );
        Ok(countries)
    }
}

use once_cell::sync::Lazy;

use super::directory::{first_match, normalize_query};
use super::record::{CountryRecord, FieldKind};

/*
 * The bundled table was taken from the REST Countries v2 API and is kept
 * in data/countries.json, one object per country or territory.
 */
const COUNTRIES_JSON: &str = include_str!("../../../data/countries.json");

static COUNTRIES: Lazy<Vec<CountryRecord>> = Lazy::new(|| {
    serde_json::from_str(COUNTRIES_JSON).expect("Bundled country table is not valid JSON.")
});

pub fn all() -> &'static [CountryRecord] {
    &COUNTRIES
}

/// Looks a country up in the bundled table without cloning it.
pub fn find(kind: FieldKind, value: &str) -> Option<&'static CountryRecord> {
    let query = normalize_query(value).ok()?;
    first_match(all(), kind, &query)
}

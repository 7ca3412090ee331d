use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

use crate::countries::CountryRecord;
use crate::error::{Error, Result};
use crate::telemetry::{info, LogKey};

pub const DEFAULT_ENDPOINT: &str =
    "https://restcountries.com/v2/all?fields=name,nativeName,alpha2Code,alpha3Code,numericCode";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct RestCountriesClient {
    client: Client,
    endpoint: Url,
}

/// One element of the `/v2/all` response. Extra fields are ignored.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestCountry {
    pub name: String,
    pub native_name: String,
    pub alpha2_code: String,
    pub alpha3_code: String,
    // null for entities without a UN code
    #[serde(default)]
    pub numeric_code: Option<String>,
}

impl From<RestCountry> for CountryRecord {
    fn from(country: RestCountry) -> Self {
        CountryRecord {
            name: country.name,
            native_name: country.native_name,
            alpha2: country.alpha2_code,
            alpha3: country.alpha3_code,
            un_code: country.numeric_code.unwrap_or_default(),
        }
    }
}

impl RestCountriesClient {
    pub fn new(endpoint: Option<&str>, timeout: Option<Duration>) -> Result<RestCountriesClient> {
        let endpoint = endpoint.unwrap_or(DEFAULT_ENDPOINT);
        let endpoint = Url::parse(endpoint).map_err(|e| Error::InvalidEndpoint {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(Error::HttpClient)?;
        Ok(RestCountriesClient { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches the full country list, keeping the response order.
    ///
    /// Only a 200 with a non-empty body counts as success. A body that is not
    /// an array of country objects rejects the whole response.
    pub fn fetch_countries(&self) -> Result<Vec<CountryRecord>> {
        info(
            &LogKey::RemoteFetch,
            &format!("Requesting countries from {}.", self.endpoint),
        );
        let resp = self.client.get(self.endpoint.clone()).send()?;
        if resp.status() != StatusCode::OK {
            return Err(Error::RemoteStatus(resp.status()));
        }
        let body = resp.bytes()?;
        if body.is_empty() {
            return Err(Error::EmptyRemoteBody);
        }
        let countries: Vec<RestCountry> = serde_json::from_slice(&body)?;
        Ok(countries.into_iter().map(CountryRecord::from).collect())
    }
}

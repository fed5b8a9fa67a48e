use crate::{default_client, invalid_payload, unavailable};
use async_trait::async_trait;
use atlas_core::{CountrySource, RawCountry, SourceError, SourceKind};
use tracing::debug;

/// Production endpoint for the countries catalog.
pub const COUNTRIES_API: &str =
    "https://restcountries.com/v2/all?fields=name,capital,region,population,flag,currencies";

/// HTTP client for the countries catalog feed.
#[derive(Debug, Clone)]
pub struct RestCountriesClient {
    client: reqwest::Client,
    endpoint: String,
}

impl RestCountriesClient {
    /// Creates a client against the production endpoint.
    pub fn new() -> Self {
        Self::with_endpoint(COUNTRIES_API)
    }

    /// Creates a client against a custom endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: default_client(),
            endpoint: endpoint.into(),
        }
    }
}

impl Default for RestCountriesClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CountrySource for RestCountriesClient {
    async fn fetch_countries(&self) -> Result<Vec<RawCountry>, SourceError> {
        debug!(endpoint = %self.endpoint, "fetching country catalog");

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| unavailable(SourceKind::Countries, err))?;

        let countries: Vec<RawCountry> = response
            .json()
            .await
            .map_err(|err| invalid_payload(SourceKind::Countries, err))?;

        debug!(count = countries.len(), "fetched country catalog");
        Ok(countries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn server_with(response: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/all"))
            .respond_with(response)
            .mount(&server)
            .await;
        server
    }

    fn client_for(server: &MockServer) -> RestCountriesClient {
        RestCountriesClient::with_endpoint(format!("{}/v2/all", server.uri()))
    }

    #[tokio::test]
    async fn parses_catalog_payload() {
        let body = json!([
            {
                "name": "France",
                "capital": "Paris",
                "region": "Europe",
                "population": 67391582,
                "flag": "https://flagcdn.com/fr.svg",
                "currencies": [{"code": "EUR", "name": "Euro", "symbol": "€"}]
            },
            {
                "name": "Antarctica",
                "population": 1000
            }
        ]);
        let server = server_with(ResponseTemplate::new(200).set_body_json(body)).await;

        let countries = client_for(&server).fetch_countries().await.unwrap();

        assert_eq!(countries.len(), 2);
        assert_eq!(countries[0].name, "France");
        assert_eq!(countries[0].capital.as_deref(), Some("Paris"));
        assert_eq!(countries[0].primary_currency_code(), Some("EUR"));
        assert_eq!(countries[1].name, "Antarctica");
        assert_eq!(countries[1].capital, None);
        assert_eq!(countries[1].primary_currency_code(), None);
    }

    #[tokio::test]
    async fn server_error_maps_to_unavailable() {
        let server = server_with(ResponseTemplate::new(500)).await;

        let err = client_for(&server).fetch_countries().await.unwrap_err();

        assert!(matches!(err, SourceError::Unavailable { .. }));
        assert_eq!(err.kind(), SourceKind::Countries);
    }

    #[tokio::test]
    async fn undecodable_body_maps_to_invalid_payload() {
        let server =
            server_with(ResponseTemplate::new(200).set_body_string("not json at all")).await;

        let err = client_for(&server).fetch_countries().await.unwrap_err();

        assert!(matches!(err, SourceError::InvalidPayload { .. }));
        assert_eq!(err.kind(), SourceKind::Countries);
    }
}

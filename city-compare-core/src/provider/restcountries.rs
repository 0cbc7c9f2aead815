use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;

use crate::{LookupError, model::CountryRecord};

use super::{CountryProvider, ProviderId, get_json};

/// REST Countries v2 `alpha/{code}` lookup. Needs no credentials.
#[derive(Debug, Clone)]
pub struct RestCountriesProvider {
    base_url: String,
    http: Client,
}

impl RestCountriesProvider {
    pub fn new(http: Client) -> Self {
        Self {
            base_url: ProviderId::RestCountries.default_base_url().to_string(),
            http,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct RcCurrency {
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RcCountry {
    #[serde(default)]
    currencies: Vec<RcCurrency>,
}

#[async_trait]
impl CountryProvider for RestCountriesProvider {
    async fn country(&self, country_code: &str) -> Result<CountryRecord, LookupError> {
        let provider = ProviderId::RestCountries;

        if country_code.trim().is_empty() {
            return Err(LookupError::empty(provider, "country code to look up"));
        }

        let mut request = self
            .http
            .get(&self.base_url)
            .build()
            .map_err(|source| LookupError::Network { provider, source })?;

        // Encoded as a single segment so the code cannot reshape the path.
        // Non-hierarchical base URLs are left alone; reqwest refuses them on send.
        if let Ok(mut segments) = request.url_mut().path_segments_mut() {
            segments.pop_if_empty().push(country_code);
        }

        let request = RequestBuilder::from_parts(self.http.clone(), request);
        let parsed: RcCountry = get_json(provider, request).await?;

        let currencies = parsed
            .currencies
            .into_iter()
            .filter_map(|c| c.code)
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty())
            .collect();

        Ok(CountryRecord {
            country_code: country_code.to_string(),
            currencies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> RestCountriesProvider {
        RestCountriesProvider::new(Client::new()).with_base_url(format!("{}/v2/alpha/", server.uri()))
    }

    #[tokio::test]
    async fn keeps_currency_order() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "name": "Switzerland",
            "alpha2Code": "CH",
            "currencies": [
                { "code": "CHF", "name": "Swiss franc", "symbol": "Fr" },
                { "code": "EUR", "name": "Euro", "symbol": "€" }
            ]
        });

        Mock::given(method("GET"))
            .and(path("/v2/alpha/CH"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;

        let record = provider_for(&server).country("CH").await.unwrap();

        assert_eq!(record.country_code, "CH");
        assert_eq!(record.currencies, vec!["CHF".to_string(), "EUR".to_string()]);
    }

    #[tokio::test]
    async fn entries_without_code_are_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/alpha/AQ"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "Antarctica",
                "currencies": [ { "name": "none" } ]
            })))
            .mount(&server)
            .await;

        let record = provider_for(&server).country("AQ").await.unwrap();

        assert!(record.currencies.is_empty());
    }

    #[tokio::test]
    async fn country_code_is_encoded_as_one_path_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/alpha/G%2FB%3Fx=1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "currencies": [ { "code": "GBP" } ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let record = provider_for(&server).country("G/B?x=1").await.unwrap();

        assert_eq!(record.currencies, vec!["GBP".to_string()]);
    }

    #[tokio::test]
    async fn base_url_without_trailing_slash_gets_code_appended() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/alpha/JP"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "currencies": [ { "code": "JPY" } ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = RestCountriesProvider::new(Client::new())
            .with_base_url(format!("{}/v2/alpha", server.uri()));
        let record = provider.country("JP").await.unwrap();

        assert_eq!(record.currencies, vec!["JPY".to_string()]);
    }

    #[tokio::test]
    async fn blank_code_is_an_empty_result() {
        let server = MockServer::start().await;

        let err = provider_for(&server).country("  ").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::EmptyResult);
    }

    #[tokio::test]
    async fn unknown_code_is_a_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({ "status": 404, "message": "Not Found" })),
            )
            .mount(&server)
            .await;

        let err = provider_for(&server).country("XX").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Status);
    }

    #[tokio::test]
    async fn non_json_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let err = provider_for(&server).country("GB").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Decode);
    }
}

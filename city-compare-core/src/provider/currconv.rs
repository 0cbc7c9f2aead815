use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;

use crate::{LookupError, model::ConversionRate};

use super::{ProviderId, RateProvider, get_json};

/// Currency converter `convert?compact=ultra` endpoint.
///
/// For `q=A_B` the provider answers `{"A_B": x}` where one unit of A is worth x of B.
#[derive(Debug, Clone)]
pub struct CurrencyConverterProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl CurrencyConverterProvider {
    pub fn new(api_key: String, http: Client) -> Self {
        Self {
            api_key,
            base_url: ProviderId::CurrencyConverter.default_base_url().to_string(),
            http,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl RateProvider for CurrencyConverterProvider {
    async fn rate(&self, from: &str, to: &str) -> Result<ConversionRate, LookupError> {
        let provider = ProviderId::CurrencyConverter;
        let pair = format!("{from}_{to}");

        let request = self.http.get(&self.base_url).query(&[
            ("q", pair.as_str()),
            ("compact", "ultra"),
            ("apiKey", self.api_key.as_str()),
        ]);

        let rates: HashMap<String, f64> = get_json(provider, request).await?;

        let rate = rates
            .get(&pair)
            .copied()
            .ok_or_else(|| LookupError::empty(provider, format!("rate for {pair}")))?;

        Ok(ConversionRate {
            from: from.to_string(),
            to: to.to_string(),
            rate,
        })
    }
}

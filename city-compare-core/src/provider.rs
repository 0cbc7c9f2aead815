use crate::{
    Config, ConversionRate, CountryRecord, LookupError, WeatherRecord,
    provider::{
        currconv::CurrencyConverterProvider, openweather::OpenWeatherProvider,
        restcountries::RestCountriesProvider,
    },
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::{fmt::Debug, time::Duration};

pub mod currconv;
pub mod openweather;
pub mod restcountries;

/// Per-request deadline for every provider call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeather,
    RestCountries,
    CurrencyConverter,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "openweather",
            ProviderId::RestCountries => "restcountries",
            ProviderId::CurrencyConverter => "currconv",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeather, ProviderId::RestCountries, ProviderId::CurrencyConverter]
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "https://api.openweathermap.org/data/2.5/weather",
            ProviderId::RestCountries => "https://restcountries.com/v2/alpha",
            ProviderId::CurrencyConverter => "https://free.currconv.com/api/v7/convert",
        }
    }

    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            ProviderId::OpenWeather => Some("OPENWEATHER_API_KEY"),
            ProviderId::RestCountries => None,
            ProviderId::CurrencyConverter => Some("CURRCONV_API_KEY"),
        }
    }

    pub fn base_url_env(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "OPENWEATHER_URL",
            ProviderId::RestCountries => "RESTCOUNTRIES_URL",
            ProviderId::CurrencyConverter => "CURRCONV_URL",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current temperature and country for a free-text location.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, location: &str) -> Result<WeatherRecord, LookupError>;
}

/// Country details keyed by the code the weather provider reports.
#[async_trait]
pub trait CountryProvider: Send + Sync + Debug {
    async fn country(&self, country_code: &str) -> Result<CountryRecord, LookupError>;
}

#[async_trait]
pub trait RateProvider: Send + Sync + Debug {
    async fn rate(&self, from: &str, to: &str) -> Result<ConversionRate, LookupError>;
}

/// Shared client with the fixed per-request timeout.
pub fn http_client() -> anyhow::Result<Client> {
    http_client_with_timeout(REQUEST_TIMEOUT)
}

pub fn http_client_with_timeout(timeout: Duration) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

fn required_api_key(id: ProviderId, config: &Config) -> anyhow::Result<String> {
    let env_hint = id.api_key_env().unwrap_or("the config file");

    config.provider_api_key(id).map(str::to_owned).ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for provider '{id}'.\n\
                 Hint: set {env_hint} or add `api_key` under [providers.{id}] in the config file."
        )
    })
}

pub fn weather_provider_from_config(
    config: &Config,
    http: Client,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let id = ProviderId::OpenWeather;
    let api_key = required_api_key(id, config)?;

    let boxed: Box<dyn WeatherProvider> =
        Box::new(OpenWeatherProvider::new(api_key, http).with_base_url(config.provider_base_url(id)));

    Ok(boxed)
}

pub fn country_provider_from_config(
    config: &Config,
    http: Client,
) -> anyhow::Result<Box<dyn CountryProvider>> {
    let url = config.provider_base_url(ProviderId::RestCountries);

    let boxed: Box<dyn CountryProvider> =
        Box::new(RestCountriesProvider::new(http).with_base_url(url));

    Ok(boxed)
}

pub fn rate_provider_from_config(
    config: &Config,
    http: Client,
) -> anyhow::Result<Box<dyn RateProvider>> {
    let id = ProviderId::CurrencyConverter;
    let api_key = required_api_key(id, config)?;

    let boxed: Box<dyn RateProvider> = Box::new(
        CurrencyConverterProvider::new(api_key, http).with_base_url(config.provider_base_url(id)),
    );

    Ok(boxed)
}

/// Send the request and decode a successful JSON body.
pub(crate) async fn get_json<T: DeserializeOwned>(
    provider: ProviderId,
    request: RequestBuilder,
) -> Result<T, LookupError> {
    let res = request
        .send()
        .await
        .map_err(|source| LookupError::Network { provider, source })?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|source| LookupError::Network { provider, source })?;

    if !status.is_success() {
        return Err(LookupError::Status { provider, status, body: truncate_body(&body) });
    }

    serde_json::from_str(&body).map_err(|source| LookupError::Decode { provider, source })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

//! Weather → country → currency pipeline behind a single comparison.

use tracing::{debug, info};

use crate::{
    Config, LookupError,
    model::{ComparisonRequest, ComparisonResult, WeatherRecord},
    provider::{
        CountryProvider, ProviderId, RateProvider, WeatherProvider, country_provider_from_config,
        http_client, rate_provider_from_config, weather_provider_from_config,
    },
};

#[derive(Debug)]
pub struct Aggregator {
    weather: Box<dyn WeatherProvider>,
    countries: Box<dyn CountryProvider>,
    rates: Box<dyn RateProvider>,
    concurrent_lookups: bool,
}

impl Aggregator {
    pub fn new(
        weather: Box<dyn WeatherProvider>,
        countries: Box<dyn CountryProvider>,
        rates: Box<dyn RateProvider>,
    ) -> Self {
        Self { weather, countries, rates, concurrent_lookups: false }
    }

    /// Build the HTTP-backed pipeline. Fails if a required API key is missing.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::from_config_with_client(config, http_client()?)
    }

    /// Same as [`Aggregator::from_config`], with every provider sharing `http`.
    pub fn from_config_with_client(config: &Config, http: reqwest::Client) -> anyhow::Result<Self> {
        let aggregator = Self::new(
            weather_provider_from_config(config, http.clone())?,
            country_provider_from_config(config, http.clone())?,
            rate_provider_from_config(config, http)?,
        );

        Ok(aggregator.with_concurrent_lookups(config.concurrent))
    }

    /// Run the per-city lookups of each stage together instead of one after another.
    pub fn with_concurrent_lookups(mut self, enabled: bool) -> Self {
        self.concurrent_lookups = enabled;
        self
    }

    pub async fn resolve_weather(&self, location: &str) -> Result<WeatherRecord, LookupError> {
        debug!(location, "resolving weather");
        self.weather.current_weather(location).await
    }

    /// First currency of the country; the rest are ignored.
    pub async fn resolve_currency(&self, country_code: &str) -> Result<String, LookupError> {
        debug!(country_code, "resolving currency");
        let country = self.countries.country(country_code).await?;

        country.currencies.into_iter().next().ok_or_else(|| {
            LookupError::empty(ProviderId::RestCountries, format!("currencies for '{country_code}'"))
        })
    }

    /// Units of `to` per one unit of `from`. Identical codes short-circuit to 1.0.
    pub async fn resolve_conversion_rate(&self, from: &str, to: &str) -> Result<f64, LookupError> {
        if from == to {
            debug!(currency = from, "identity conversion");
            return Ok(1.0);
        }

        debug!(from, to, "resolving conversion rate");
        Ok(self.rates.rate(from, to).await?.rate)
    }

    /// Stops at the first failing lookup and returns its error.
    pub async fn compare(
        &self,
        request: &ComparisonRequest,
    ) -> Result<ComparisonResult, LookupError> {
        let (weather1, weather2) = if self.concurrent_lookups {
            tokio::try_join!(
                self.resolve_weather(&request.city1),
                self.resolve_weather(&request.city2)
            )?
        } else {
            (
                self.resolve_weather(&request.city1).await?,
                self.resolve_weather(&request.city2).await?,
            )
        };

        let (currency1, currency2) = if self.concurrent_lookups {
            tokio::try_join!(
                self.resolve_currency(&weather1.country_code),
                self.resolve_currency(&weather2.country_code)
            )?
        } else {
            (
                self.resolve_currency(&weather1.country_code).await?,
                self.resolve_currency(&weather2.country_code).await?,
            )
        };

        let conversion_rate = self.resolve_conversion_rate(&currency1, &currency2).await?;

        let result = ComparisonResult {
            city1: request.city1.clone(),
            city2: request.city2.clone(),
            country1: weather1.country_code,
            country2: weather2.country_code,
            temperature1: weather1.temperature_c,
            temperature2: weather2.temperature_c,
            currency1,
            currency2,
            conversion_rate,
        };

        info!(
            country1 = %result.country1,
            country2 = %result.country2,
            currency1 = %result.currency1,
            currency2 = %result.currency2,
            rate = result.conversion_rate,
            "comparison assembled"
        );

        Ok(result)
    }
}

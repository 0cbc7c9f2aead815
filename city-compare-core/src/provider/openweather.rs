use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{LookupError, model::WeatherRecord};

use super::{ProviderId, WeatherProvider, get_json};

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, http: Client) -> Self {
        Self {
            api_key,
            base_url: ProviderId::OpenWeather.default_base_url().to_string(),
            http,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    sys: OwSys,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, location: &str) -> Result<WeatherRecord, LookupError> {
        let provider = ProviderId::OpenWeather;

        let request = self.http.get(&self.base_url).query(&[
            ("q", location),
            ("units", "metric"),
            ("appid", self.api_key.as_str()),
        ]);

        let parsed: OwCurrentResponse = get_json(provider, request).await?;

        if parsed.sys.country.trim().is_empty() {
            return Err(LookupError::empty(provider, format!("country code for '{location}'")));
        }

        Ok(WeatherRecord {
            country_code: parsed.sys.country,
            temperature_c: parsed.main.temp,
        })
    }
}

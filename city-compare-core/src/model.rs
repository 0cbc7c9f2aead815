use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRequest {
    pub city1: String,
    pub city2: String,
}

impl ComparisonRequest {
    pub fn new(city1: impl Into<String>, city2: impl Into<String>) -> Self {
        Self { city1: city1.into(), city2: city2.into() }
    }
}

/// Current conditions for one location, as far as the comparison needs them.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub country_code: String,
    pub temperature_c: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRecord {
    pub country_code: String,
    /// Currency codes in provider order; only the first one is used.
    pub currencies: Vec<String>,
}

/// `rate` units of `to` are worth one unit of `from`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRate {
    pub from: String,
    pub to: String,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub city1: String,
    pub city2: String,
    pub country1: String,
    pub country2: String,
    pub temperature1: f64,
    pub temperature2: f64,
    pub currency1: String,
    pub currency2: String,
    /// Amount of `currency2` equal to one unit of `currency1`.
    pub conversion_rate: f64,
}

const SEPARATOR: &str = "----------------------------";

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\t\t\t{}", self.city1, self.city2)?;
        writeln!(f, "{SEPARATOR}")?;
        writeln!(f, "{:.2}º\t\t\t{:.2}º", self.temperature1, self.temperature2)?;
        writeln!(f, "{}\t\t\t{}", self.currency1, self.currency2)?;
        writeln!(f, "\t{:.6}", self.conversion_rate)
    }
}

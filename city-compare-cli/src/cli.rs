use anyhow::Context;
use city_compare_core::{Aggregator, ComparisonRequest, Config};
use clap::Parser;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "city-compare",
    version,
    about = "Compare current temperature and currency of two cities"
)]
pub struct Cli {
    /// First city, e.g. "London".
    pub city1: String,

    /// Second city, e.g. "Tokyo".
    pub city2: String,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;
        let aggregator = Aggregator::from_config(&config)?;

        let request = ComparisonRequest::new(self.city1, self.city2);
        let result = aggregator
            .compare(&request)
            .await
            .with_context(|| format!("Failed to compare '{}' and '{}'", request.city1, request.city2))?;

        print!("{result}");

        Ok(())
    }
}

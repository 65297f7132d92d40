use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config,
    decode::decode,
    error::ForecastFailure,
    fetch::ForecastFetcher,
    model::{ForecastEntry, ForecastQuery},
};

/// Anything that can answer a forecast query with a fresh list of entries.
///
/// The production implementation is [`ForecastFetcher`]; tests substitute
/// their own.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch(&self, query: &ForecastQuery) -> Result<Vec<ForecastEntry>, ForecastFailure>;
}

#[async_trait]
impl ForecastSource for ForecastFetcher {
    async fn fetch(&self, query: &ForecastQuery) -> Result<Vec<ForecastEntry>, ForecastFailure> {
        let request = self.build_request(query)?;
        let payload = self.execute(request).await?;
        Ok(decode(&payload)?)
    }
}

/// Construct the production fetcher from config.
pub fn source_from_config(config: &Config) -> anyhow::Result<ForecastFetcher> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `forecast configure` and enter your API key."
        )
    })?;

    Ok(ForecastFetcher::with_endpoint(
        api_key.to_owned(),
        config.endpoint().to_owned(),
    ))
}

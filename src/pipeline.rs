use crate::config::{Config, ShortForecastMode};
use crate::forecast::extract::ForecastExtractor;
use crate::forecast::merge::merge_forecasts;
use crate::forecast::retention::RunMoment;
use crate::forecast::short::project_relative;
use crate::forecast::types::ForecastMap;
use crate::output::{self, OutputError};
use crate::scrape::ForecastScraper;
use crate::source::{PageRenderer, RenderError, SnapshotSource};
use std::fs;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Could not find article URL on {0}")]
    NoArticleLink(String),
    #[error("No forecast data extracted from {0}")]
    NoForecasts(String),
    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),
    #[error("Writing output failed: {0}")]
    Output(#[from] OutputError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Entries in the written full forecast.
    pub entries: usize,
    /// Labels in the written short forecast, if it was regenerated.
    pub short_labels: Option<usize>,
}

/// One scrape, merge and publish run.
pub struct Pipeline {
    config: Config,
    scraper: ForecastScraper,
    extractor: ForecastExtractor,
    snapshot: Box<dyn SnapshotSource>,
}

impl Pipeline {
    pub fn new(
        config: Config,
        renderer: Box<dyn PageRenderer>,
        snapshot: Box<dyn SnapshotSource>,
    ) -> Result<Self, regex::Error> {
        let extractor = ForecastExtractor::new(config.vocabulary.clone())?;
        let scraper = ForecastScraper::new(renderer, config.selectors.clone());
        Ok(Self {
            config,
            scraper,
            extractor,
            snapshot,
        })
    }

    /// Refreshes the full forecast, then rebuilds the short one according to the configured mode.
    ///
    /// A failed refresh never touches the full forecast file; its error is returned after the
    /// short forecast step had its chance to run.
    pub async fn run(&self, moment: &RunMoment) -> Result<RunSummary, RunError> {
        let refreshed = self.refresh_forecast(moment).await;
        if let Err(err) = &refreshed {
            tracing::error!("{}", err);
        }

        let regenerate = match self.config.short_forecast_mode {
            ShortForecastMode::Always => true,
            ShortForecastMode::AfterWrite => refreshed.is_ok(),
        };
        let short = if regenerate {
            tracing::info!("Creating short forecast...");
            Some(self.write_short_forecast(moment))
        } else {
            tracing::info!("Skipping short forecast, full forecast was not written");
            None
        };

        let entries = match refreshed {
            Ok(entries) => entries,
            Err(err) => {
                if let Some(Err(short_err)) = &short {
                    tracing::error!("Short forecast not written: {}", short_err);
                }
                return Err(err);
            }
        };
        let short_labels = short.transpose()?;

        Ok(RunSummary {
            entries,
            short_labels,
        })
    }

    async fn refresh_forecast(&self, moment: &RunMoment) -> Result<usize, RunError> {
        tracing::info!("Fetching latest article URL from {}", self.config.main_url);
        let article_url = self
            .scraper
            .find_article_url(&self.config.main_url)
            .await?
            .ok_or_else(|| RunError::NoArticleLink(self.config.main_url.clone()))?;
        tracing::info!("Found article: {}", article_url);

        let paragraphs = self.scraper.read_article(&article_url).await?;
        let fresh = self.extractor.extract(&paragraphs, moment.today);
        if fresh.is_empty() {
            return Err(RunError::NoForecasts(article_url));
        }
        tracing::info!(
            "Extracted {} forecast entries from {} paragraphs",
            fresh.len(),
            paragraphs.len()
        );
        tracing::debug!(
            "Fresh keys: {:?}",
            fresh.keys().map(ToString::to_string).collect::<Vec<_>>()
        );

        let prior = self.load_prior_snapshot().await;
        let merged = merge_forecasts(fresh, &prior, moment);
        tracing::info!("Final dataset contains {} entries", merged.len());

        output::write_json(&self.config.forecast_file, &merged)?;
        tracing::info!("Full forecast saved to {}", self.config.forecast_file.display());
        Ok(merged.len())
    }

    async fn load_prior_snapshot(&self) -> ForecastMap {
        match self.snapshot.fetch().await {
            Ok(prior) => {
                tracing::debug!("Prior snapshot holds {} entries", prior.len());
                prior
            }
            Err(err) => {
                tracing::warn!("Prior snapshot unavailable, continuing without it: {}", err);
                ForecastMap::new()
            }
        }
    }

    fn write_short_forecast(&self, moment: &RunMoment) -> Result<usize, OutputError> {
        let forecasts = output::read_forecast(&self.config.forecast_file)?;
        let short = project_relative(&forecasts, moment, &self.config.vocabulary);
        output::write_json(&self.config.short_forecast_file, &short)?;

        let path = &self.config.short_forecast_file;
        let shown = fs::canonicalize(path).unwrap_or_else(|_| path.clone());
        tracing::info!("Short forecast saved to: {}", shown.display());
        Ok(short.len())
    }
}

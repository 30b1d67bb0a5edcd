use crate::core::{Ingestion, Pipeline, RunSummary};
use crate::utils::error::{RealtyError, Result};

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
    discount: Option<i32>,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            discount: None,
        }
    }

    /// Discount every listing by `percentage` after ingestion. Listing order
    /// is not recomputed.
    pub fn with_discount(mut self, percentage: Option<i32>) -> Self {
        self.discount = percentage;
        self
    }

    /// Runs extract, transform and load once.
    ///
    /// An empty listing set is not an error: it is logged as a warning and
    /// the summary comes back without an output path.
    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting report run...");

        let Ingestion {
            mut listings,
            errors,
            duplicates,
            source_error,
        } = self.pipeline.extract().await?;

        tracing::info!(
            "Loaded {} listings ({} rejected lines, {} duplicates)",
            listings.len(),
            errors.len(),
            duplicates
        );

        let mut summary = RunSummary {
            output_path: None,
            listings: listings.len(),
            rejected_lines: errors.len(),
            duplicates,
            source_unavailable: source_error.is_some(),
        };

        if let Some(percentage) = self.discount {
            listings.apply_discount_all(percentage);
            tracing::info!("Applied {}% discount to {} listings", percentage, listings.len());
        }

        let report = match self.pipeline.transform(&listings).await {
            Ok(report) => report,
            Err(RealtyError::EmptyStore) => {
                tracing::warn!("⚠️ No data loaded! Report generation skipped");
                return Ok(summary);
            }
            Err(e) => return Err(e),
        };

        let output_path = self.pipeline.load(&report, &listings).await?;
        tracing::info!("Report saved to: {}", output_path);

        summary.output_path = Some(output_path);
        Ok(summary)
    }
}

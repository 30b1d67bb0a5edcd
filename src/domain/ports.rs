use crate::domain::genre::Genre;
use crate::domain::listing::ListingStore;
use crate::domain::model::{Ingestion, Report};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn report_city(&self) -> &str;
    fn report_genre(&self) -> Genre;
    fn output_formats(&self) -> &[String];
    /// Percentage applied to every listing before the report is built.
    fn discount(&self) -> Option<i32>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Ingestion>;
    async fn transform(&self, listings: &ListingStore) -> Result<Report>;
    async fn load(&self, report: &Report, listings: &ListingStore) -> Result<String>;
}

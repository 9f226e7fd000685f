use crate::domain::model::{AssignmentSet, OutputFormat, Roster, Strategy};
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
    fn participants_path(&self) -> &str;
    fn history_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_format(&self) -> OutputFormat;
    fn strategy(&self) -> Strategy;
    fn max_attempts(&self) -> usize;
    fn seed(&self) -> Option<u64>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Roster>;
    async fn transform(&self, roster: Roster) -> Result<AssignmentSet>;
    async fn load(&self, result: AssignmentSet) -> Result<String>;
}

use crate::domain::model::CanvasSettings;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait Storage: Send + Sync {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn canvas(&self) -> CanvasSettings;
    fn play_delay(&self) -> Duration;
    fn output_path(&self) -> &str;
}

use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ListViewEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ListViewEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting list view annotation...");

        let rows = self.pipeline.extract().await?;
        tracing::info!("Read {} rows", rows.len());

        let result = self.pipeline.transform(rows).await?;
        tracing::info!(
            "Annotated {} rows ({} columns)",
            result.records.len(),
            result.columns.len()
        );

        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}

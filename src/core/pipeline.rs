use crate::core::settings::{ListViewRegistry, ListViewSettings};
use crate::core::{
    AnnotatedRecord, AnnotationResult, ConfigProvider, Pipeline, Record, Storage,
};
use crate::domain::model::value_text;
use crate::domain::ports::Translator;
use crate::utils::error::{ListViewError, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

pub const CSV_OUTPUT_FILE: &str = "annotated.csv";
pub const JSON_OUTPUT_FILE: &str = "annotated.json";
pub const SETTINGS_OUTPUT_FILE: &str = "list_settings.json";

/// Reads list rows, attaches the registered indicator to each one and writes
/// the annotated rows back out. Rows are never filtered here.
pub struct AnnotationPipeline<S: Storage, C: ConfigProvider, T: Translator> {
    storage: S,
    config: C,
    registry: ListViewRegistry<T>,
}

impl<S: Storage, C: ConfigProvider, T: Translator> AnnotationPipeline<S, C, T> {
    pub fn new(storage: S, config: C, registry: ListViewRegistry<T>) -> Self {
        Self {
            storage,
            config,
            registry,
        }
    }

    fn settings(&self) -> Result<&ListViewSettings<T>> {
        let doctype = self.config.doctype();
        self.registry
            .get(doctype)
            .ok_or_else(|| ListViewError::ProcessingError {
                message: format!("No list view settings registered for '{}'", doctype),
            })
    }

    fn output_file(&self, name: &str) -> String {
        Path::new(self.config.output_path())
            .join(name)
            .to_string_lossy()
            .into_owned()
    }
}

fn parse_csv_rows(data: &[u8]) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        let data: HashMap<String, serde_json::Value> = headers
            .iter()
            .zip(row.iter())
            .map(|(h, v)| (h.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        records.push(Record { data });
    }

    Ok(records)
}

fn parse_json_rows(data: &[u8]) -> Result<Vec<Record>> {
    let json_data: serde_json::Value = serde_json::from_slice(data)?;

    let serde_json::Value::Array(items) = json_data else {
        return Err(ListViewError::ProcessingError {
            message: "Expected a JSON array of row objects".to_string(),
        });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            serde_json::Value::Object(obj) => Ok(Record {
                data: obj.into_iter().collect(),
            }),
            other => Err(ListViewError::ProcessingError {
                message: format!("Row {} is not an object: {}", index, other),
            }),
        })
        .collect()
}

fn render_csv(result: &AnnotationResult) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<&str> = result.columns.iter().map(String::as_str).collect();
    header.extend(["indicator_label", "indicator_color", "indicator_filter"]);
    writer.write_record(&header)?;

    for record in &result.records {
        let mut row: Vec<String> = record.fields.iter().map(|(_, v)| value_text(v)).collect();
        row.push(record.indicator.label.clone());
        row.push(
            record
                .indicator
                .color
                .map(|c| c.as_str().to_string())
                .unwrap_or_default(),
        );
        row.push(record.indicator.filter.to_string());
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| ListViewError::IoError(e.into_error()))
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, T: Translator> Pipeline for AnnotationPipeline<S, C, T> {
    async fn extract(&self) -> Result<Vec<Record>> {
        let input = self.config.input_path();
        tracing::debug!("Reading rows from: {}", input);
        let data = self.storage.read_file(input).await?;

        let extension = Path::new(input)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        match extension {
            "csv" => parse_csv_rows(&data),
            "json" => parse_json_rows(&data),
            other => Err(ListViewError::InvalidConfigValueError {
                field: "input".to_string(),
                value: input.to_string(),
                reason: format!("Unsupported input extension: '{}'", other),
            }),
        }
    }

    async fn transform(&self, data: Vec<Record>) -> Result<AnnotationResult> {
        let settings = self.settings()?;
        let columns = settings.fields_to_fetch(self.config.extra_fields());
        let mut per_status: BTreeMap<String, usize> = BTreeMap::new();

        let records: Vec<AnnotatedRecord> = data
            .into_iter()
            .map(|record| {
                let indicator = settings.get_indicator(&record);
                *per_status.entry(indicator.filter.value.clone()).or_default() += 1;

                let fields = columns
                    .iter()
                    .map(|column| {
                        let value = record
                            .data
                            .get(column)
                            .cloned()
                            .unwrap_or(serde_json::Value::Null);
                        (column.clone(), value)
                    })
                    .collect();

                AnnotatedRecord { fields, indicator }
            })
            .collect();

        for (status, count) in &per_status {
            tracing::debug!("  {} row(s) with status '{}'", count, status);
        }

        Ok(AnnotationResult {
            columns,
            records,
            settings_json: settings.to_host_json(),
        })
    }

    async fn load(&self, result: AnnotationResult) -> Result<String> {
        for format in self.config.output_formats() {
            match format.as_str() {
                "csv" => {
                    let data = render_csv(&result)?;
                    let path = self.output_file(CSV_OUTPUT_FILE);
                    tracing::debug!("Writing CSV ({} bytes) to {}", data.len(), path);
                    self.storage.write_file(&path, &data).await?;
                }
                "json" => {
                    let rows: Vec<serde_json::Value> =
                        result.records.iter().map(AnnotatedRecord::to_json).collect();
                    let data = serde_json::to_vec_pretty(&rows)?;
                    let path = self.output_file(JSON_OUTPUT_FILE);
                    tracing::debug!("Writing JSON ({} bytes) to {}", data.len(), path);
                    self.storage.write_file(&path, &data).await?;
                }
                other => {
                    return Err(ListViewError::InvalidConfigValueError {
                        field: "formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported output format".to_string(),
                    })
                }
            }
        }

        let settings = serde_json::to_vec_pretty(&result.settings_json)?;
        self.storage
            .write_file(&self.output_file(SETTINGS_OUTPUT_FILE), &settings)
            .await?;

        Ok(self.config.output_path().to_string())
    }
}

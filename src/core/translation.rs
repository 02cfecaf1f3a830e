use crate::domain::ports::Translator;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// 不翻譯，原文照回
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Lookup table loaded from a translation CSV.
///
/// Each line is `source,translated[,context]` with no header row, the same
/// layout as the per-language files under an app's `translations/` folder.
/// Text without an entry is returned unchanged.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    entries: HashMap<String, String>,
}

impl CatalogTranslator {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let catalog = Self::from_reader(file)?;
        tracing::debug!(
            "Loaded {} translations from {}",
            catalog.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut entries = HashMap::new();
        for row in csv_reader.records() {
            let row = row?;
            match (row.get(0), row.get(1)) {
                (Some(source), Some(translated)) if !source.is_empty() => {
                    entries.insert(source.to_string(), translated.to_string());
                }
                _ => tracing::debug!("Skipping incomplete translation row: {:?}", row),
            }
        }

        Ok(Self { entries })
    }

    pub fn insert(&mut self, source: impl Into<String>, translated: impl Into<String>) {
        self.entries.insert(source.into(), translated.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, text: &str) -> String {
        self.entries
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }
}

/// CLI 與管線共用：有目錄檔就查表，否則原文
#[derive(Debug, Clone)]
pub enum AnyTranslator {
    Identity(IdentityTranslator),
    Catalog(CatalogTranslator),
}

impl AnyTranslator {
    pub fn load(catalog: Option<&str>) -> Result<Self> {
        match catalog {
            Some(path) => Ok(AnyTranslator::Catalog(CatalogTranslator::from_file(path)?)),
            None => Ok(AnyTranslator::Identity(IdentityTranslator)),
        }
    }
}

impl Translator for AnyTranslator {
    fn translate(&self, text: &str) -> String {
        match self {
            AnyTranslator::Identity(t) => t.translate(text),
            AnyTranslator::Catalog(t) => t.translate(text),
        }
    }
}

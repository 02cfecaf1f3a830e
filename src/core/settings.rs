use crate::core::resolver::{StatusIndicatorResolver, STATUS_FIELD};
use crate::domain::model::{FilterExpression, Indicator, OrderStatus, Record};
use crate::domain::ports::Translator;
use crate::utils::error::{ListViewError, Result};
use std::collections::BTreeMap;

pub const PROCESS_ORDER_DOCTYPE: &str = "Process Order";

/// 單一文件類型的列表設定：要帶出的欄位、預設過濾、指示燈
pub struct ListViewSettings<T: Translator> {
    pub add_fields: Vec<String>,
    pub filters: Vec<FilterExpression>,
    pub resolver: StatusIndicatorResolver<T>,
}

impl<T: Translator> ListViewSettings<T> {
    pub fn get_indicator(&self, record: &Record) -> Indicator {
        self.resolver.resolve_record(record)
    }

    /// Fields the host has to project for every row: `add_fields` first, then
    /// `extra` in order, without duplicates.
    pub fn fields_to_fetch(&self, extra: &[String]) -> Vec<String> {
        let mut fields: Vec<String> = Vec::with_capacity(self.add_fields.len() + extra.len());
        for field in self.add_fields.iter().chain(extra.iter()) {
            if !fields.contains(field) {
                fields.push(field.clone());
            }
        }
        fields
    }

    /// 給以資料形式讀設定的前端用
    pub fn to_host_json(&self) -> serde_json::Value {
        let indicators: serde_json::Map<String, serde_json::Value> = OrderStatus::KNOWN
            .iter()
            .map(|status| {
                (
                    status.as_str().to_string(),
                    self.resolver.resolve(status.as_str()).to_host_array(),
                )
            })
            .collect();

        serde_json::json!({
            "add_fields": self.add_fields,
            "filters": self.filters,
            "indicators": indicators,
        })
    }
}

pub fn process_order_settings<T: Translator>(translator: T) -> ListViewSettings<T> {
    ListViewSettings {
        add_fields: vec![STATUS_FIELD.to_string()],
        filters: vec![FilterExpression::not_equals(STATUS_FIELD, "Cancelled")],
        resolver: StatusIndicatorResolver::new(translator),
    }
}

/// Per-doctype list settings, filled once at startup through `register`.
pub struct ListViewRegistry<T: Translator> {
    settings: BTreeMap<String, ListViewSettings<T>>,
}

impl<T: Translator> ListViewRegistry<T> {
    pub fn new() -> Self {
        Self {
            settings: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, doctype: &str, settings: ListViewSettings<T>) -> Result<()> {
        if self.settings.contains_key(doctype) {
            return Err(ListViewError::RegistrationError {
                doctype: doctype.to_string(),
            });
        }

        tracing::debug!(
            "Registered list view settings for '{}' (fields: {:?}, filters: {})",
            doctype,
            settings.add_fields,
            settings.filters.len()
        );
        self.settings.insert(doctype.to_string(), settings);
        Ok(())
    }

    pub fn get(&self, doctype: &str) -> Option<&ListViewSettings<T>> {
        self.settings.get(doctype)
    }

    pub fn doctypes(&self) -> impl Iterator<Item = &str> {
        self.settings.keys().map(String::as_str)
    }
}

impl<T: Translator> Default for ListViewRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

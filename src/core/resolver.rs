use crate::domain::model::{FilterExpression, Indicator, IndicatorColor, Record};
use crate::domain::ports::Translator;
use std::collections::BTreeMap;

pub const STATUS_FIELD: &str = "status";

const SUBMITTED: &str = "Submitted";
const SUBMITTED_LABEL: &str = "Not Started";

/// 狀態 → 顏色對照表，建構後不再變動
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTable {
    colors: BTreeMap<String, IndicatorColor>,
}

impl StyleTable {
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, IndicatorColor)>,
        K: Into<String>,
    {
        Self {
            colors: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn color_for(&self, status: &str) -> Option<IndicatorColor> {
        self.colors.get(status).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::from_entries([
            ("Draft", IndicatorColor::Orange),
            ("Scheduled", IndicatorColor::Darkgrey),
            ("Completed", IndicatorColor::Green),
            ("Cancelled", IndicatorColor::Red),
        ])
    }
}

/// Maps a Process Order status to the indicator shown next to its list row.
///
/// `Submitted` is always displayed as "Not Started" in orange, whatever the
/// style table says. Unknown statuses get their own (translated) label and no
/// color. Resolution never fails.
pub struct StatusIndicatorResolver<T: Translator> {
    styles: StyleTable,
    translator: T,
}

impl<T: Translator> StatusIndicatorResolver<T> {
    pub fn new(translator: T) -> Self {
        Self::with_styles(StyleTable::default(), translator)
    }

    pub fn with_styles(styles: StyleTable, translator: T) -> Self {
        Self { styles, translator }
    }

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    pub fn resolve(&self, status: &str) -> Indicator {
        let filter = FilterExpression::equals(STATUS_FIELD, status);

        if status == SUBMITTED {
            return Indicator {
                label: self.translator.translate(SUBMITTED_LABEL),
                color: Some(IndicatorColor::Orange),
                filter,
            };
        }

        let color = self.styles.color_for(status);
        if color.is_none() {
            tracing::trace!("No indicator color for status '{}'", status);
        }

        Indicator {
            label: self.translator.translate(status),
            color,
            filter,
        }
    }

    pub fn resolve_record(&self, record: &Record) -> Indicator {
        match record.status() {
            Some(status) => self.resolve(&status),
            None => {
                tracing::warn!("Row has no '{}' value, resolving as empty", STATUS_FIELD);
                self.resolve("")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::translation::IdentityTranslator;
    use crate::domain::model::OrderStatus;

    #[test]
    fn test_table_statuses_use_table_color() {
        let resolver = StatusIndicatorResolver::new(IdentityTranslator);
        let table = StyleTable::default();

        for status in ["Draft", "Scheduled", "Completed", "Cancelled"] {
            let indicator = resolver.resolve(status);
            assert_eq!(indicator.color, table.color_for(status));
            assert!(indicator.color.is_some());
            assert_eq!(indicator.filter, FilterExpression::equals("status", status));
            assert_eq!(indicator.label, status);
        }
    }

    #[test]
    fn test_submitted_is_not_started() {
        let resolver = StatusIndicatorResolver::new(IdentityTranslator);
        let indicator = resolver.resolve("Submitted");

        assert_eq!(indicator.label, "Not Started");
        assert_eq!(indicator.color, Some(IndicatorColor::Orange));
        assert_eq!(indicator.filter.to_string(), "status,=,Submitted");
    }

    #[test]
    fn test_submitted_override_beats_table_entry() {
        let styles = StyleTable::from_entries([
            ("Submitted", IndicatorColor::Blue),
            ("Draft", IndicatorColor::Orange),
        ]);
        let resolver = StatusIndicatorResolver::with_styles(styles, IdentityTranslator);
        let indicator = resolver.resolve("Submitted");

        assert_eq!(indicator.label, "Not Started");
        assert_eq!(indicator.color, Some(IndicatorColor::Orange));
    }

    #[test]
    fn test_unknown_status_has_no_color() {
        let resolver = StatusIndicatorResolver::new(IdentityTranslator);

        for status in ["Unknown", "", "draft", "Not Started"] {
            let indicator = resolver.resolve(status);
            assert_eq!(indicator.color, None);
            assert_eq!(indicator.label, status);
            assert_eq!(indicator.filter, FilterExpression::equals("status", status));
        }
    }

    #[test]
    fn test_labels_go_through_translator() {
        let resolver = StatusIndicatorResolver::new(|text: &str| format!("<{}>", text));

        assert_eq!(resolver.resolve("Submitted").label, "<Not Started>");
        assert_eq!(resolver.resolve("Draft").label, "<Draft>");
        // filter 保留原始狀態值，不翻譯
        assert_eq!(resolver.resolve("Draft").filter.value, "Draft");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let resolver = StatusIndicatorResolver::new(IdentityTranslator);
        for status in OrderStatus::KNOWN {
            assert_eq!(resolver.resolve(status.as_str()), resolver.resolve(status.as_str()));
        }
        assert_eq!(resolver.resolve("Whatever"), resolver.resolve("Whatever"));
    }

    #[test]
    fn test_resolve_record_without_status() {
        let resolver = StatusIndicatorResolver::new(IdentityTranslator);

        let mut record = Record::default();
        record.data.insert("status".to_string(), serde_json::json!("Completed"));
        assert_eq!(resolver.resolve_record(&record).color, Some(IndicatorColor::Green));

        let empty = Record::default();
        let indicator = resolver.resolve_record(&empty);
        assert_eq!(indicator.label, "");
        assert_eq!(indicator.color, None);
        assert_eq!(indicator.filter.to_string(), "status,=,");
    }

    #[test]
    fn test_resolve_record_with_numeric_status() {
        let resolver = StatusIndicatorResolver::new(IdentityTranslator);

        let mut record = Record::default();
        record.data.insert("status".to_string(), serde_json::json!(3));
        let indicator = resolver.resolve_record(&record);
        assert_eq!(indicator.label, "3");
        assert_eq!(indicator.color, None);
        assert_eq!(indicator.filter.to_string(), "status,=,3");

        record.data.insert("status".to_string(), serde_json::Value::Null);
        assert_eq!(resolver.resolve_record(&record).filter.to_string(), "status,=,");
    }

    #[test]
    fn test_resolver_is_shareable_across_threads() {
        let resolver = std::sync::Arc::new(StatusIndicatorResolver::new(IdentityTranslator));
        let handles: Vec<_> = ["Draft", "Submitted", "Cancelled", "Odd"]
            .into_iter()
            .map(|status| {
                let resolver = resolver.clone();
                std::thread::spawn(move || resolver.resolve(status))
            })
            .collect();

        let results: Vec<Indicator> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results[1].label, "Not Started");
        assert_eq!(results[2].color, Some(IndicatorColor::Red));
        assert_eq!(results[3].color, None);
    }
}

use crate::utils::error::ListViewError;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Process Order 的生命週期狀態。未知的標籤保留原樣放在 `Other`。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Draft,
    Scheduled,
    Submitted,
    Completed,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    pub const KNOWN: [OrderStatus; 5] = [
        OrderStatus::Draft,
        OrderStatus::Scheduled,
        OrderStatus::Submitted,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Draft" => OrderStatus::Draft,
            "Scheduled" => OrderStatus::Scheduled,
            "Submitted" => OrderStatus::Submitted,
            "Completed" => OrderStatus::Completed,
            "Cancelled" => OrderStatus::Cancelled,
            other => OrderStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Draft => "Draft",
            OrderStatus::Scheduled => "Scheduled",
            OrderStatus::Submitted => "Submitted",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Other(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, OrderStatus::Other(_))
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(OrderStatus::from_tag(&tag))
    }
}

/// 列表指示燈可用的顏色 token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndicatorColor {
    Blue,
    Cyan,
    Green,
    Orange,
    Yellow,
    Gray,
    Grey,
    Darkgrey,
    Red,
    Pink,
    Purple,
    LightBlue,
}

impl IndicatorColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorColor::Blue => "blue",
            IndicatorColor::Cyan => "cyan",
            IndicatorColor::Green => "green",
            IndicatorColor::Orange => "orange",
            IndicatorColor::Yellow => "yellow",
            IndicatorColor::Gray => "gray",
            IndicatorColor::Grey => "grey",
            IndicatorColor::Darkgrey => "darkgrey",
            IndicatorColor::Red => "red",
            IndicatorColor::Pink => "pink",
            IndicatorColor::Purple => "purple",
            IndicatorColor::LightBlue => "light-blue",
        }
    }
}

impl fmt::Display for IndicatorColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorColor {
    type Err = ListViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let color = match s {
            "blue" => IndicatorColor::Blue,
            "cyan" => IndicatorColor::Cyan,
            "green" => IndicatorColor::Green,
            "orange" => IndicatorColor::Orange,
            "yellow" => IndicatorColor::Yellow,
            "gray" => IndicatorColor::Gray,
            "grey" => IndicatorColor::Grey,
            "darkgrey" => IndicatorColor::Darkgrey,
            "red" => IndicatorColor::Red,
            "pink" => IndicatorColor::Pink,
            "purple" => IndicatorColor::Purple,
            "light-blue" => IndicatorColor::LightBlue,
            other => {
                return Err(ListViewError::ValidationError {
                    message: format!("Unknown indicator color: {}", other),
                })
            }
        };
        Ok(color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    Equals,
    NotEquals,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "=",
            FilterOperator::NotEquals => "!=",
        }
    }
}

impl FromStr for FilterOperator {
    type Err = ListViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" => Ok(FilterOperator::Equals),
            "!=" => Ok(FilterOperator::NotEquals),
            other => Err(ListViewError::ValidationError {
                message: format!("Unsupported filter operator: {}", other),
            }),
        }
    }
}

/// `[field, operator, value]` 形式的過濾條件
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterExpression {
    pub field: String,
    pub operator: FilterOperator,
    pub value: String,
}

impl FilterExpression {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::Equals, value)
    }

    pub fn not_equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::NotEquals, value)
    }
}

/// 列表點擊下鑽用的精簡格式：`status,=,Submitted`
impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.field, self.operator.as_str(), self.value)
    }
}

impl FromStr for FilterExpression {
    type Err = ListViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // value 本身可以含逗號，所以只切前兩個
        let mut parts = s.splitn(3, ',');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(field), Some(op), Some(value)) if !field.is_empty() => {
                Ok(FilterExpression::new(field, op.parse()?, value))
            }
            _ => Err(ListViewError::ValidationError {
                message: format!("Malformed filter expression: {}", s),
            }),
        }
    }
}

impl Serialize for FilterExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.field)?;
        tuple.serialize_element(self.operator.as_str())?;
        tuple.serialize_element(&self.value)?;
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for FilterExpression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (field, op, value) = <(String, String, String)>::deserialize(deserializer)?;
        let operator: FilterOperator = op
            .parse()
            .map_err(<D::Error as serde::de::Error>::custom)?;
        Ok(FilterExpression::new(field, operator, value))
    }
}

/// 列表每一列旁邊顯示的狀態指示燈
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Indicator {
    pub label: String,
    pub color: Option<IndicatorColor>,
    pub filter: FilterExpression,
}

impl Indicator {
    /// Renders the `[label, color, "field,op,value"]` triple list hosts expect.
    pub fn to_host_array(&self) -> serde_json::Value {
        serde_json::json!([
            self.label,
            self.color.map(|c| c.as_str()),
            self.filter.to_string()
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

impl Record {
    /// 狀態欄位的文字；數字等非字串值照原樣轉文字，缺欄位或 null 為 None
    pub fn status(&self) -> Option<Cow<'_, str>> {
        match self.data.get("status")? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            other => Some(Cow::Owned(value_text(other))),
        }
    }

    /// 欄位轉成顯示用文字；null 與缺欄位都是空字串
    pub fn field_text(&self, field: &str) -> String {
        self.data.get(field).map(value_text).unwrap_or_default()
    }
}

pub fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedRecord {
    /// 依 fields_to_fetch 順序排列的欄位
    pub fields: Vec<(String, serde_json::Value)>,
    pub indicator: Indicator,
}

impl AnnotatedRecord {
    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        for (name, value) in &self.fields {
            obj.insert(name.clone(), value.clone());
        }
        obj.insert("indicator".to_string(), self.indicator.to_host_array());
        serde_json::Value::Object(obj)
    }
}

#[derive(Debug, Clone)]
pub struct AnnotationResult {
    pub columns: Vec<String>,
    pub records: Vec<AnnotatedRecord>,
    pub settings_json: serde_json::Value,
}

use crate::utils::error::{ListViewError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> ListViewError {
    ListViewError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// 路徑只擋空字串與 NUL，存在與否交給實際讀寫時處理
pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    match path {
        "" => Err(invalid(field_name, path, "Path cannot be empty")),
        p if p.contains('\0') => Err(invalid(field_name, path, "Path contains null bytes")),
        _ => Ok(()),
    }
}

/// Input rows are picked by extension, so the file must carry one we can parse.
pub fn validate_input_file(field_name: &str, path: &str, extensions: &[&str]) -> Result<()> {
    validate_path(field_name, path)?;

    match Path::new(path).extension().and_then(|ext| ext.to_str()) {
        Some(ext) if extensions.contains(&ext) => Ok(()),
        Some(ext) => Err(invalid(
            field_name,
            path,
            format!(
                "Cannot read '.{}' rows. Supported: {}",
                ext,
                extensions.join(", ")
            ),
        )),
        None => Err(invalid(
            field_name,
            path,
            format!("Input needs one of these extensions: {}", extensions.join(", ")),
        )),
    }
}

pub fn validate_formats(field_name: &str, formats: &[String], allowed: &[&str]) -> Result<()> {
    if formats.is_empty() {
        return Err(ListViewError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    match formats.iter().find(|f| !allowed.contains(&f.as_str())) {
        Some(format) => Err(invalid(
            field_name,
            format,
            format!("Unsupported format. Valid formats: {}", allowed.join(", ")),
        )),
        None => Ok(()),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| ListViewError::MissingConfigError {
            field: field_name.to_string(),
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

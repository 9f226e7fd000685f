use crate::utils::error::{Result, SantaError};
use std::path::{Component, Path, PathBuf};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SantaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SantaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(SantaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// 去掉 `.` 與重複的分隔符號；不解析 `..` 或符號連結
fn lexical_path(path: &str) -> PathBuf {
    Path::new(path)
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

/// 輸入與輸出不可為同一檔案，否則寫入會覆蓋名單。
/// The comparison is lexical: `./a.csv` and `a.csv` match, `../dir/a.csv` does not.
pub fn validate_distinct_paths(field_name: &str, output: &str, inputs: &[&str]) -> Result<()> {
    let output_path = lexical_path(output);
    if inputs.iter().any(|input| lexical_path(input) == output_path) {
        return Err(SantaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: output.to_string(),
            reason: "Output path must differ from the participants file".to_string(),
        });
    }
    Ok(())
}

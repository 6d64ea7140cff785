use tokio::fs;
use tracing::debug;

use crate::error::{AppError, AppResult, LoadError};
use crate::models::article::{Article, Dataset, REQUIRED_COLUMNS};
use crate::utils::logging::log_dataset_loaded;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 读取 TSV 文件并转换为 Dataset
///
/// 失败时不产生任何部分结果，调用方原有的数据保持不变。
pub async fn load_tsv_dataset(path: &str) -> AppResult<Dataset> {
    if path.trim().is_empty() {
        return Err(LoadError::NoFileSelected.into());
    }

    let bytes = fs::read(path)
        .await
        .map_err(|e| AppError::load_unreadable(path, e))?;

    let dataset = parse_tsv(path, &bytes)?;
    log_dataset_loaded(path, dataset.len());
    Ok(dataset)
}

/// 解析 TSV 内容
///
/// 先按列名检查表头，缺列时一次性报告全部缺失的列名；多余的列忽略。
pub fn parse_tsv(path: &str, bytes: &[u8]) -> Result<Dataset, LoadError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| malformed(path, &e))?
        .clone();
    debug!("TSV 表头: {:?}", headers);

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns {
            path: path.to_string(),
            columns: missing,
        });
    }

    reader
        .deserialize::<Article>()
        .map(|row| row.map_err(|e| malformed(path, &e)))
        .collect()
}

fn malformed(path: &str, err: &csv::Error) -> LoadError {
    LoadError::Malformed {
        path: path.to_string(),
        line: err.position().map(|p| p.line()).unwrap_or(0),
        reason: err.to_string(),
    }
}

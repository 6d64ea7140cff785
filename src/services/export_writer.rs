//! 导出服务 - 业务能力层
//!
//! 只负责"把评分表写成 xlsx"能力，不关心流程

use std::io::Write;
use std::path::Path;

use rust_xlsxwriter::{Workbook, XlsxError};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{AppError, AppResult, WriteError};
use crate::models::Score;

/// 未填写评论时的占位文本
pub const NO_COMMENT: &str = "No comment";

/// 导出表的列名，顺序固定
pub const EXPORT_COLUMNS: [&str; 5] = ["Title", "Author", "Year", "Score", "Comments"];

/// 导出表中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRow {
    pub title: String,
    pub author: String,
    pub year: String,
    pub year_number: Option<i64>,
    /// 未打分时为 None，导出为空单元格
    pub score: Option<Score>,
    pub comment: String,
}

/// 按记录顺序排列的导出表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreSheet {
    pub rows: Vec<ScoreRow>,
}

impl ScoreSheet {
    pub fn scored_count(&self) -> usize {
        self.rows.iter().filter(|row| row.score.is_some()).count()
    }
}

/// xlsx 导出服务
pub struct ExportWriter {
    output_path: String,
}

impl ExportWriter {
    pub fn new(output_path: impl Into<String>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &str {
        &self.output_path
    }

    /// 写入评分表
    ///
    /// 工作簿先在内存中生成，写入同目录的临时文件后再改名替换目标，
    /// 写到一半失败时原有文件保持不变。
    pub fn write(&self, sheet: &ScoreSheet) -> AppResult<()> {
        self.check_extension()?;

        debug!(
            "生成工作簿: {} 行, 目标 {}",
            sheet.rows.len(),
            self.output_path
        );
        let buffer = self.render(sheet).map_err(|source| WriteError::Workbook {
            path: self.output_path.clone(),
            source,
        })?;

        self.persist(&buffer)
            .map_err(|e| AppError::write_failed(&self.output_path, e))?;

        info!(
            "💾 已导出 {} 行 (已打分 {}) 到 {}",
            sheet.rows.len(),
            sheet.scored_count(),
            self.output_path
        );
        Ok(())
    }

    fn persist(&self, buffer: &[u8]) -> std::io::Result<()> {
        let target = Path::new(&self.output_path);
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(buffer)?;
        staged.as_file().sync_all()?;
        staged.persist(target).map_err(|e| e.error)?;
        Ok(())
    }

    fn check_extension(&self) -> Result<(), WriteError> {
        let is_xlsx = Path::new(&self.output_path)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));

        if is_xlsx {
            Ok(())
        } else {
            Err(WriteError::UnsupportedExtension {
                path: self.output_path.clone(),
            })
        }
    }

    fn render(&self, sheet: &ScoreSheet) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col, name) in EXPORT_COLUMNS.iter().enumerate() {
            worksheet.write_string(0, col as u16, *name)?;
        }

        for (i, row) in sheet.rows.iter().enumerate() {
            let r = i as u32 + 1;
            worksheet.write_string(r, 0, &row.title)?;
            worksheet.write_string(r, 1, &row.author)?;
            match row.year_number {
                Some(year) => worksheet.write_number(r, 2, year as f64)?,
                None => worksheet.write_string(r, 2, &row.year)?,
            };
            if let Some(score) = row.score {
                worksheet.write_number(r, 3, f64::from(score.value()))?;
            }
            worksheet.write_string(r, 4, &row.comment)?;
        }

        workbook.save_to_buffer()
    }
}

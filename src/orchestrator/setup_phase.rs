//! 配置阶段
//!
//! `SetupForm` 保存配置屏上的全部输入，`run_setup` 在终端上逐项询问。

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AppError, AppResult, ValidationError};
use crate::models::{load_tsv_dataset, Dataset, RunConfig};
use crate::shell::TerminalShell;

/// 配置屏表单
#[derive(Debug)]
pub struct SetupForm {
    dataset: Option<Dataset>,
    source_path: Option<String>,
    record_count_input: String,
    review_all: bool,
    allow_comments: bool,
    enable_summary: bool,
    output_name: String,
}

impl SetupForm {
    pub fn new(config: &Config) -> Self {
        Self {
            dataset: None,
            source_path: None,
            record_count_input: config.default_record_count.to_string(),
            review_all: false,
            allow_comments: false,
            enable_summary: false,
            output_name: config.default_output_name.clone(),
        }
    }

    /// 加载数据源，成功后才能开始评审
    ///
    /// 失败时保留之前加载的数据。
    pub async fn load(&mut self, path: &str) -> AppResult<usize> {
        let path = path.trim();
        let dataset = load_tsv_dataset(path).await?;
        let total = dataset.len();
        self.dataset = Some(dataset);
        self.source_path = Some(path.to_string());
        Ok(total)
    }

    pub fn can_proceed(&self) -> bool {
        self.dataset.is_some()
    }

    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    /// 评审数量的上限：已加载数据的条数
    pub fn max_record_count(&self) -> Option<usize> {
        self.dataset.as_ref().map(Dataset::len)
    }

    pub fn record_count_input(&self) -> &str {
        &self.record_count_input
    }

    pub fn review_all(&self) -> bool {
        self.review_all
    }

    /// 开启后忽略手动输入的数量，关闭后恢复原来的输入
    pub fn toggle_all_records(&mut self, on: bool) {
        debug!("全部评审: {}", on);
        self.review_all = on;
    }

    pub fn set_record_count(&mut self, input: &str) -> AppResult<()> {
        if self.review_all {
            return Err(ValidationError::RecordCountLocked.into());
        }
        self.record_count_input = input.trim().to_string();
        Ok(())
    }

    pub fn set_allow_comments(&mut self, on: bool) {
        self.allow_comments = on;
    }

    pub fn set_enable_summary(&mut self, on: bool) {
        self.enable_summary = on;
    }

    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    pub fn set_output_name(&mut self, name: &str) {
        self.output_name = name.trim().to_string();
    }

    /// 校验表单并交出数据
    ///
    /// 成功时 Dataset 移出表单；失败时表单保持原样。
    pub fn proceed(&mut self) -> AppResult<(Dataset, RunConfig)> {
        let total = self
            .dataset
            .as_ref()
            .map(Dataset::len)
            .ok_or(ValidationError::NoDataset)?;
        if total == 0 {
            return Err(ValidationError::EmptyDataset.into());
        }

        let record_count = if self.review_all {
            total
        } else {
            self.resolve_record_count(total)?
        };

        if self.output_name.is_empty() {
            return Err(ValidationError::EmptyOutputName.into());
        }

        let run_config = RunConfig {
            record_count,
            allow_comments: self.allow_comments,
            enable_summary: self.enable_summary,
            output_path: self.output_name.clone(),
        };
        let dataset = self.dataset.take().ok_or(ValidationError::NoDataset)?;
        info!(
            "✓ 配置完成: 评审 {}/{} 条, 评论 {}, 摘要 {}, 输出 {}",
            record_count, total, run_config.allow_comments, run_config.enable_summary,
            run_config.output_path
        );
        Ok((dataset, run_config))
    }

    fn resolve_record_count(&self, total: usize) -> Result<usize, ValidationError> {
        let requested: i64 =
            self.record_count_input
                .parse()
                .map_err(|_| ValidationError::NotANumber {
                    input: self.record_count_input.clone(),
                })?;
        if requested < 1 || requested > total as i64 {
            return Err(ValidationError::RecordCountOutOfRange {
                requested,
                max: total,
            });
        }
        Ok(requested as usize)
    }
}

/// 在终端上完成配置阶段
///
/// 输入结束或用户选择退出时返回 None。
pub async fn run_setup<R: BufRead, W: Write>(
    shell: &mut TerminalShell<R, W>,
    mut form: SetupForm,
) -> AppResult<Option<(Dataset, RunConfig)>> {
    shell
        .show_title("Article Reviewer - Setup")
        .map_err(AppError::render_failed)?;

    loop {
        if !load_source(shell, &mut form).await? {
            return Ok(None);
        }

        if !collect_options(shell, &mut form)? {
            return Ok(None);
        }

        match form.proceed() {
            Ok(handoff) => return Ok(Some(handoff)),
            Err(e) => shell.error(&e).map_err(AppError::render_failed)?,
        }
    }
}

/// 询问数据源路径直到加载成功；已加载过时直接回车沿用
async fn load_source<R: BufRead, W: Write>(
    shell: &mut TerminalShell<R, W>,
    form: &mut SetupForm,
) -> AppResult<bool> {
    loop {
        let prompt = match form.source_path() {
            Some(path) => format!("Load TSV file [{path}] ('q' to quit): "),
            None => "Load TSV file ('q' to quit): ".to_string(),
        };
        let Some(path) = shell.read_line(&prompt).map_err(AppError::render_failed)? else {
            return Ok(false);
        };
        let path = path.trim();
        if path.eq_ignore_ascii_case("q") {
            return Ok(false);
        }
        if path.is_empty() && form.can_proceed() {
            return Ok(true);
        }

        match form.load(path).await {
            Ok(total) => {
                shell
                    .info(format!("Loaded {total} articles."))
                    .map_err(AppError::render_failed)?;
                return Ok(true);
            }
            Err(e) => shell.error(&e).map_err(AppError::render_failed)?,
        }
    }
}

fn collect_options<R: BufRead, W: Write>(
    shell: &mut TerminalShell<R, W>,
    form: &mut SetupForm,
) -> AppResult<bool> {
    let Some(all) = shell
        .ask_yes_no("Display all articles?", form.review_all())
        .map_err(AppError::render_failed)?
    else {
        return Ok(false);
    };
    form.toggle_all_records(all);

    if !all {
        let max = form.max_record_count().unwrap_or(0);
        let prompt = format!(
            "Number of articles to display (1-{max}) [{}]: ",
            form.record_count_input()
        );
        let Some(count) = shell.read_line(&prompt).map_err(AppError::render_failed)? else {
            return Ok(false);
        };
        if !count.trim().is_empty() {
            form.set_record_count(&count)?;
        }
    }

    let Some(comments) = shell
        .ask_yes_no("Allow comments?", false)
        .map_err(AppError::render_failed)?
    else {
        return Ok(false);
    };
    form.set_allow_comments(comments);

    let Some(summary) = shell
        .ask_yes_no("Activate summarization?", false)
        .map_err(AppError::render_failed)?
    else {
        return Ok(false);
    };
    form.set_enable_summary(summary);

    let prompt = format!("Output file name [{}]: ", form.output_name());
    let Some(name) = shell.read_line(&prompt).map_err(AppError::render_failed)? else {
        return Ok(false);
    };
    if !name.trim().is_empty() {
        form.set_output_name(&name);
    }

    Ok(true)
}

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::config::Config;
use crate::error::AppResult;
use crate::orchestrator::review_phase::{run_review, ReviewOutcome};
use crate::orchestrator::setup_phase::{run_setup, SetupForm};
use crate::services::{LlmSummarizer, Summarizer};
use crate::shell::TerminalShell;
use crate::utils::logging::{log_review_start, log_startup};
use crate::workflow::ReviewEngine;

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Self {
        log_startup(&config.llm_model_name);
        Self { config }
    }

    /// 在标准输入输出上运行
    pub async fn run(&self) -> AppResult<Option<ReviewOutcome>> {
        let summarizer = LlmSummarizer::new(&self.config);
        debug!("摘要服务就绪，模型: {}", summarizer.model_name());
        let stdin = io::stdin();
        let mut shell = TerminalShell::new(stdin.lock(), io::stdout());
        self.run_with(&mut shell, &summarizer).await
    }

    /// 配置阶段 → 评审阶段
    ///
    /// 用户在配置阶段退出时返回 None。
    pub async fn run_with<R, W, S>(
        &self,
        shell: &mut TerminalShell<R, W>,
        summarizer: &S,
    ) -> AppResult<Option<ReviewOutcome>>
    where
        R: BufRead,
        W: Write,
        S: Summarizer,
    {
        let form = SetupForm::new(&self.config);
        let Some((dataset, run_config)) = run_setup(shell, form).await? else {
            info!("未开始评审，程序结束");
            return Ok(None);
        };

        log_review_start(run_config.record_count, dataset.len());
        let engine = ReviewEngine::new(dataset, run_config)?;
        run_review(engine, summarizer, shell).await.map(Some)
    }
}

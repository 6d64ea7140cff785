//! # Article Reviewer
//!
//! 逐条人工评审文献记录（标题 / 作者 / 年份 / 摘要），
//! 可选自动生成摘要、填写评论，最后把评分导出为 xlsx。
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - `Article` / `Dataset` / `Score` / `RunConfig`
//! - `loaders::tsv_loader` - 读取 TSV 数据源
//!
//! ### ② 业务能力层（Services）
//! - `Summarizer` - 摘要能力（trait），`LlmSummarizer` 为 LLM 实现
//! - `ExportWriter` - 写 xlsx 能力
//!
//! ### ③ 流程层（Workflow）
//! - `ReviewEngine` - 光标 + 评分表 + 评论表，所有修改的唯一入口
//!
//! ### ④ 展示层（Shell）
//! - `TerminalShell` - 终端上的配置屏和评审屏
//!
//! ### ⑤ 编排层（Orchestration）
//! - `setup_phase` → `review_phase`，由 `App` 串联
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod shell;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Article, Dataset, RunConfig, Score};
pub use orchestrator::{App, ReviewOutcome, SetupForm};
pub use services::{ExportWriter, LlmSummarizer, Summarizer};
pub use workflow::{RenderOutcome, ReviewEngine};

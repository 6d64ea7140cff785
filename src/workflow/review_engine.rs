//! 评审引擎 - 流程层
//!
//! 核心职责：维护"当前看到第几条"的光标，以及每条记录的评分和评论。
//!
//! 状态只有两个：
//! - `Reviewing`：0 <= cursor < record_count
//! - `Complete`：已走完或被强制结束，下一步就是导出
//!
//! 所有修改都通过这里的方法完成，shell 只读取渲染结果。

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::error::{AppResult, RangeError, RenderError, ValidationError};
use crate::models::{Dataset, RunConfig, Score};
use crate::services::{ScoreRow, ScoreSheet, Summarizer, NO_COMMENT};
use crate::utils::truncate_text;
use crate::workflow::record_view::{RecordView, RenderOutcome, SummaryView};

/// 评审状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    Reviewing,
    Complete,
}

/// 评审引擎
pub struct ReviewEngine {
    dataset: Dataset,
    config: RunConfig,
    cursor: usize,
    state: ReviewState,
    scores: BTreeMap<usize, Score>,
    /// 按记录下标保存，跳转后重新打分也能对上号
    comments: BTreeMap<usize, String>,
    comment_buffer: String,
}

impl ReviewEngine {
    /// 创建评审引擎，光标从第一条开始
    pub fn new(dataset: Dataset, config: RunConfig) -> AppResult<Self> {
        if config.record_count == 0 || config.record_count > dataset.len() {
            return Err(ValidationError::RecordCountOutOfRange {
                requested: config.record_count as i64,
                max: dataset.len(),
            }
            .into());
        }

        Ok(Self {
            dataset,
            config,
            cursor: 0,
            state: ReviewState::Reviewing,
            scores: BTreeMap::new(),
            comments: BTreeMap::new(),
            comment_buffer: String::new(),
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> ReviewState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == ReviewState::Complete
    }

    /// 已打分数量 / 本次评审总数
    pub fn progress(&self) -> (usize, usize) {
        (self.scores.len(), self.config.record_count)
    }

    pub fn score_at(&self, index: usize) -> Option<Score> {
        self.scores.get(&index).copied()
    }

    pub fn comment_buffer(&self) -> &str {
        &self.comment_buffer
    }

    /// 填写评论框，打分时一并提交
    pub fn set_comment(&mut self, text: &str) -> AppResult<()> {
        if !self.config.allow_comments {
            return Err(ValidationError::CommentsDisabled.into());
        }
        self.comment_buffer = text.to_string();
        Ok(())
    }

    /// 渲染当前记录
    ///
    /// 开启摘要时会等待摘要生成完毕再返回。摘要失败不影响评审，
    /// 只在结果里标记为不可用。光标走到末尾时切换到 `Complete`。
    pub async fn render_current<S: Summarizer>(
        &mut self,
        summarizer: &S,
    ) -> AppResult<RenderOutcome> {
        if self.is_complete() || self.cursor >= self.config.record_count {
            self.state = ReviewState::Complete;
            return Ok(RenderOutcome::Complete);
        }

        let article = self
            .dataset
            .get(self.cursor)
            .ok_or(RenderError::MissingRecord { index: self.cursor })?;

        let summary = if self.config.enable_summary {
            match summarizer.summarize(&article.abstract_text).await {
                Ok(text) => SummaryView::Ready(text),
                Err(e) => {
                    warn!("⚠️ 第 {} 条摘要生成失败: {}", self.cursor + 1, e);
                    SummaryView::Unavailable(e.to_string())
                }
            }
        } else {
            SummaryView::Disabled
        };

        debug!(
            "渲染第 {}/{} 条: {}",
            self.cursor + 1,
            self.config.record_count,
            truncate_text(&article.title, 50)
        );

        Ok(RenderOutcome::Record(RecordView {
            position: self.cursor + 1,
            record_count: self.config.record_count,
            scored_count: self.scores.len(),
            title: article.title.clone(),
            authors: article.authors.clone(),
            year: article.year.clone(),
            abstract_text: article.abstract_text.clone(),
            summary,
            previous_score: self.score_at(self.cursor),
        }))
    }

    /// 给当前记录打分并前进一条
    ///
    /// 开启评论时，评论框内容随分数一起保存（空白保存为 "No comment"），
    /// 然后清空评论框。
    pub fn submit_score(&mut self, score: Score) -> AppResult<()> {
        if self.is_complete() || self.cursor >= self.config.record_count {
            return Err(ValidationError::ReviewFinished.into());
        }

        let index = self.cursor;
        if let Some(previous) = self.scores.insert(index, score) {
            info!("第 {} 条重新打分: {} → {}", index + 1, previous, score);
        } else {
            info!("第 {} 条打分: {}", index + 1, score);
        }

        if self.config.allow_comments {
            let comment = std::mem::take(&mut self.comment_buffer);
            let comment = if comment.trim().is_empty() {
                NO_COMMENT.to_string()
            } else {
                comment
            };
            self.comments.insert(index, comment);
        }

        self.cursor += 1;
        Ok(())
    }

    /// 跳转到指定记录
    ///
    /// `record_number` 从 1 开始。越界时光标保持不变。
    pub fn jump_to(&mut self, record_number: i64) -> AppResult<()> {
        if self.is_complete() {
            return Err(ValidationError::ReviewFinished.into());
        }

        let Some(index) = record_number
            .checked_sub(1)
            .and_then(|i| usize::try_from(i).ok())
            .filter(|i| *i < self.config.record_count)
        else {
            warn!("跳转目标 {} 超出范围", record_number);
            return Err(RangeError {
                requested: record_number,
                record_count: self.config.record_count,
            }
            .into());
        };

        info!("跳转: 第 {} 条 → 第 {} 条", self.cursor + 1, record_number);
        self.cursor = index;
        Ok(())
    }

    /// 立即结束评审，剩余记录保持未打分
    pub fn finish_now(&mut self) {
        if !self.is_complete() {
            let (scored, total) = self.progress();
            info!("⏹ 提前结束评审，已打分 {}/{}", scored, total);
        }
        self.state = ReviewState::Complete;
    }

    /// 生成导出表：前 record_count 条记录，按下标排列
    pub fn score_sheet(&self) -> ScoreSheet {
        let rows = self
            .dataset
            .articles()
            .iter()
            .take(self.config.record_count)
            .enumerate()
            .map(|(i, article)| ScoreRow {
                title: article.title.clone(),
                author: article.authors.clone(),
                year: article.year.clone(),
                year_number: article.year_number(),
                score: self.score_at(i),
                comment: self
                    .comments
                    .get(&i)
                    .cloned()
                    .unwrap_or_else(|| NO_COMMENT.to_string()),
            })
            .collect();

        ScoreSheet { rows }
    }
}

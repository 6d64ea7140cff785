//! 渲染结果
//!
//! 评审引擎只产出数据，如何显示交给 shell。

use std::fmt::Display;

use crate::models::Score;

/// 摘要区域的内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryView {
    /// 未开启摘要
    Disabled,
    /// 摘要生成成功
    Ready(String),
    /// 摘要生成失败，评审继续
    Unavailable(String),
}

/// 当前记录的显示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordView {
    /// 记录编号（从1开始）
    pub position: usize,
    pub record_count: usize,
    /// 已打分的记录数
    pub scored_count: usize,
    pub title: String,
    pub authors: String,
    pub year: String,
    pub abstract_text: String,
    pub summary: SummaryView,
    /// 之前给过的评分（跳转回看时显示）
    pub previous_score: Option<Score>,
}

impl Display for RecordView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Article: {}/{}", self.position, self.record_count)
    }
}

/// 一次渲染的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// 显示当前记录
    Record(RecordView),
    /// 所有记录都已走完，应当导出
    Complete,
}

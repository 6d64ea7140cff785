//! 摘要能力
//!
//! 评审流程只依赖这个 trait，不关心背后是哪个模型。

use anyhow::Result;

/// 文本摘要：长文本进，短文本出
///
/// 实现应当是确定性的：同一段文本多次调用返回同样的摘要。
#[allow(async_fn_in_trait)]
pub trait Summarizer {
    async fn summarize(&self, text: &str) -> Result<String>;
}

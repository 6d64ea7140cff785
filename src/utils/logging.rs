//! 日志工具模块
//!
//! 提供日志格式化和输出的辅助函数

use tracing::info;

/// 记录程序启动信息
///
/// # 参数
/// - `model_name`: 摘要模型名称
pub fn log_startup(model_name: &str) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 文献评审工具启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🤖 摘要模型: {}", model_name);
    info!("{}", "=".repeat(60));
}

/// 记录数据集加载信息
///
/// # 参数
/// - `path`: 数据文件路径
/// - `total`: 记录总数
pub fn log_dataset_loaded(path: &str, total: usize) {
    info!("✓ 已加载 {} 条文献记录: {}", total, path);
}

/// 记录评审开始信息
///
/// # 参数
/// - `record_count`: 本次评审数量
/// - `total`: 数据集记录总数
pub fn log_review_start(record_count: usize, total: usize) {
    info!("\n{}", "─".repeat(60));
    info!("📋 开始评审: {}/{} 条记录", record_count, total);
    info!("{}", "─".repeat(60));
}

/// 打印评审完成统计
///
/// # 参数
/// - `scored`: 已打分数量
/// - `total`: 本次评审数量
/// - `output_path`: 导出文件路径
pub fn log_review_complete(scored: usize, total: usize, output_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 评审完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 已打分: {}/{}", scored, total);
    info!("💾 结果已保存至: {}", output_path);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("短文本", 10), "短文本");
        assert_eq!(truncate_text("Deep learning for cats", 4), "Deep...");
        assert_eq!(truncate_text("éèêë", 2), "éè...");
    }
}

/// 一次评审的运行参数
///
/// 由配置界面生成，进入评审阶段后不再修改。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// 评审的记录数，不超过数据集大小
    pub record_count: usize,
    /// 是否允许填写评论
    pub allow_comments: bool,
    /// 是否生成摘要
    pub enable_summary: bool,
    /// 导出文件路径
    pub output_path: String,
}

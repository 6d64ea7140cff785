//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `setup_phase` - 配置阶段
//! - 加载 TSV 数据源
//! - 收集评审数量、评论 / 摘要开关、输出文件名
//! - 校验通过后把 Dataset 和 RunConfig 交给评审阶段
//!
//! ### `review_phase` - 评审阶段
//! - 驱动 `ReviewEngine`：渲染 → 读命令 → 打分 / 跳转 / 换字体
//! - 渲染出错时尽力保存：强制结束并导出已有结果
//! - 导出失败时让用户换一个文件名
//!
//! ## 层次关系
//!
//! ```text
//! app (两个阶段串联)
//!     ↓
//! setup_phase → review_phase
//!     ↓
//! workflow::ReviewEngine
//!     ↓
//! services (summarizer / export)
//! ```

pub mod app;
pub mod review_phase;
pub mod setup_phase;

pub use app::App;
pub use review_phase::{run_review, ReviewOutcome};
pub use setup_phase::{run_setup, SetupForm};

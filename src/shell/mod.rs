//! 展示层（Presentation Shell）
//!
//! 终端上的两屏界面：配置屏和评审屏。这一层不持有评审状态，
//! 只负责读入用户输入、画出引擎给的 `RecordView`。

pub mod command;
pub mod display;
pub mod terminal;

pub use command::ReviewCommand;
pub use display::{DisplayRegion, DisplayRegistry, FontFamily};
pub use terminal::TerminalShell;

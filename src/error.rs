use thiserror::Error;

/// 应用程序错误类型
///
/// 每一类错误都在发生的边界被捕获并展示给用户，不会让进程崩溃。
/// 只有 `Render` 会额外触发"强制结束并导出"。
#[derive(Debug, Error)]
pub enum AppError {
    /// 数据源加载错误
    #[error(transparent)]
    Load(#[from] LoadError),
    /// 输入校验错误
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// 跳转越界
    #[error(transparent)]
    Range(#[from] RangeError),
    /// 渲染记录时出错
    #[error(transparent)]
    Render(#[from] RenderError),
    /// 导出写入错误
    #[error(transparent)]
    Write(#[from] WriteError),
    /// 配置错误
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AppError {
    /// 该错误是否需要"尽力保存"：强制结束评审并导出已收集的结果
    pub fn is_salvage_trigger(&self) -> bool {
        matches!(self, AppError::Render(_))
    }

    /// 创建文件读取错误
    pub fn load_unreadable(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Load(LoadError::Unreadable {
            path: path.into(),
            source,
        })
    }

    /// 创建导出写入错误
    pub fn write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Write(WriteError::Io {
            path: path.into(),
            source,
        })
    }

    /// 创建渲染错误
    pub fn render_failed(source: std::io::Error) -> Self {
        AppError::Render(RenderError::Display { source })
    }
}

/// 数据源加载错误
#[derive(Debug, Error)]
pub enum LoadError {
    /// 未选择文件
    #[error("No file selected.")]
    NoFileSelected,
    /// 文件无法读取
    #[error("Cannot read {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 缺少必需的列
    #[error("{path} is missing required column(s): {}", .columns.join(", "))]
    MissingColumns { path: String, columns: Vec<String> },
    /// 行格式错误
    #[error("{path} is malformed at line {line}: {reason}")]
    Malformed {
        path: String,
        line: u64,
        reason: String,
    },
}

/// 输入校验错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// 尚未加载数据
    #[error("Load a TSV file before starting.")]
    NoDataset,
    /// 数据集没有任何记录
    #[error("The loaded file contains no articles.")]
    EmptyDataset,
    /// 数量不是整数
    #[error("'{input}' is not a number.")]
    NotANumber { input: String },
    /// 数量超出范围
    #[error("Please enter a valid number of articles to display (1-{max}).")]
    RecordCountOutOfRange { requested: i64, max: usize },
    /// "全部评审"开启时不能手动输入数量
    #[error("The article count is locked while 'Display all articles' is on.")]
    RecordCountLocked,
    /// 输出文件名为空
    #[error("Enter an output file name.")]
    EmptyOutputName,
    /// 未开启评论
    #[error("Comments are not enabled for this review.")]
    CommentsDisabled,
    /// 评审已经结束
    #[error("All articles have been reviewed.")]
    ReviewFinished,
    /// 无法识别的命令
    #[error("Unknown command '{input}'. Type 'help' for the list of commands.")]
    UnknownCommand { input: String },
    /// 无法识别的字体
    #[error("Unknown font '{name}'.")]
    UnknownFont { name: String },
}

/// 跳转越界错误
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid article number {requested}: choose 1-{record_count}.")]
pub struct RangeError {
    /// 用户输入的编号（从1开始）
    pub requested: i64,
    /// 本次评审的记录数
    pub record_count: usize,
}

/// 渲染错误
#[derive(Debug, Error)]
pub enum RenderError {
    /// 光标指向的记录不存在
    #[error("Article {index} is not in the loaded data.")]
    MissingRecord { index: usize },
    /// 输出到终端失败
    #[error("Cannot draw the review screen: {source}")]
    Display {
        #[source]
        source: std::io::Error,
    },
}

/// 导出写入错误
#[derive(Debug, Error)]
pub enum WriteError {
    /// 不支持的扩展名
    #[error("'{path}' must end with .xlsx")]
    UnsupportedExtension { path: String },
    /// 工作簿生成失败
    #[error("Cannot build workbook for {path}: {source}")]
    Workbook {
        path: String,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
    /// 文件写入失败
    #[error("Cannot write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("Cannot read config file {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 配置文件解析失败
    #[error("Cannot parse config file {path}: {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 环境变量解析失败
    #[error("Environment variable {var_name}='{value}' is not a valid {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

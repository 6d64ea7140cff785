use std::path::Path;

use serde::Deserialize;

use crate::error::{AppResult, ConfigError};

/// 默认配置文件名
pub const CONFIG_FILE_NAME: &str = "article_reviewer.toml";

/// 程序配置
///
/// 这里只放运行环境相关的设置（日志、摘要模型、表单默认值）。
/// 每次评审的选项由配置界面收集，见 `RunConfig`。
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出文件名默认值
    pub default_output_name: String,
    /// 评审数量默认值
    pub default_record_count: i64,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 摘要最大 token 数
    pub summary_max_tokens: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose_logging: false,
            default_output_name: "scores.xlsx".to_string(),
            default_record_count: 10,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
            summary_max_tokens: 150,
        }
    }
}

impl Config {
    /// 加载配置：配置文件（可选） + 环境变量覆盖
    pub fn load() -> AppResult<Self> {
        let path = std::env::var("ARTICLE_REVIEWER_CONFIG")
            .unwrap_or_else(|_| CONFIG_FILE_NAME.to_string());
        let base = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        base.with_env_overrides(|name| std::env::var(name).ok())
    }

    /// 从 TOML 文件读取，未写的字段取默认值
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(path, &content)
    }

    fn from_toml_str(path: &str, content: &str) -> AppResult<Self> {
        let config = toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.to_string(),
            source,
        })?;
        Ok(config)
    }

    /// 用环境变量覆盖已有配置
    ///
    /// `lookup` 参数便于测试时注入变量表。
    pub fn with_env_overrides(self, lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        Ok(Self {
            verbose_logging: parse_var(&lookup, "VERBOSE_LOGGING", "bool")?
                .unwrap_or(self.verbose_logging),
            default_output_name: lookup("DEFAULT_OUTPUT_NAME").unwrap_or(self.default_output_name),
            default_record_count: parse_var(&lookup, "DEFAULT_RECORD_COUNT", "integer")?
                .unwrap_or(self.default_record_count),
            llm_api_key: lookup("LLM_API_KEY").unwrap_or(self.llm_api_key),
            llm_api_base_url: lookup("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: lookup("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            summary_max_tokens: parse_var(&lookup, "SUMMARY_MAX_TOKENS", "integer")?
                .unwrap_or(self.summary_max_tokens),
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var_name: &str,
    expected_type: &str,
) -> AppResult<Option<T>> {
    match lookup(var_name) {
        None => Ok(None),
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()),
        },
    }
}

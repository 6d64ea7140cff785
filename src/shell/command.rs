use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::models::Score;
use crate::shell::display::FontFamily;

/// 评审屏上的一条用户命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewCommand {
    /// 打分（0-3）
    Score(Score),
    /// 填写评论框
    Comment(String),
    /// 跳转到第 n 条（从1开始）
    Goto(i64),
    /// 列出可选字体
    ListFonts,
    /// 换字体
    Font(FontFamily),
    /// 结束并导出
    Finish,
    Help,
    /// 空行
    Nothing,
}

fn command_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)^\s*([a-z]+)(?:\s+(.*?))?\s*$").expect("command pattern is valid")
    })
}

impl ReviewCommand {
    /// 解析一行输入
    pub fn parse(line: &str) -> Result<Self, ValidationError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(ReviewCommand::Nothing);
        }

        if let Ok(value) = trimmed.parse::<u8>() {
            return Score::from_value(value)
                .map(ReviewCommand::Score)
                .ok_or_else(|| unknown(trimmed));
        }

        let caps = command_re().captures(trimmed).ok_or_else(|| unknown(trimmed))?;
        let verb = caps[1].to_ascii_lowercase();
        let arg = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        match verb.as_str() {
            "c" | "comment" => Ok(ReviewCommand::Comment(arg.to_string())),
            "g" | "goto" => arg
                .parse()
                .map(ReviewCommand::Goto)
                .map_err(|_| ValidationError::NotANumber {
                    input: arg.to_string(),
                }),
            "font" if arg.is_empty() => Ok(ReviewCommand::ListFonts),
            "font" => arg.parse().map(ReviewCommand::Font),
            "finish" | "q" | "quit" => Ok(ReviewCommand::Finish),
            "help" | "h" => Ok(ReviewCommand::Help),
            _ => Err(unknown(trimmed)),
        }
    }
}

fn unknown(input: &str) -> ValidationError {
    ValidationError::UnknownCommand {
        input: input.to_string(),
    }
}

//! 终端界面
//!
//! 对任意 `BufRead` / `Write` 组合工作，测试时可以用内存缓冲区代替标准输入输出。

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use crate::shell::display::{DisplayRegion, DisplayRegistry, FontFamily};
use crate::workflow::{RecordView, SummaryView};

const WRAP_WIDTH: usize = 78;
const INDENT: &str = "  ";

/// 终端界面
pub struct TerminalShell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalShell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// 读取一行，输入结束时返回 None
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// 询问是/否，直接回车取默认值
    pub fn ask_yes_no(&mut self, question: &str, default: bool) -> io::Result<Option<bool>> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            let Some(answer) = self.read_line(&format!("{question} {hint}: "))? else {
                return Ok(None);
            };
            match answer.trim().to_ascii_lowercase().as_str() {
                "" => return Ok(Some(default)),
                "y" | "yes" => return Ok(Some(true)),
                "n" | "no" => return Ok(Some(false)),
                _ => writeln!(self.output, "Please answer 'y' or 'n'.")?,
            }
        }
    }

    pub fn info(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    pub fn error(&mut self, err: impl Display) -> io::Result<()> {
        writeln!(self.output, "Error: {err}")
    }

    pub fn show_title(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.output, "\n{}", "=".repeat(WRAP_WIDTH))?;
        writeln!(self.output, "{title}")?;
        writeln!(self.output, "{}", "=".repeat(WRAP_WIDTH))
    }

    /// 按登记表画出一条记录
    pub fn show_record(
        &mut self,
        view: &RecordView,
        registry: &DisplayRegistry,
        comment_buffer: &str,
    ) -> io::Result<()> {
        let font = registry
            .style_of(DisplayRegion::Counter)
            .map(|style| format!("{} {}", style.font, style.size))
            .unwrap_or_default();
        writeln!(self.output, "\n{}", "=".repeat(WRAP_WIDTH))?;
        writeln!(
            self.output,
            "{view}    scored {}/{}    [{font}]",
            view.scored_count, view.record_count
        )?;
        if let Some(score) = view.previous_score {
            writeln!(self.output, "(already scored: {score})")?;
        }
        writeln!(self.output, "{}", "-".repeat(WRAP_WIDTH))?;

        for style in registry.regions() {
            match style.region {
                DisplayRegion::Counter => {}
                DisplayRegion::Title => self.field(style.region, &view.title)?,
                DisplayRegion::Author => self.field(style.region, &view.authors)?,
                DisplayRegion::Year => self.field(style.region, &view.year)?,
                DisplayRegion::Abstract => self.field(style.region, &view.abstract_text)?,
                DisplayRegion::Summary => match &view.summary {
                    SummaryView::Ready(text) => self.field(style.region, text)?,
                    SummaryView::Unavailable(reason) => self.field(
                        style.region,
                        &format!("(summary unavailable: {reason})"),
                    )?,
                    SummaryView::Disabled => {}
                },
                DisplayRegion::ScoreActions => {
                    writeln!(self.output, "Score: [0] [1] [2] [3]")?;
                }
                DisplayRegion::CommentBox => {
                    let shown = if comment_buffer.is_empty() {
                        "(empty, use: c <text>)"
                    } else {
                        comment_buffer
                    };
                    writeln!(self.output, "Comments: {shown}")?;
                }
                DisplayRegion::Finish => writeln!(self.output, "Finish: type 'finish'")?,
                DisplayRegion::Instructions => writeln!(
                    self.output,
                    "Press 0, 1, 2 or 3 to score an article, and 'finish' when done. Type 'help' for more."
                )?,
            }
        }
        self.output.flush()
    }

    pub fn show_help(&mut self, allow_comments: bool) -> io::Result<()> {
        writeln!(self.output, "Commands:")?;
        writeln!(self.output, "  0 | 1 | 2 | 3     score the current article")?;
        if allow_comments {
            writeln!(self.output, "  c <text>          write the comment saved with the next score")?;
        }
        writeln!(self.output, "  g <n>             go to article n")?;
        writeln!(self.output, "  font [name]       list fonts or change the display font")?;
        writeln!(self.output, "  finish            stop and export the scores")
    }

    pub fn show_fonts(&mut self, current: FontFamily) -> io::Result<()> {
        writeln!(self.output, "Fonts:")?;
        for (i, font) in FontFamily::ALL.iter().enumerate() {
            let marker = if *font == current { " *" } else { "" };
            writeln!(self.output, "  {}. {}{}", i + 1, font, marker)?;
        }
        Ok(())
    }

    fn field(&mut self, region: DisplayRegion, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}:", region.heading())?;
        for line in wrap(text, WRAP_WIDTH - INDENT.len()) {
            writeln!(self.output, "{INDENT}{line}")?;
        }
        Ok(())
    }
}

/// 按单词折行
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn shell(input: &str) -> TerminalShell<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalShell::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn view(summary: SummaryView) -> RecordView {
        RecordView {
            position: 2,
            record_count: 5,
            scored_count: 1,
            title: "Cats and sleep".to_string(),
            authors: "Smith, J.".to_string(),
            year: "2019".to_string(),
            abstract_text: "A long abstract.".to_string(),
            summary,
            previous_score: None,
        }
    }

    #[test]
    fn test_read_line_and_eof() {
        let mut shell = shell("hello\r\n");
        assert_eq!(shell.read_line("> ").unwrap(), Some("hello".to_string()));
        assert_eq!(shell.read_line("> ").unwrap(), None);
    }

    #[test]
    fn test_yes_no_reasks_on_garbage() {
        let mut shell = shell("maybe\nY\n\n");
        assert_eq!(shell.ask_yes_no("Allow comments?", false).unwrap(), Some(true));
        assert_eq!(shell.ask_yes_no("Allow comments?", false).unwrap(), Some(false));
        let out = String::from_utf8(shell.into_output()).unwrap();
        assert!(out.contains("Please answer 'y' or 'n'."));
    }

    #[test]
    fn test_record_shows_only_registered_regions() {
        let mut shell = shell("");
        let registry = DisplayRegistry::for_review(false, false);
        shell
            .show_record(&view(SummaryView::Disabled), &registry, "")
            .unwrap();

        let out = String::from_utf8(shell.into_output()).unwrap();
        assert!(out.contains("Article: 2/5    scored 1/5    [Helvetica 18]"));
        assert!(out.contains("Title:\n  Cats and sleep"));
        assert!(!out.contains("Summary:"));
        assert!(!out.contains("Comments:"));
    }

    #[test]
    fn test_record_shows_summary_and_font_change() {
        let mut shell = shell("");
        let mut registry = DisplayRegistry::for_review(true, true);
        registry.apply_font(FontFamily::Verdana);
        shell
            .show_record(
                &view(SummaryView::Ready("Cats sleep.".to_string())),
                &registry,
                "draft note",
            )
            .unwrap();

        let out = String::from_utf8(shell.into_output()).unwrap();
        assert!(out.contains("[Verdana 18]"));
        assert!(out.contains("Summary:\n  Cats sleep."));
        assert!(out.contains("Comments: draft note"));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("", 10), vec![""]);
        assert_eq!(wrap("aaa bbb ccc", 7), vec!["aaa bbb", "ccc"]);
    }
}

//! 评审阶段
//!
//! 流程：渲染当前记录 → 读命令 → 打分 / 跳转后重新渲染 → 走完或结束后导出。
//! 渲染出错时不丢弃已做的工作，强制结束并导出。

use std::io::{BufRead, Write};

use tracing::{debug, error, info, warn};

use crate::error::{AppError, AppResult};
use crate::services::{ExportWriter, ScoreSheet, Summarizer};
use crate::shell::{DisplayRegion, DisplayRegistry, FontFamily, ReviewCommand, TerminalShell};
use crate::utils::logging::log_review_complete;
use crate::workflow::{RecordView, RenderOutcome, ReviewEngine};

/// 评审阶段的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub sheet: ScoreSheet,
    /// 实际保存的位置；用户放弃保存时为 None
    pub saved_to: Option<String>,
}

/// 命令处理后的下一步
enum Next {
    /// 重新渲染（可能触发完成）
    Render,
    /// 继续等待命令
    Stay,
    /// 结束评审
    Stop,
}

/// 运行评审阶段直到导出
pub async fn run_review<S, R, W>(
    mut engine: ReviewEngine,
    summarizer: &S,
    shell: &mut TerminalShell<R, W>,
) -> AppResult<ReviewOutcome>
where
    S: Summarizer,
    R: BufRead,
    W: Write,
{
    let mut registry =
        DisplayRegistry::for_review(engine.config().allow_comments, engine.config().enable_summary);

    'review: loop {
        let view = match render(&mut engine, summarizer, shell, &registry).await {
            Ok(Some(view)) => view,
            Ok(None) => {
                if let Err(e) = shell.info("All articles have been reviewed.") {
                    warn!("终端输出失败: {}", e);
                }
                break 'review;
            }
            Err(e) => {
                salvage(&mut engine, shell, &e);
                break 'review;
            }
        };

        loop {
            let line = match shell.read_line("> ") {
                Ok(Some(line)) => line,
                Ok(None) => {
                    info!("输入结束，保存已有结果");
                    engine.finish_now();
                    break 'review;
                }
                Err(e) => {
                    salvage(&mut engine, shell, &AppError::render_failed(e));
                    break 'review;
                }
            };

            let next = match handle_line(&line, &mut engine, shell, &mut registry, &view) {
                Ok(next) => next,
                Err(e) if e.is_salvage_trigger() => {
                    salvage(&mut engine, shell, &e);
                    break 'review;
                }
                Err(e) => match shell.error(&e) {
                    Ok(()) => Next::Stay,
                    Err(io_err) => {
                        salvage(&mut engine, shell, &AppError::render_failed(io_err));
                        break 'review;
                    }
                },
            };

            match next {
                Next::Render => continue 'review,
                Next::Stay => {}
                Next::Stop => break 'review,
            }
        }
    }

    export(&engine, shell)
}

/// 渲染并显示当前记录；评审已完成时返回 None
async fn render<S: Summarizer, R: BufRead, W: Write>(
    engine: &mut ReviewEngine,
    summarizer: &S,
    shell: &mut TerminalShell<R, W>,
    registry: &DisplayRegistry,
) -> AppResult<Option<RecordView>> {
    match engine.render_current(summarizer).await? {
        RenderOutcome::Complete => Ok(None),
        RenderOutcome::Record(view) => {
            shell
                .show_record(&view, registry, engine.comment_buffer())
                .map_err(AppError::render_failed)?;
            Ok(Some(view))
        }
    }
}

fn handle_line<R: BufRead, W: Write>(
    line: &str,
    engine: &mut ReviewEngine,
    shell: &mut TerminalShell<R, W>,
    registry: &mut DisplayRegistry,
    view: &RecordView,
) -> AppResult<Next> {
    match ReviewCommand::parse(line)? {
        ReviewCommand::Score(score) => {
            engine.submit_score(score)?;
            Ok(Next::Render)
        }
        ReviewCommand::Comment(text) => {
            engine.set_comment(&text)?;
            shell
                .info("Comment saved; it is stored with the next score.")
                .map_err(AppError::render_failed)?;
            Ok(Next::Stay)
        }
        ReviewCommand::Goto(record_number) => {
            engine.jump_to(record_number)?;
            Ok(Next::Render)
        }
        ReviewCommand::ListFonts => {
            let current = registry
                .style_of(DisplayRegion::Counter)
                .map(|style| style.font)
                .unwrap_or_default();
            shell.show_fonts(current).map_err(AppError::render_failed)?;
            Ok(Next::Stay)
        }
        ReviewCommand::Font(font) => {
            apply_font(registry, font);
            // 换字体只重画当前屏，不重新生成摘要
            shell
                .show_record(view, registry, engine.comment_buffer())
                .map_err(AppError::render_failed)?;
            Ok(Next::Stay)
        }
        ReviewCommand::Finish => {
            engine.finish_now();
            Ok(Next::Stop)
        }
        ReviewCommand::Help => {
            shell
                .show_help(engine.config().allow_comments)
                .map_err(AppError::render_failed)?;
            Ok(Next::Stay)
        }
        ReviewCommand::Nothing => Ok(Next::Stay),
    }
}

fn apply_font(registry: &mut DisplayRegistry, font: FontFamily) {
    info!("字体切换为 {}", font);
    registry.apply_font(font);
}

/// 出错时尽力保存：报告错误并强制结束
fn salvage<R: BufRead, W: Write>(
    engine: &mut ReviewEngine,
    shell: &mut TerminalShell<R, W>,
    err: &AppError,
) {
    error!("❌ 评审过程出错，强制结束并导出: {}", err);
    if let Err(e) = shell.error(err) {
        debug!("终端不可用，错误未显示: {}", e);
    }
    engine.finish_now();
}

/// 导出评分表；失败时让用户换一个文件名，留空则放弃
fn export<R: BufRead, W: Write>(
    engine: &ReviewEngine,
    shell: &mut TerminalShell<R, W>,
) -> AppResult<ReviewOutcome> {
    let sheet = engine.score_sheet();
    let mut path = engine.config().output_path.clone();

    loop {
        let writer = ExportWriter::new(path.as_str());
        match writer.write(&sheet) {
            Ok(()) => {
                log_review_complete(sheet.scored_count(), sheet.rows.len(), writer.output_path());
                if let Err(e) = shell.info(format!("Scores saved to {path}")) {
                    warn!("终端输出失败: {}", e);
                }
                return Ok(ReviewOutcome {
                    sheet,
                    saved_to: Some(path),
                });
            }
            Err(e) => {
                error!("导出到 {} 失败: {}", writer.output_path(), e);
                if shell.error(&e).is_err() {
                    return Err(e);
                }
                let answer = match shell.read_line("Enter another output file name (blank to discard): ") {
                    Ok(answer) => answer,
                    Err(_) => return Err(e),
                };
                match answer.map(|a| a.trim().to_string()) {
                    Some(next) if !next.is_empty() => path = next,
                    _ => {
                        warn!("⚠️ 用户放弃保存，评分结果未导出");
                        return Ok(ReviewOutcome {
                            sheet,
                            saved_to: None,
                        });
                    }
                }
            }
        }
    }
}

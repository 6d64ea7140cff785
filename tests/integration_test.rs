use std::io::{self, Cursor, Write};
use std::path::Path;

use article_reviewer::orchestrator::run_review;
use article_reviewer::services::NO_COMMENT;
use article_reviewer::shell::TerminalShell;
use article_reviewer::{App, Article, Config, Dataset, ReviewEngine, RunConfig, Score, Summarizer};
use calamine::{open_workbook, Data, Reader, Xlsx};

const HEADER: &str = "Title Primary\tAuthors, Primary\tPub Year\tAbstract";

/// 确定性的假摘要
struct Echo;

impl Summarizer for Echo {
    async fn summarize(&self, text: &str) -> anyhow::Result<String> {
        Ok(format!("SUMMARY<{}>", text.split_whitespace().next().unwrap_or("")))
    }
}

/// 所有写入都失败的终端
struct BrokenTerminal;

impl Write for BrokenTerminal {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal closed"))
    }
}

fn write_tsv(dir: &Path, rows: usize) -> String {
    let path = dir.join("refs.tsv");
    let mut content = format!("{HEADER}\n");
    for i in 0..rows {
        content.push_str(&format!(
            "Article {i}\tAuthor {i}\t{}\tAbstract{i} body text\n",
            2010 + i
        ));
    }
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().to_string()
}

fn read_sheet(path: &Path) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let range = workbook.worksheet_range("Sheet1").unwrap();
    range.rows().map(|row| row.to_vec()).collect()
}

async fn run_script(script: &str) -> (Option<article_reviewer::ReviewOutcome>, String) {
    let mut shell = TerminalShell::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
    let outcome = App::initialize(Config::default())
        .run_with(&mut shell, &Echo)
        .await
        .unwrap();
    (outcome, String::from_utf8(shell.into_output()).unwrap())
}

#[tokio::test]
async fn test_three_of_five_without_comments() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_tsv(dir.path(), 5);
    let output = dir.path().join("scores.xlsx");
    let script = format!(
        "{source}\nn\n3\nn\nn\n{}\n2\n0\n3\n",
        output.display()
    );

    let (outcome, screen) = run_script(&script).await;
    let outcome = outcome.unwrap();

    assert!(screen.contains("Loaded 5 articles."));
    assert!(screen.contains("All articles have been reviewed."));
    assert_eq!(outcome.saved_to.as_deref(), Some(output.to_str().unwrap()));

    let rows = read_sheet(&output);
    assert_eq!(rows.len(), 4);
    let header: Vec<_> = rows[0].iter().map(|c| c.to_string()).collect();
    assert_eq!(header, vec!["Title", "Author", "Year", "Score", "Comments"]);
    let scores: Vec<_> = rows[1..].iter().map(|r| r[3].clone()).collect();
    assert_eq!(scores, vec![Data::Float(2.0), Data::Float(0.0), Data::Float(3.0)]);
    assert_eq!(rows[3][0], Data::String("Article 2".to_string()));
    assert!(rows[1..]
        .iter()
        .all(|r| r[4] == Data::String(NO_COMMENT.to_string())));
}

#[tokio::test]
async fn test_comments_with_blank_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_tsv(dir.path(), 4);
    let output = dir.path().join("with_comments.xlsx");
    let script = format!(
        "{source}\nn\n2\ny\nn\n{}\nc good\n1\n2\n",
        output.display()
    );

    let (outcome, _) = run_script(&script).await;
    let comments: Vec<_> = outcome
        .unwrap()
        .sheet
        .rows
        .into_iter()
        .map(|r| r.comment)
        .collect();
    assert_eq!(comments, vec!["good", NO_COMMENT]);

    let rows = read_sheet(&output);
    assert_eq!(rows[1][4], Data::String("good".to_string()));
    assert_eq!(rows[2][4], Data::String(NO_COMMENT.to_string()));
}

#[tokio::test]
async fn test_out_of_range_jump_then_finish() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_tsv(dir.path(), 5);
    let output = dir.path().join("partial.xlsx");
    let script = format!(
        "{source}\nn\n3\nn\nn\n{}\n1\ng 5\n2\nfinish\n",
        output.display()
    );

    let (outcome, screen) = run_script(&script).await;
    let scores: Vec<_> = outcome.unwrap().sheet.rows.iter().map(|r| r.score).collect();

    assert!(screen.contains("Error: Invalid article number 5: choose 1-3."));
    assert!(!screen.contains("All articles have been reviewed."));
    assert_eq!(scores, vec![Some(Score::One), Some(Score::Two), None]);
    assert_eq!(read_sheet(&output)[3][3], Data::Empty);
}

#[tokio::test]
async fn test_setup_recovers_from_bad_input() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_tsv(dir.path(), 2);
    let broken = dir.path().join("broken.tsv");
    std::fs::write(&broken, "Title Primary\tAbstract\nA\tB\n").unwrap();
    let output = dir.path().join("all.xlsx");
    // 缺列文件 → 加载正确文件 → 默认数量 10 超出范围 → 回车沿用已加载文件 → 全部评审
    let script = format!(
        "{}\n{source}\nn\n\nn\nn\n\n\ny\nn\ny\n{}\n3\n",
        broken.display(),
        output.display()
    );

    let (outcome, screen) = run_script(&script).await;
    let outcome = outcome.unwrap();

    assert!(screen.contains("missing required column(s): Authors, Primary, Pub Year"));
    assert!(screen.contains("Please enter a valid number of articles to display (1-2)."));
    assert!(screen.contains("Summary:\n  SUMMARY<Abstract0>"));
    assert_eq!(outcome.sheet.rows.len(), 2);
    assert_eq!(outcome.sheet.rows[0].score, Some(Score::Three));
    assert_eq!(outcome.sheet.rows[1].score, None);
    assert!(output.exists());
}

#[tokio::test]
async fn test_quit_during_setup_exports_nothing() {
    let (outcome, _) = run_script("q\n").await;
    assert!(outcome.is_none());
}

#[tokio::test]
async fn test_unwritable_output_asks_for_another_name() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_tsv(dir.path(), 1);
    let fallback = dir.path().join("fallback.xlsx");
    let script = format!(
        "{source}\ny\nn\nn\nscores.txt\n1\n{}\n",
        fallback.display()
    );

    let (outcome, screen) = run_script(&script).await;

    assert!(screen.contains("Error: 'scores.txt' must end with .xlsx"));
    assert_eq!(
        outcome.unwrap().saved_to.as_deref(),
        Some(fallback.to_str().unwrap())
    );
    assert!(fallback.exists());
}

#[tokio::test]
async fn test_broken_terminal_still_saves_collected_work() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("salvaged.xlsx");
    let dataset: Dataset = (0..3)
        .map(|i| Article::new(format!("T{i}"), "A", "2020", "text"))
        .collect();
    let engine = ReviewEngine::new(
        dataset,
        RunConfig {
            record_count: 3,
            allow_comments: false,
            enable_summary: false,
            output_path: output.to_string_lossy().to_string(),
        },
    )
    .unwrap();
    let mut shell = TerminalShell::new(Cursor::new(b"1\n".to_vec()), BrokenTerminal);

    let outcome = run_review(engine, &Echo, &mut shell).await.unwrap();

    assert_eq!(outcome.sheet.rows.len(), 3);
    assert_eq!(outcome.sheet.scored_count(), 0);
    assert!(output.exists());
}

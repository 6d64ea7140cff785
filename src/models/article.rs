use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

/// 数据源中必需的列名
pub const REQUIRED_COLUMNS: [&str; 4] = ["Title Primary", "Authors, Primary", "Pub Year", "Abstract"];

/// 一条待评审的文献记录
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Article {
    #[serde(rename = "Title Primary", default)]
    pub title: String,
    #[serde(rename = "Authors, Primary", default)]
    pub authors: String,
    /// 原样保留的年份文本
    #[serde(rename = "Pub Year", default)]
    pub year: String,
    #[serde(rename = "Abstract", default)]
    pub abstract_text: String,
}

impl Article {
    pub fn new(
        title: impl Into<String>,
        authors: impl Into<String>,
        year: impl Into<String>,
        abstract_text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            authors: authors.into(),
            year: year.into(),
            abstract_text: abstract_text.into(),
        }
    }

    /// 解析年份数值，兼容 `2019` 与 `2019.0` 两种写法
    pub fn year_number(&self) -> Option<i64> {
        static YEAR_RE: OnceLock<Regex> = OnceLock::new();
        let re = YEAR_RE.get_or_init(|| {
            Regex::new(r"^\s*(-?\d+)(?:\.0*)?\s*$").expect("year pattern is valid")
        });
        re.captures(&self.year)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}

/// 按行序排列、加载后不再变化的文献集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    articles: Vec<Article>,
}

impl Dataset {
    pub fn new(articles: Vec<Article>) -> Self {
        Self { articles }
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Article> {
        self.articles.get(index)
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }
}

impl FromIterator<Article> for Dataset {
    fn from_iter<I: IntoIterator<Item = Article>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_year(year: &str) -> Article {
        Article::new("t", "a", year, "abs")
    }

    #[test]
    fn test_year_number_accepts_integer_like_text() {
        assert_eq!(with_year("2019").year_number(), Some(2019));
        assert_eq!(with_year("2019.0").year_number(), Some(2019));
        assert_eq!(with_year(" 1998 ").year_number(), Some(1998));
    }

    #[test]
    fn test_year_number_rejects_free_text() {
        assert_eq!(with_year("").year_number(), None);
        assert_eq!(with_year("2019.5").year_number(), None);
        assert_eq!(with_year("in press").year_number(), None);
    }
}

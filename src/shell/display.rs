//! 可换字体的显示区域
//!
//! 评审屏建好时一次性登记所有区域，换字体时统一作用到登记表里的每一项。

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// 默认字号
pub const DEFAULT_FONT_SIZE: u8 = 18;

/// 可选字体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontFamily {
    #[default]
    Helvetica,
    Arial,
    TimesNewRoman,
    Courier,
    Verdana,
}

impl FontFamily {
    pub const ALL: [FontFamily; 5] = [
        FontFamily::Helvetica,
        FontFamily::Arial,
        FontFamily::TimesNewRoman,
        FontFamily::Courier,
        FontFamily::Verdana,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Helvetica",
            FontFamily::Arial => "Arial",
            FontFamily::TimesNewRoman => "Times New Roman",
            FontFamily::Courier => "Courier",
            FontFamily::Verdana => "Verdana",
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FontFamily {
    type Err = ValidationError;

    /// 忽略大小写和多余空白；也接受列表中的序号（从1开始）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.split_whitespace().collect::<Vec<_>>().join(" ");
        if let Ok(n) = wanted.parse::<usize>() {
            if let Some(font) = n.checked_sub(1).and_then(|i| Self::ALL.get(i)) {
                return Ok(*font);
            }
        }
        Self::ALL
            .into_iter()
            .find(|font| font.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| ValidationError::UnknownFont {
                name: s.trim().to_string(),
            })
    }
}

/// 评审屏上的显示区域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayRegion {
    Counter,
    Title,
    Author,
    Year,
    Abstract,
    Summary,
    ScoreActions,
    CommentBox,
    Finish,
    Instructions,
}

impl DisplayRegion {
    pub fn heading(self) -> &'static str {
        match self {
            DisplayRegion::Counter => "Article",
            DisplayRegion::Title => "Title",
            DisplayRegion::Author => "Author",
            DisplayRegion::Year => "Year",
            DisplayRegion::Abstract => "Abstract",
            DisplayRegion::Summary => "Summary",
            DisplayRegion::ScoreActions => "Score",
            DisplayRegion::CommentBox => "Comments",
            DisplayRegion::Finish => "Finish",
            DisplayRegion::Instructions => "Instructions",
        }
    }
}

/// 区域及其当前字体
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionStyle {
    pub region: DisplayRegion,
    pub font: FontFamily,
    pub size: u8,
}

/// 显示区域登记表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRegistry {
    regions: Vec<RegionStyle>,
}

impl DisplayRegistry {
    /// 按评审选项登记评审屏的区域
    pub fn for_review(allow_comments: bool, enable_summary: bool) -> Self {
        let mut regions = vec![
            DisplayRegion::Counter,
            DisplayRegion::Title,
            DisplayRegion::Author,
            DisplayRegion::Year,
            DisplayRegion::Abstract,
        ];
        if enable_summary {
            regions.push(DisplayRegion::Summary);
        }
        regions.push(DisplayRegion::ScoreActions);
        if allow_comments {
            regions.push(DisplayRegion::CommentBox);
        }
        regions.push(DisplayRegion::Finish);
        regions.push(DisplayRegion::Instructions);

        Self {
            regions: regions
                .into_iter()
                .map(|region| RegionStyle {
                    region,
                    font: FontFamily::default(),
                    size: DEFAULT_FONT_SIZE,
                })
                .collect(),
        }
    }

    pub fn contains(&self, region: DisplayRegion) -> bool {
        self.regions.iter().any(|style| style.region == region)
    }

    pub fn style_of(&self, region: DisplayRegion) -> Option<RegionStyle> {
        self.regions.iter().find(|style| style.region == region).copied()
    }

    pub fn regions(&self) -> &[RegionStyle] {
        &self.regions
    }

    /// 所有区域统一换成同一字体
    pub fn apply_font(&mut self, font: FontFamily) {
        for style in &mut self.regions {
            style.font = font;
            style.size = DEFAULT_FONT_SIZE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_follows_review_options() {
        let plain = DisplayRegistry::for_review(false, false);
        assert!(!plain.contains(DisplayRegion::Summary));
        assert!(!plain.contains(DisplayRegion::CommentBox));

        let full = DisplayRegistry::for_review(true, true);
        assert!(full.contains(DisplayRegion::Summary));
        assert!(full.contains(DisplayRegion::CommentBox));
        assert_eq!(full.regions().len(), 10);
    }

    #[test]
    fn test_apply_font_restyles_every_region() {
        let mut registry = DisplayRegistry::for_review(true, false);
        registry.apply_font(FontFamily::Courier);

        assert!(registry
            .regions()
            .iter()
            .all(|style| style.font == FontFamily::Courier && style.size == DEFAULT_FONT_SIZE));
    }

    #[test]
    fn test_font_parsing() {
        assert_eq!("times   new roman".parse(), Ok(FontFamily::TimesNewRoman));
        assert_eq!("VERDANA".parse(), Ok(FontFamily::Verdana));
        assert_eq!("2".parse(), Ok(FontFamily::Arial));
        assert_eq!(
            "Comic Sans".parse::<FontFamily>(),
            Err(ValidationError::UnknownFont {
                name: "Comic Sans".to_string()
            })
        );
        assert!("0".parse::<FontFamily>().is_err());
    }
}

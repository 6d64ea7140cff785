use std::fmt;

/// 文献评分，固定为 0-3 四档
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Score {
    Zero = 0,
    One = 1,
    Two = 2,
    Three = 3,
}

impl Score {
    /// 所有可用的评分，按按钮顺序排列
    pub const ALL: [Score; 4] = [Score::Zero, Score::One, Score::Two, Score::Three];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

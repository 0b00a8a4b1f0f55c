//! 棋子、阵营与坐标定义

use serde::{Deserialize, Serialize};

use crate::constants::{KING_POINTS, MAN_POINTS};

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 白方（先手，在下方，向 y 减小的方向前进）
    White,
    /// 黑方（后手，在上方，向 y 增大的方向前进）
    Black,
}

impl Side {
    /// 获取对方阵营
    pub fn opponent(&self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// 获取该阵营的规则描述
    pub const fn rules(&self) -> SideRules {
        match self {
            Side::White => SideRules {
                man: Square::WhiteMan,
                king: Square::WhiteKing,
                forward_dy: -1,
            },
            Side::Black => SideRules {
                man: Square::BlackMan,
                king: Square::BlackKing,
                forward_dy: 1,
            },
        }
    }

    /// 升变行（离己方起始边最远的一行）
    pub fn promotion_row(&self, height: u8) -> u8 {
        match self {
            Side::White => 0,
            Side::Black => height - 1,
        }
    }

    /// 数组下标（用于按阵营存放的计分等）
    pub(crate) fn index(&self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::White => write!(f, "white"),
            Side::Black => write!(f, "black"),
        }
    }
}

/// 每个阵营的棋子类型与前进方向，每次查询解析一次
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideRules {
    /// 该方的兵
    pub man: Square,
    /// 该方的王
    pub king: Square,
    /// 兵前进时 y 的变化量
    pub forward_dy: i8,
}

/// 格子内容
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// 空格
    #[default]
    Empty,
    /// 白兵
    WhiteMan,
    /// 白王
    WhiteKing,
    /// 黑兵
    BlackMan,
    /// 黑王
    BlackKing,
}

impl Square {
    /// 棋子所属阵营，空格返回 None
    pub fn side(&self) -> Option<Side> {
        match self {
            Square::Empty => None,
            Square::WhiteMan | Square::WhiteKing => Some(Side::White),
            Square::BlackMan | Square::BlackKing => Some(Side::Black),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Square::Empty)
    }

    pub fn is_man(&self) -> bool {
        matches!(self, Square::WhiteMan | Square::BlackMan)
    }

    pub fn is_king(&self) -> bool {
        matches!(self, Square::WhiteKing | Square::BlackKing)
    }

    /// 是否属于指定阵营
    pub fn belongs_to(&self, side: Side) -> bool {
        self.side() == Some(side)
    }

    /// 被吃掉时给对方的得分（兵 1 分，王 3 分）
    pub fn points(&self) -> u32 {
        match self {
            Square::Empty => 0,
            Square::WhiteMan | Square::BlackMan => MAN_POINTS,
            Square::WhiteKing | Square::BlackKing => KING_POINTS,
        }
    }

    /// 获取棋盘图字符（白方 w/W，黑方 b/B，大写为王）
    pub fn to_diagram_char(&self) -> char {
        match self {
            Square::Empty => '.',
            Square::WhiteMan => 'w',
            Square::WhiteKing => 'W',
            Square::BlackMan => 'b',
            Square::BlackKing => 'B',
        }
    }

    /// 从棋盘图字符解析
    pub fn from_diagram_char(c: char) -> Option<Square> {
        match c {
            '.' => Some(Square::Empty),
            'w' => Some(Square::WhiteMan),
            'W' => Some(Square::WhiteKing),
            'b' => Some(Square::BlackMan),
            'B' => Some(Square::BlackKing),
            _ => None,
        }
    }
}

/// 棋盘坐标，x 为列，y 为行，均从 0 开始
///
/// 坐标本身不知道棋盘大小，边界由 [`crate::Board`] 检查。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    /// 创建新位置
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// 沿方向 (dx, dy) 走 n 步后的坐标（可能为负或越界）
    pub fn shifted(&self, dx: i8, dy: i8, n: i32) -> (i32, i32) {
        (
            self.x as i32 + dx as i32 * n,
            self.y as i32 + dy as i32 * n,
        )
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

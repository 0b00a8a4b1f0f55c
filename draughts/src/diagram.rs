//! 棋盘图的解析和生成
//!
//! 棋盘图每行对应棋盘的一行，从 y=0 开始自上而下；行之间用换行或 `/`
//! 分隔，行内空白会被忽略：
//!
//! ```text
//! .b.b
//! ....
//! ....
//! w.w.
//! ```
//!
//! `.` 为空格，`w`/`W` 为白兵/白王，`b`/`B` 为黑兵/黑王。

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::error::{Result, RuleViolation};
use crate::piece::{Position, Square};

/// 棋盘图格式处理
pub struct Diagram;

impl Diagram {
    /// 解析棋盘图
    pub fn parse(text: &str) -> Result<Board> {
        let rows: Vec<Vec<char>> = text
            .split(['\n', '/'])
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        if rows.is_empty() {
            return Err(RuleViolation::InvalidDiagram {
                reason: "Empty diagram".to_string(),
            });
        }

        let width = rows[0].len();
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(RuleViolation::InvalidDiagram {
                reason: format!("Row {} has {} columns, expected {}", idx, row.len(), width),
            });
        }

        let (width, height) = match (u8::try_from(width), u8::try_from(rows.len())) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(RuleViolation::InvalidDiagram {
                    reason: format!("Diagram too large: {}x{}", width, rows.len()),
                })
            }
        };

        let mut board = Board::empty(width, height)?;
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.iter().enumerate() {
                let content = Square::from_diagram_char(*c).ok_or_else(|| {
                    RuleViolation::InvalidDiagram {
                        reason: format!("Invalid square character: {}", c),
                    }
                })?;
                board.set(Position::new(x as u8, y as u8), content);
            }
        }

        Ok(board)
    }

    /// 将棋盘转换为棋盘图，每行以换行结尾
    pub fn render(board: &Board) -> String {
        let mut out = String::with_capacity((board.width() as usize + 1) * board.height() as usize);
        for y in 0..board.height() {
            for x in 0..board.width() {
                out.push(board.get(Position::new(x, y)).to_diagram_char());
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Diagram::render(self))
    }
}

impl FromStr for Board {
    type Err = RuleViolation;

    fn from_str(s: &str) -> Result<Self> {
        Diagram::parse(s)
    }
}

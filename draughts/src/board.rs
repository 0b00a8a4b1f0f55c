//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::error::{Result, RuleViolation};
use crate::piece::{Position, Side, Square};

/// 棋盘
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: u8,
    height: u8,
    /// 索引为 y * width + x
    squares: Vec<Square>,
}

impl Board {
    /// 创建空棋盘，宽高必须为偶数且在限制范围内
    pub fn empty(width: u8, height: u8) -> Result<Self> {
        Self::check_size(width, height)?;
        Ok(Self::blank(width, height))
    }

    /// 创建初始棋盘
    ///
    /// 深色格（x + y 为奇数）上摆兵：黑方占上方 (height - 2) / 2 行，
    /// 白方占下方同样多的行，中间留两行空行。
    pub fn initial(width: u8, height: u8) -> Result<Self> {
        Self::check_size(width, height)?;
        Ok(Self::start_layout(width, height))
    }

    /// 默认 12x12 初始棋盘
    pub fn standard() -> Self {
        Self::start_layout(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT)
    }

    pub(crate) fn check_size(width: u8, height: u8) -> Result<()> {
        let valid = |n: u8| n % 2 == 0 && (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&n);
        if valid(width) && valid(height) {
            Ok(())
        } else {
            Err(RuleViolation::InvalidBoardSize { width, height })
        }
    }

    fn blank(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            squares: vec![Square::Empty; width as usize * height as usize],
        }
    }

    fn start_layout(width: u8, height: u8) -> Self {
        let mut board = Self::blank(width, height);
        board.restore_start();
        board
    }

    /// 原地恢复为同尺寸的初始布局
    pub(crate) fn restore_start(&mut self) {
        let (width, height) = (self.width, self.height);
        let rows = (height - 2) / 2;
        self.squares.fill(Square::Empty);

        for y in 0..height {
            for x in 0..width {
                if (x + y) % 2 == 0 {
                    continue;
                }
                let content = if y < rows {
                    Square::BlackMan
                } else if y >= height - rows {
                    Square::WhiteMan
                } else {
                    continue;
                };
                self.set(Position::new(x, y), content);
            }
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// 检查坐标是否在棋盘内
    pub fn is_within(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    /// 把有符号坐标转换为棋盘内的位置
    pub fn position(&self, x: i32, y: i32) -> Option<Position> {
        if self.is_within(x, y) {
            Some(Position::new(x as u8, y as u8))
        } else {
            None
        }
    }

    /// 获取指定坐标的内容，越界时返回 OutOfBounds
    pub fn piece_at(&self, x: i32, y: i32) -> Result<Square> {
        self.position(x, y)
            .map(|pos| self.get(pos))
            .ok_or(RuleViolation::OutOfBounds { x, y })
    }

    /// 覆盖指定坐标的内容（不检查规则）
    pub fn set_piece(&mut self, x: i32, y: i32, content: Square) -> Result<()> {
        let pos = self
            .position(x, y)
            .ok_or(RuleViolation::OutOfBounds { x, y })?;
        self.set(pos, content);
        Ok(())
    }

    /// 获取指定位置的内容，调用方保证位置在棋盘内
    pub(crate) fn get(&self, pos: Position) -> Square {
        self.index(pos)
            .map(|i| self.squares[i])
            .unwrap_or(Square::Empty)
    }

    /// 设置指定位置的内容，调用方保证位置在棋盘内
    pub(crate) fn set(&mut self, pos: Position, content: Square) {
        if let Some(i) = self.index(pos) {
            self.squares[i] = content;
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < self.width && pos.y < self.height {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    /// 移动棋子（不检查规则），返回目标格原来的内容
    ///
    /// 起点或终点越界时返回 OutOfBounds，棋盘保持不变。
    pub fn move_piece(&mut self, from: Position, to: Position) -> Result<Square> {
        let (from_index, to_index) = (self.checked_index(from)?, self.checked_index(to)?);
        let piece = std::mem::take(&mut self.squares[from_index]);
        Ok(std::mem::replace(&mut self.squares[to_index], piece))
    }

    fn checked_index(&self, pos: Position) -> Result<usize> {
        self.index(pos).ok_or(RuleViolation::OutOfBounds {
            x: pos.x as i32,
            y: pos.y as i32,
        })
    }

    /// 统计满足条件的格子数
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(Square) -> bool,
    {
        self.squares.iter().filter(|sq| predicate(**sq)).count()
    }

    /// 按计分函数累加所有格子
    pub fn score<F>(&self, scoring: F) -> u32
    where
        F: Fn(Square) -> u32,
    {
        self.squares.iter().map(|sq| scoring(*sq)).sum()
    }

    /// 指定阵营在棋盘上的棋子数
    pub fn piece_count(&self, side: Side) -> usize {
        self.count(|sq| sq.belongs_to(side))
    }

    /// 指定阵营的子力（兵 1 分，王 3 分）
    pub fn material(&self, side: Side) -> u32 {
        self.score(|sq| if sq.belongs_to(side) { sq.points() } else { 0 })
    }

    /// 获取指定阵营的所有棋子位置，按行优先顺序
    pub fn pieces(&self, side: Side) -> Vec<(Position, Square)> {
        let mut result = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Position::new(x, y);
                let content = self.get(pos);
                if content.belongs_to(side) {
                    result.push((pos, content));
                }
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

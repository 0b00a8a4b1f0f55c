//! 走法生成、验证与执行

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::config::CapturePolicy;
use crate::constants::DIAGONALS;
use crate::error::Result;
use crate::piece::{Position, Side, Square};

/// 走法
///
/// 走法只记录起点和终点，被吃的棋子由两点之间的斜线路径推出。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始位置
    pub from: Position,
    /// 目标位置
    pub to: Position,
}

impl Move {
    /// 创建新走法
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// 按坐标创建走法
    pub const fn from_coords(from_x: u8, from_y: u8, to_x: u8, to_y: u8) -> Self {
        Self {
            from: Position::new(from_x, from_y),
            to: Position::new(to_x, to_y),
        }
    }

    /// 斜线方向和步数，非斜线走法返回 None
    pub fn diagonal(&self) -> Option<((i8, i8), i32)> {
        let dx = self.to.x as i32 - self.from.x as i32;
        let dy = self.to.y as i32 - self.from.y as i32;
        if dx == 0 || dx.abs() != dy.abs() {
            return None;
        }
        Some(((dx.signum() as i8, dy.signum() as i8), dx.abs()))
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// 执行走法的结果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveEffect {
    /// 被吃掉的棋子及其位置
    pub captured: Vec<(Position, Square)>,
    /// 本步得分（兵 1 分，王 3 分）
    pub points: u32,
    /// 是否升变为王
    pub promoted: bool,
    /// 是否必须用同一棋子继续吃子
    pub must_continue: bool,
}

impl MoveEffect {
    /// 是否吃了子
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成指定阵营的合法走法
    ///
    /// 只要任意棋子可以吃子，就只返回吃子走法；否则返回所有普通走法。
    pub fn legal_moves(board: &Board, side: Side, policy: CapturePolicy) -> Vec<Move> {
        let captures = Self::capture_moves(board, side);
        if captures.is_empty() {
            return Self::quiet_moves(board, side);
        }

        match policy {
            CapturePolicy::AnyCapture => captures,
            CapturePolicy::LongestChain => Self::restrict_to_longest(board, captures),
        }
    }

    /// 连吃过程中指定棋子的合法走法
    pub fn continuation_moves(board: &Board, pos: Position, policy: CapturePolicy) -> Vec<Move> {
        let captures = Self::piece_captures(board, pos);
        match policy {
            CapturePolicy::AnyCapture => captures,
            CapturePolicy::LongestChain => Self::restrict_to_longest(board, captures),
        }
    }

    /// 生成指定阵营所有棋子的吃子走法
    pub fn capture_moves(board: &Board, side: Side) -> Vec<Move> {
        let mut moves = Vec::new();
        for (pos, _) in board.pieces(side) {
            Self::generate_captures(board, pos, &mut moves);
        }
        moves
    }

    /// 生成指定阵营所有棋子的普通走法
    pub fn quiet_moves(board: &Board, side: Side) -> Vec<Move> {
        let mut moves = Vec::new();
        for (pos, _) in board.pieces(side) {
            Self::generate_quiet(board, pos, &mut moves);
        }
        moves
    }

    /// 生成指定位置棋子的吃子走法，空格返回空列表
    pub fn piece_captures(board: &Board, pos: Position) -> Vec<Move> {
        let mut moves = Vec::new();
        Self::generate_captures(board, pos, &mut moves);
        moves
    }

    fn generate_captures(board: &Board, pos: Position, moves: &mut Vec<Move>) {
        let content = board.get(pos);
        let Some(side) = content.side() else {
            return;
        };

        if content.is_king() {
            Self::generate_king_captures(board, pos, side, moves);
        } else {
            Self::generate_man_captures(board, pos, side, moves);
        }
    }

    fn generate_quiet(board: &Board, pos: Position, moves: &mut Vec<Move>) {
        let content = board.get(pos);
        let Some(side) = content.side() else {
            return;
        };

        if content.is_king() {
            Self::generate_king_moves(board, pos, moves);
        } else {
            Self::generate_man_moves(board, pos, side, moves);
        }
    }

    /// 兵的普通走法：向前斜走一格
    fn generate_man_moves(board: &Board, pos: Position, side: Side, moves: &mut Vec<Move>) {
        let forward = side.rules().forward_dy;

        for (dx, dy) in DIAGONALS.into_iter().filter(|(_, dy)| *dy == forward) {
            let (x, y) = pos.shifted(dx, dy, 1);
            if let Some(to) = board.position(x, y) {
                if board.get(to).is_empty() {
                    moves.push(Move::new(pos, to));
                }
            }
        }
    }

    /// 王的普通走法：沿斜线滑行到第一个有子的格子之前
    fn generate_king_moves(board: &Board, pos: Position, moves: &mut Vec<Move>) {
        for (dx, dy) in DIAGONALS {
            let mut n = 1;
            while let Some(to) = Self::step(board, pos, dx, dy, n) {
                if !board.get(to).is_empty() {
                    break;
                }
                moves.push(Move::new(pos, to));
                n += 1;
            }
        }
    }

    /// 兵的吃子走法：四个方向都可以吃，跳过相邻的敌子落到紧邻的空格
    fn generate_man_captures(board: &Board, pos: Position, side: Side, moves: &mut Vec<Move>) {
        let enemy = side.opponent();

        for (dx, dy) in DIAGONALS {
            let (Some(over), Some(to)) = (
                Self::step(board, pos, dx, dy, 1),
                Self::step(board, pos, dx, dy, 2),
            ) else {
                continue;
            };

            if board.get(over).belongs_to(enemy) && board.get(to).is_empty() {
                moves.push(Move::new(pos, to));
            }
        }
    }

    /// 王的吃子走法（飞王）
    ///
    /// 跳过前方的空格；遇到的第一个棋子若为敌子，其后直到下一个棋子或
    /// 棋盘边缘的每个空格都是落点。先遇到己方棋子，或敌子后紧跟着另一个
    /// 棋子，则该方向没有吃法。
    fn generate_king_captures(board: &Board, pos: Position, side: Side, moves: &mut Vec<Move>) {
        let enemy = side.opponent();

        for (dx, dy) in DIAGONALS {
            let mut n = 1;
            let mut jumped = false;

            while let Some(to) = Self::step(board, pos, dx, dy, n) {
                let target = board.get(to);
                if !jumped {
                    if target.belongs_to(enemy) {
                        jumped = true;
                    } else if !target.is_empty() {
                        break;
                    }
                } else if target.is_empty() {
                    moves.push(Move::new(pos, to));
                } else {
                    break;
                }
                n += 1;
            }
        }
    }

    fn step(board: &Board, pos: Position, dx: i8, dy: i8, n: i32) -> Option<Position> {
        let (x, y) = pos.shifted(dx, dy, n);
        board.position(x, y)
    }

    /// 走法路径上（不含起点和终点）有子的格子
    pub fn captured_squares(board: &Board, mv: Move) -> Vec<Position> {
        let Some(((dx, dy), steps)) = mv.diagonal() else {
            return Vec::new();
        };

        (1..steps)
            .filter_map(|n| Self::step(board, mv.from, dx, dy, n))
            .filter(|pos| !board.get(*pos).is_empty())
            .collect()
    }

    /// 执行走法（不检查合法性）
    ///
    /// 移动棋子并清除路径上的所有棋子；吃子后该棋子仍能吃子时必须继续，
    /// 升变推迟到连吃结束。起点或终点越界时棋盘不变。
    pub fn apply(board: &mut Board, mv: Move) -> Result<MoveEffect> {
        let mut effect = Self::relocate(board, mv)?;
        let piece = board.get(mv.to);

        effect.must_continue = effect.is_capture() && !Self::piece_captures(board, mv.to).is_empty();

        if let (false, Some(side)) = (effect.must_continue, piece.side()) {
            let rules = side.rules();
            if piece == rules.man && mv.to.y == side.promotion_row(board.height()) {
                board.set(mv.to, rules.king);
                effect.promoted = true;
            }
        }

        Ok(effect)
    }

    /// 移动棋子并吃掉路径上的棋子，不处理升变和连吃
    fn relocate(board: &mut Board, mv: Move) -> Result<MoveEffect> {
        let captured_positions = Self::captured_squares(board, mv);
        board.move_piece(mv.from, mv.to)?;

        let mut effect = MoveEffect::default();
        for pos in captured_positions {
            let content = board.get(pos);
            effect.points += content.points();
            effect.captured.push((pos, content));
            board.set(pos, Square::Empty);
        }
        Ok(effect)
    }

    /// 指定棋子从当前局面出发最多能连吃几个子
    pub fn longest_chain(board: &Board, pos: Position) -> usize {
        Self::piece_captures(board, pos)
            .into_iter()
            .map(|mv| Self::chain_length_after(board, mv))
            .max()
            .unwrap_or(0)
    }

    /// 走出该吃子走法后总共能吃几个子（含本步）
    fn chain_length_after(board: &Board, mv: Move) -> usize {
        let mut next = board.clone();
        match Self::relocate(&mut next, mv) {
            Ok(effect) => effect.captured.len() + Self::longest_chain(&next, mv.to),
            Err(_) => 0,
        }
    }

    /// 只保留吃子数最多的吃子走法
    pub fn restrict_to_longest(board: &Board, captures: Vec<Move>) -> Vec<Move> {
        let scored: Vec<(Move, usize)> = captures
            .into_iter()
            .map(|mv| (mv, Self::chain_length_after(board, mv)))
            .collect();
        let best = scored.iter().map(|(_, len)| *len).max().unwrap_or(0);

        scored
            .into_iter()
            .filter(|(_, len)| *len == best)
            .map(|(mv, _)| mv)
            .collect()
    }
}

//! 错误类型定义

use thiserror::Error;

use crate::piece::Position;

/// 规则错误
///
/// 所有错误都可以在调用处恢复，被拒绝的操作不会改变对局状态。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    /// 坐标超出棋盘
    #[error("Coordinate out of bounds: ({x}, {y})")]
    OutOfBounds { x: i32, y: i32 },

    /// 走法不在当前合法走法集合中
    #[error("Illegal move: from {from} to {to}")]
    IllegalMove { from: Position, to: Position },

    /// 选择了不属于走子方的棋子
    #[error("Piece at ({x}, {y}) does not belong to the side to move")]
    WrongTurnPiece { x: u8, y: u8 },

    /// 没有棋子
    #[error("No piece at ({x}, {y})")]
    NoPiece { x: u8, y: u8 },

    /// 该棋子当前没有合法走法
    #[error("Piece at ({x}, {y}) has no legal move")]
    NoLegalMove { x: u8, y: u8 },

    /// 对局已结束
    #[error("Match is already over")]
    GameOver,

    /// 棋盘尺寸无效
    #[error("Invalid board size: {width}x{height} (both must be even and within limits)")]
    InvalidBoardSize { width: u8, height: u8 },

    /// 无效的棋盘图
    #[error("Invalid board diagram: {reason}")]
    InvalidDiagram { reason: String },

    /// 无效的配置
    #[error("Invalid rule config: {reason}")]
    InvalidConfig { reason: String },
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, RuleViolation>;

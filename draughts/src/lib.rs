//! 12x12 国际跳棋（加拿大规则）规则引擎
//!
//! 包含:
//! - 棋盘、格子内容、坐标等核心数据结构
//! - 走法生成（有吃必吃、飞王、连吃）和走法执行（吃子、升变）
//! - 对局状态机（走子方、连吃、计分、终局判定）
//! - 规则配置（JSON）和棋盘图格式

mod board;
mod config;
mod constants;
mod diagram;
mod error;
mod game;
mod moves;
mod piece;

pub use board::Board;
pub use config::{CapturePolicy, RuleConfig};
pub use constants::*;
pub use diagram::Diagram;
pub use error::{Result, RuleViolation};
pub use game::{ApplyOutcome, MatchPhase, MatchState};
pub use moves::{Move, MoveEffect, MoveGenerator};
pub use piece::{Position, Side, SideRules, Square};

/// 创建指定尺寸的新对局
pub fn new_match(width: u8, height: u8) -> Result<MatchState> {
    MatchState::new(width, height)
}

//! 对局控制
//!
//! [`MatchState`] 独占棋盘，负责走子方切换、连吃、计分和终局判定。

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::Board;
use crate::config::RuleConfig;
use crate::error::{Result, RuleViolation};
use crate::moves::{Move, MoveGenerator};
use crate::piece::{Position, Side, Square};

/// 对局阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// 等待选子
    AwaitingSelection,
    /// 已选中一个有合法走法的棋子
    PieceSelected(Position),
    /// 刚吃过子，同一棋子必须继续吃
    ChainCapture(Position),
    /// 对局结束
    GameOver { winner: Side },
}

/// 走子结果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplyOutcome {
    /// 被吃掉的棋子及其位置
    pub captured: Vec<(Position, Square)>,
    /// 本步得分
    pub points: u32,
    /// 是否必须用同一棋子继续吃子
    pub must_continue: bool,
    /// 是否升变
    pub promoted: bool,
    /// 本步结束对局时的胜方
    pub winner: Option<Side>,
}

impl ApplyOutcome {
    /// 是否吃了子
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }

    /// 本步是否结束了对局
    pub fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }
}

/// 对局状态
#[derive(Debug)]
pub struct MatchState {
    config: RuleConfig,
    board: Board,
    current_turn: Side,
    phase: MatchPhase,
    /// 按阵营累计的吃子得分
    scores: [u32; 2],
}

impl MatchState {
    /// 创建指定尺寸的新对局，其余规则使用默认值
    pub fn new(width: u8, height: u8) -> Result<Self> {
        Self::with_config(RuleConfig::with_size(width, height))
    }

    /// 按配置创建新对局
    pub fn with_config(config: RuleConfig) -> Result<Self> {
        let board = Board::initial(config.width, config.height)?;
        Ok(Self {
            config,
            board,
            current_turn: Side::White,
            phase: MatchPhase::AwaitingSelection,
            scores: [0, 0],
        })
    }

    /// 从指定局面开始对局，重置后回到同尺寸的初始局面
    pub fn from_board(board: Board, current_turn: Side, config: RuleConfig) -> Result<Self> {
        Board::check_size(board.width(), board.height())?;
        let config = RuleConfig {
            width: board.width(),
            height: board.height(),
            ..config
        };
        Ok(Self {
            config,
            board,
            current_turn,
            phase: MatchPhase::AwaitingSelection,
            scores: [0, 0],
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// 当前走子方
    pub fn current_turn(&self) -> Side {
        self.current_turn
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// 必须继续吃子的棋子位置
    pub fn must_continue(&self) -> Option<Position> {
        match self.phase {
            MatchPhase::ChainCapture(pos) => Some(pos),
            _ => None,
        }
    }

    /// 当前选中的棋子（连吃中的棋子视为选中）
    pub fn selected(&self) -> Option<Position> {
        match self.phase {
            MatchPhase::PieceSelected(pos) | MatchPhase::ChainCapture(pos) => Some(pos),
            _ => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, MatchPhase::GameOver { .. })
    }

    /// 获取指定坐标的内容
    pub fn piece_at(&self, x: i32, y: i32) -> Result<Square> {
        self.board.piece_at(x, y)
    }

    /// 指定阵营的累计吃子得分
    pub fn score(&self, side: Side) -> u32 {
        self.scores[side.index()]
    }

    /// 指定阵营在棋盘上的棋子数
    pub fn piece_count(&self, side: Side) -> usize {
        self.board.piece_count(side)
    }

    /// 指定阵营在棋盘上的子力
    pub fn material(&self, side: Side) -> u32 {
        self.board.material(side)
    }

    /// 当前走子方的合法走法
    pub fn legal_moves(&self) -> Vec<Move> {
        match self.phase {
            MatchPhase::GameOver { .. } => Vec::new(),
            MatchPhase::ChainCapture(pos) => {
                MoveGenerator::continuation_moves(&self.board, pos, self.config.capture_policy)
            }
            MatchPhase::AwaitingSelection | MatchPhase::PieceSelected(_) => {
                MoveGenerator::legal_moves(&self.board, self.current_turn, self.config.capture_policy)
            }
        }
    }

    /// 以指定坐标为起点的合法走法
    pub fn moves_from(&self, x: i32, y: i32) -> Result<Vec<Move>> {
        let pos = self.locate(x, y)?;
        Ok(self.legal_moves().into_iter().filter(|mv| mv.from == pos).collect())
    }

    fn locate(&self, x: i32, y: i32) -> Result<Position> {
        self.board
            .position(x, y)
            .ok_or(RuleViolation::OutOfBounds { x, y })
    }

    /// 选择棋子
    ///
    /// 只能选择走子方有合法走法的棋子；连吃中只能选择正在连吃的棋子。
    pub fn select(&mut self, x: i32, y: i32) -> Result<()> {
        if self.is_game_over() {
            return Err(RuleViolation::GameOver);
        }

        let pos = self.locate(x, y)?;
        let content = self.board.get(pos);
        match content.side() {
            None => return Err(RuleViolation::NoPiece { x: pos.x, y: pos.y }),
            Some(side) if side != self.current_turn => {
                debug!("Rejected selection of {} piece at {}", side, pos);
                return Err(RuleViolation::WrongTurnPiece { x: pos.x, y: pos.y });
            }
            Some(_) => {}
        }

        if !self.legal_moves().iter().any(|mv| mv.from == pos) {
            return Err(RuleViolation::NoLegalMove { x: pos.x, y: pos.y });
        }

        if !matches!(self.phase, MatchPhase::ChainCapture(_)) {
            self.phase = MatchPhase::PieceSelected(pos);
        }
        Ok(())
    }

    /// 取消选择（连吃中不能取消）
    pub fn deselect(&mut self) {
        if let MatchPhase::PieceSelected(_) = self.phase {
            self.phase = MatchPhase::AwaitingSelection;
        }
    }

    /// 走子
    ///
    /// 走法必须在当前合法走法集合中；被拒绝时对局状态不变。
    pub fn apply_move(&mut self, mv: Move) -> Result<ApplyOutcome> {
        if self.is_game_over() {
            return Err(RuleViolation::GameOver);
        }

        for pos in [mv.from, mv.to] {
            self.locate(pos.x as i32, pos.y as i32)?;
        }

        let content = self.board.get(mv.from);
        if content.side().is_some_and(|side| side != self.current_turn) {
            debug!("Rejected move {} of opponent piece", mv);
            return Err(RuleViolation::WrongTurnPiece {
                x: mv.from.x,
                y: mv.from.y,
            });
        }

        if !self.legal_moves().contains(&mv) {
            debug!("Rejected illegal move {} for {}", mv, self.current_turn);
            return Err(RuleViolation::IllegalMove {
                from: mv.from,
                to: mv.to,
            });
        }

        let effect = MoveGenerator::apply(&mut self.board, mv)?;
        let mover = self.current_turn;
        self.scores[mover.index()] += effect.points;

        debug!(
            "{} played {} (captured {}, +{} points)",
            mover,
            mv,
            effect.captured.len(),
            effect.points
        );
        if effect.promoted {
            info!("{} man promoted to king at {}", mover, mv.to);
        }

        let mut outcome = ApplyOutcome {
            captured: effect.captured,
            points: effect.points,
            must_continue: effect.must_continue,
            promoted: effect.promoted,
            winner: None,
        };

        if effect.must_continue {
            debug!("{} must continue capturing from {}", mover, mv.to);
            self.phase = MatchPhase::ChainCapture(mv.to);
            return Ok(outcome);
        }

        self.current_turn = mover.opponent();
        self.phase = MatchPhase::AwaitingSelection;

        if let Some(winner) = self.detect_winner(mover) {
            outcome.winner = Some(winner);
            self.finish(winner);
        }

        Ok(outcome)
    }

    /// 走子方认输，返回胜方
    pub fn resign(&mut self) -> Result<Side> {
        if self.is_game_over() {
            return Err(RuleViolation::GameOver);
        }

        let winner = self.current_turn.opponent();
        info!("{} resigned", self.current_turn);
        self.finish(winner);
        Ok(winner)
    }

    /// 重新开始：初始局面、比分清零、白方先走
    pub fn reset(&mut self) {
        self.board.restore_start();
        self.current_turn = Side::White;
        self.phase = MatchPhase::AwaitingSelection;
        self.scores = [0, 0];
    }

    /// 换手后检查终局：先检查将要走子的一方，再检查刚走完的一方
    fn detect_winner(&self, mover: Side) -> Option<Side> {
        let policy = self.config.capture_policy;
        if MoveGenerator::legal_moves(&self.board, self.current_turn, policy).is_empty() {
            Some(mover)
        } else if MoveGenerator::legal_moves(&self.board, mover, policy).is_empty() {
            Some(self.current_turn)
        } else {
            None
        }
    }

    fn finish(&mut self, winner: Side) {
        info!(
            "Game over, {} wins (score {}:{})",
            winner,
            self.score(Side::White),
            self.score(Side::Black)
        );
        self.phase = MatchPhase::GameOver { winner };
        if self.config.auto_reset {
            self.reset();
        }
    }
}

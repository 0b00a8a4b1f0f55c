//! 控制台对局会话
//!
//! 把指令交给规则引擎，并把引擎返回的状态渲染成文本。

use std::fmt::Write;

use draughts::{MatchPhase, MatchState, Move, Position, Result, RuleConfig, Side};
use tracing::debug;

use crate::command::{Command, HELP};

/// 执行指令后的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// 输出文本，继续对局
    Continue(String),
    /// 退出
    Quit,
}

/// 对局会话
pub struct Session {
    game: MatchState,
}

impl Session {
    /// 按配置创建会话
    pub fn new(config: RuleConfig) -> Result<Self> {
        Ok(Self {
            game: MatchState::with_config(config)?,
        })
    }

    pub fn game(&self) -> &MatchState {
        &self.game
    }

    /// 执行一条指令
    pub fn execute(&mut self, command: Command) -> Reply {
        debug!("Executing {:?}", command);
        let text = match command {
            Command::Quit => return Reply::Quit,
            Command::Help => HELP.to_string(),
            Command::Show => self.render(),
            Command::Moves => self.list_moves(),
            Command::Deselect => {
                self.game.deselect();
                match self.game.phase() {
                    MatchPhase::ChainCapture(pos) => format!("must continue from {}", pos),
                    _ => "selection cleared".to_string(),
                }
            }
            Command::New => {
                self.game.reset();
                format!("new match\n{}", self.render())
            }
            Command::Resign => match self.game.resign() {
                Ok(winner) => format!("{} wins by resignation\n{}", winner, self.render()),
                Err(e) => format!("rejected: {}", e),
            },
            Command::Select { x, y } => match self.game.select(x, y) {
                Ok(()) => match self.game.moves_from(x, y) {
                    Ok(moves) => format!("selected ({}, {}): {}", x, y, Self::join_targets(&moves)),
                    Err(e) => format!("rejected: {}", e),
                },
                Err(e) => format!("rejected: {}", e),
            },
            Command::Move {
                from_x,
                from_y,
                to_x,
                to_y,
            } => self.play(from_x, from_y, to_x, to_y),
        };
        Reply::Continue(text)
    }

    fn play(&mut self, from_x: i32, from_y: i32, to_x: i32, to_y: i32) -> String {
        let board = self.game.board();
        let (Some(from), Some(to)) = (board.position(from_x, from_y), board.position(to_x, to_y)) else {
            let (x, y) = if board.is_within(from_x, from_y) {
                (to_x, to_y)
            } else {
                (from_x, from_y)
            };
            return format!("rejected: {}", draughts::RuleViolation::OutOfBounds { x, y });
        };

        match self.game.apply_move(Move::new(from, to)) {
            Ok(outcome) => {
                let mut text = String::new();
                if outcome.is_capture() {
                    let _ = writeln!(text, "captured {} (+{})", outcome.captured.len(), outcome.points);
                }
                if outcome.promoted {
                    let _ = writeln!(text, "promoted to king");
                }
                if outcome.must_continue {
                    let _ = writeln!(text, "continue capturing from {}", to);
                }
                if let Some(winner) = outcome.winner {
                    let _ = writeln!(text, "game over: {} wins", winner);
                }
                text.push_str(&self.render());
                text
            }
            Err(e) => format!("rejected: {}", e),
        }
    }

    fn list_moves(&self) -> String {
        let moves = self.game.legal_moves();
        if moves.is_empty() {
            return "no legal moves".to_string();
        }
        moves
            .iter()
            .map(|mv| format!("{} {} {} {}", mv.from.x, mv.from.y, mv.to.x, mv.to.y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn join_targets(moves: &[Move]) -> String {
        moves
            .iter()
            .map(|mv| mv.to.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 渲染棋盘和对局信息
    pub fn render(&self) -> String {
        let board = self.game.board();
        let selected = self.game.selected();
        let mut out = String::new();

        out.push_str("    ");
        for x in 0..board.width() {
            let _ = write!(out, "{:>3}", x);
        }
        out.push('\n');

        for (y, line) in board.to_string().lines().enumerate() {
            let _ = write!(out, "{:>3} ", y);
            for (x, c) in line.chars().enumerate() {
                let here = Position::new(x as u8, y as u8);
                if selected == Some(here) {
                    let _ = write!(out, " [{}", c);
                } else {
                    let _ = write!(out, "  {}", c);
                }
            }
            out.push('\n');
        }

        let _ = writeln!(
            out,
            "white: {} pieces, score {} | black: {} pieces, score {}",
            self.game.piece_count(Side::White),
            self.game.score(Side::White),
            self.game.piece_count(Side::Black),
            self.game.score(Side::Black),
        );
        let status = match self.game.phase() {
            MatchPhase::GameOver { winner } => format!("game over, {} wins", winner),
            MatchPhase::ChainCapture(pos) => {
                format!("{} to move, must continue from {}", self.game.current_turn(), pos)
            }
            MatchPhase::AwaitingSelection | MatchPhase::PieceSelected(_) => {
                format!("{} to move", self.game.current_turn())
            }
        };
        out.push_str(&status);
        out
    }
}

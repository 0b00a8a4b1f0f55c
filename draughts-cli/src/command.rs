//! 控制台指令解析

use thiserror::Error;

/// 控制台指令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 选子：`x y`
    Select { x: i32, y: i32 },
    /// 走子：`fx fy tx ty`
    Move { from_x: i32, from_y: i32, to_x: i32, to_y: i32 },
    /// 取消选子
    Deselect,
    /// 列出合法走法
    Moves,
    /// 显示棋盘
    Show,
    /// 认输
    Resign,
    /// 重新开始
    New,
    Help,
    Quit,
}

/// 指令解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Expected 2 or 4 coordinates, got {0}")]
    WrongArity(usize),
}

impl Command {
    /// 解析一行输入
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some(first) = words.first() else {
            return Err(CommandError::Empty);
        };

        let keyword = match first.to_ascii_lowercase().as_str() {
            "deselect" | "d" => Some(Command::Deselect),
            "moves" | "m" => Some(Command::Moves),
            "show" | "s" => Some(Command::Show),
            "resign" => Some(Command::Resign),
            "new" => Some(Command::New),
            "help" | "h" | "?" => Some(Command::Help),
            "quit" | "q" | "exit" => Some(Command::Quit),
            _ => None,
        };
        if let Some(command) = keyword {
            return Ok(command);
        }

        if !first.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
            return Err(CommandError::Unknown(first.to_string()));
        }

        let coords = words
            .iter()
            .map(|w| {
                w.parse::<i32>()
                    .map_err(|_| CommandError::InvalidCoordinate(w.to_string()))
            })
            .collect::<Result<Vec<i32>, _>>()?;

        match coords.as_slice() {
            [x, y] => Ok(Command::Select { x: *x, y: *y }),
            [from_x, from_y, to_x, to_y] => Ok(Command::Move {
                from_x: *from_x,
                from_y: *from_y,
                to_x: *to_x,
                to_y: *to_y,
            }),
            other => Err(CommandError::WrongArity(other.len())),
        }
    }
}

/// 帮助文本
pub const HELP: &str = "\
commands:
  x y          select the piece at column x, row y
  fx fy tx ty  move from (fx, fy) to (tx, ty)
  deselect     drop the current selection
  moves        list legal moves
  show         print the board
  resign       the side to move resigns
  new          start a new match
  quit         leave";

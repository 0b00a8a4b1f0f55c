//! 加拿大跳棋控制台前端
//!
//! 包含:
//! - 指令解析
//! - 对局会话（调用规则引擎并渲染棋盘）
//! - 规则配置加载

pub mod command;
pub mod session;
pub mod settings;

pub use command::{Command, CommandError};
pub use session::{Reply, Session};
pub use settings::load_config;

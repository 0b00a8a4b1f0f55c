//! 规则配置
//!
//! 可从 JSON 加载，缺省字段使用默认值。

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::constants::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};
use crate::error::{Result, RuleViolation};

/// 吃子规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapturePolicy {
    /// 有吃必吃，可任选一种吃法
    #[default]
    AnyCapture,
    /// 有吃必吃，且必须选择吃子数最多的连吃路线
    LongestChain,
}

impl CapturePolicy {
    /// 显示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            CapturePolicy::AnyCapture => "any capture",
            CapturePolicy::LongestChain => "longest chain",
        }
    }
}

/// 对局规则配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// 棋盘宽度（偶数）
    pub width: u8,
    /// 棋盘高度（偶数）
    pub height: u8,
    /// 吃子规则
    pub capture_policy: CapturePolicy,
    /// 对局结束后是否立即开始新对局
    pub auto_reset: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            capture_policy: CapturePolicy::default(),
            auto_reset: true,
        }
    }
}

impl RuleConfig {
    /// 指定棋盘尺寸，其余使用默认值
    pub fn with_size(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// 从 JSON 解析并校验
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RuleConfig = serde_json::from_str(json).map_err(|e| RuleViolation::InvalidConfig {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 序列化为 JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| RuleViolation::InvalidConfig {
            reason: e.to_string(),
        })
    }

    /// 校验棋盘尺寸
    pub fn validate(&self) -> Result<()> {
        Board::empty(self.width, self.height).map(|_| ())
    }
}

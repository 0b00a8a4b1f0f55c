//! 规则配置加载
//!
//! 优先使用命令行给出的路径，否则读取用户配置目录下的
//! `canadian-draughts/rules.json`，都没有时使用默认规则。

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use draughts::RuleConfig;

/// 获取默认配置文件路径
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push("canadian-draughts");
        path.push("rules.json");
        path
    })
}

/// 加载规则配置
pub fn load_config(explicit: Option<&Path>) -> Result<RuleConfig> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    match config_path() {
        Some(path) if path.exists() => read_config(&path),
        Some(_) => {
            tracing::info!("配置文件不存在，使用默认规则");
            Ok(RuleConfig::default())
        }
        None => {
            tracing::warn!("无法获取配置目录，使用默认规则");
            Ok(RuleConfig::default())
        }
    }
}

fn read_config(path: &Path) -> Result<RuleConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("读取配置文件失败: {:?}", path))?;
    let config = RuleConfig::from_json(&content)
        .with_context(|| format!("配置文件无效: {:?}", path))?;
    tracing::info!("已加载规则配置: {:?}", path);
    Ok(config)
}

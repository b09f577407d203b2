//! # Config 模块
//!
//! 解析过程的可调选项。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (packer.json)
//! 3. 默认值（最低）

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 单个特效容器解析失败时的处理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectFailurePolicy {
    /// 中止整个解析（默认）
    ///
    /// 漏掉特效引用的贴图会导致它们被当作未使用资源剔除。
    #[default]
    Abort,
    /// 记录错误后跳过该文件
    Skip,
}

/// 解析配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveConfig {
    /// 特效容器解析失败时的策略
    #[serde(default)]
    pub effect_failure: EffectFailurePolicy,

    /// 是否解析插件依赖
    #[serde(default = "default_include_plugins")]
    pub include_plugins: bool,
}

fn default_include_plugins() -> bool {
    true
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            effect_failure: EffectFailurePolicy::default(),
            include_plugins: default_include_plugins(),
        }
    }
}

impl ResolveConfig {
    /// 从 JSON 文件加载配置
    ///
    /// 未出现的字段取默认值。
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;

        tracing::debug!(path = %path.display(), "配置文件加载成功");
        Ok(config)
    }

    /// 保存配置到 JSON 文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 格式错误
    #[error("配置格式错误: {0}")]
    Format(#[from] serde_json::Error),
}

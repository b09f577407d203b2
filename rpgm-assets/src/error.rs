//! # Error 模块
//!
//! 定义 rpgm-assets 中使用的错误类型。
//!
//! ## 分类
//!
//! - 致命错误：Animations.json 缺失或损坏、插件注册脚本缺失等，
//!   中止整个解析，统一以 [`ResolveError`] 返回
//! - 单文件错误：单个特效容器损坏（[`EffectError`]），
//!   由 [`EffectFailurePolicy`](crate::config::EffectFailurePolicy) 决定是否升级为致命错误
//! - 静默情况：未知事件指令、`null` 数组元素、不存在的可选文件，不视为错误

use std::path::PathBuf;

use thiserror::Error;

/// 特效容器（.efkefc）解析错误
#[derive(Error, Debug)]
pub enum EffectError {
    /// 文件读取失败
    #[error("读取特效文件失败: {0}")]
    Io(#[from] std::io::Error),

    /// 魔数不匹配
    #[error("不是有效的 .efkefc 文件（魔数 {found:#010x}）")]
    BadMagic { found: u32 },

    /// 不支持的格式版本
    #[error("未知的 .efkefc 版本号 {0}")]
    UnsupportedVersion(u32),

    /// INFO 块魔数不匹配
    #[error("未知的 INFO 块（魔数 {found:#010x}）")]
    BadInfoChunk { found: u32 },

    /// INFO 块声明的大小不小于文件大小
    #[error("INFO 块大小 {size} 超出文件大小 {file_len}")]
    InfoChunkTooLarge { size: u32, file_len: usize },

    /// 资源名长度非法
    #[error("资源名长度 {length} 非法（INFO 块大小 {chunk_size}）")]
    InvalidNameLength { length: u32, chunk_size: u32 },

    /// 资源名不是有效的 UTF-16
    #[error("资源名不是有效的 UTF-16 字符串")]
    InvalidName,

    /// 数据提前结束
    #[error("文件数据提前结束")]
    Truncated,
}

/// 插件解析错误
#[derive(Error, Debug)]
pub enum PluginError {
    /// 找不到 `$plugins` 绑定
    #[error("找不到 $plugins 定义")]
    MissingBinding,

    /// 数组字面量括号不匹配
    #[error("$plugins 数组字面量不完整")]
    UnbalancedLiteral,

    /// 数组字面量不是合法数据
    #[error("$plugins 数组字面量解析失败: {0}")]
    InvalidRegistration(#[from] serde_json::Error),
}

/// 资源解析的致命错误
#[derive(Error, Debug)]
pub enum ResolveError {
    /// 找不到工程文件，无法识别引擎版本
    #[error("在 {} 中找不到 RPG Maker 工程文件", .root.display())]
    UnknownEngine { root: PathBuf },

    /// data 目录不存在
    #[error("数据目录不存在: {}", .path.display())]
    MissingDataDir { path: PathBuf },

    /// 文件读取失败
    #[error("读取 {} 失败: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 数据文件格式错误
    #[error("解析 {} 失败: {source}", .path.display())]
    Data {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Animations.json 缺失
    #[error("Animations.json 不存在: {}", .path.display())]
    MissingAnimations { path: PathBuf },

    /// 特效容器解析失败
    #[error("解析特效 {} 失败: {source}", .path.display())]
    Effect {
        path: PathBuf,
        #[source]
        source: EffectError,
    },

    /// 插件注册脚本缺失
    #[error("plugins.js 不存在: {}", .path.display())]
    MissingPluginRegistry { path: PathBuf },

    /// 插件脚本缺失
    #[error("插件 '{name}' 的脚本不存在: {}", .path.display())]
    MissingPluginSource { name: String, path: PathBuf },

    /// 插件注册脚本解析失败
    #[error("解析 {} 失败: {source}", .path.display())]
    Plugin {
        path: PathBuf,
        #[source]
        source: PluginError,
    },
}

/// Result 类型别名
pub type ResolveResult<T> = Result<T, ResolveError>;

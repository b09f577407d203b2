//! # rpgm-assets
//!
//! RPG Maker MV/MZ 工程的资源引用解析与未使用资源过滤。
//!
//! ## 架构
//!
//! ```text
//! data/*.json ──► extract ──┐
//! effects/*.efkefc ► effect ─┼──► AssetIndex ──► UsageFilter ──► 是否未使用
//! js/plugins.js ──► plugin ─┘        ▲
//!                                    └── PathRegistry
//! ```
//!
//! ## 模块
//!
//! - [`registry`]：工程目录到绝对路径的映射
//! - [`event`]：事件指令表与指令列表遍历
//! - [`extract`]：各数据文件的提取例程
//! - [`effect`]：Effekseer 特效容器解析
//! - [`plugin`]：插件注册表与参数声明解析
//! - [`index`]：解析结果
//! - [`filter`]：未使用资源判定
//! - [`resolver`]：按阶段串联以上模块
//!
//! ## 使用
//!
//! ```ignore
//! let version = EngineVersion::identify(root)?;
//! let index = resolve_project(root, version, &ResolveConfig::default())?;
//! let registry = PathRegistry::new(root);
//! let filter = UsageFilter::new(&index, &registry, version);
//! if filter.is_unused(&file) { /* 跳过 */ }
//! ```

pub mod config;
pub mod effect;
pub mod error;
pub mod event;
pub mod extract;
pub mod filter;
pub mod index;
pub mod path;
pub mod plugin;
pub mod registry;
pub mod resolver;
pub mod version;

pub use config::{ConfigError, EffectFailurePolicy, ResolveConfig};
pub use error::{EffectError, PluginError, ResolveError, ResolveResult};
pub use event::{EventCommand, traverse_events};
pub use filter::{UsageFilter, is_unused};
pub use index::{AssetCategory, AssetIndex};
pub use registry::PathRegistry;
pub use resolver::{resolve_project, resolve_with_registry};
pub use version::EngineVersion;

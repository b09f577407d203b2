//! # 资源引用解析
//!
//! 串联各个提取器，构建一次完整的 [`AssetIndex`]。
//!
//! ## 阶段
//!
//! 1. `data/` 下除 Animations.json 外的所有已知数据文件（顺序无关）
//! 2. Animations.json（依赖阶段 1 收集的动画 ID）
//! 3. MZ：`effects/*.efkefc` 中名称出现在特效集合里的文件（依赖阶段 2）
//! 4. 插件依赖（可通过配置关闭）
//!
//! 任何致命错误都会中止解析，调用方不会拿到不完整的索引。

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::config::{EffectFailurePolicy, ResolveConfig};
use crate::effect::parse_effect_file;
use crate::error::{ResolveError, ResolveResult};
use crate::extract::{ANIMATIONS_FILE, DataFile, extract};
use crate::index::{AssetCategory, AssetIndex};
use crate::plugin::resolve_plugin_paths;
use crate::registry::PathRegistry;
use crate::version::EngineVersion;

/// 特效容器扩展名
const EFFECT_EXTENSION: &str = "efkefc";

/// 解析整个工程
pub fn resolve_project(
    root: impl AsRef<Path>,
    version: EngineVersion,
    config: &ResolveConfig,
) -> ResolveResult<AssetIndex> {
    let registry = PathRegistry::new(root);
    resolve_with_registry(&registry, version, config)
}

/// 使用已构造的路径注册表解析工程
pub fn resolve_with_registry(
    registry: &PathRegistry,
    version: EngineVersion,
    config: &ResolveConfig,
) -> ResolveResult<AssetIndex> {
    info!(root = %registry.top().display(), version = %version, "开始解析资源引用");

    let mut index = AssetIndex::new();

    parse_data_files(registry, version, &mut index)?;
    parse_animations(registry, version, &mut index)?;

    if version.is_mz() {
        parse_effects(registry, config.effect_failure, &mut index)?;
    }

    if config.include_plugins {
        let paths = resolve_plugin_paths(registry)?;
        debug!(count = paths.len(), "插件依赖解析完成");
        index.extend_plugin_paths(paths);
    }

    log_summary(&index);
    Ok(index)
}

/// 阶段 1：按文件名分发数据文件
fn parse_data_files(
    registry: &PathRegistry,
    version: EngineVersion,
    index: &mut AssetIndex,
) -> ResolveResult<()> {
    let data_dir = registry.data();
    if !data_dir.is_dir() {
        return Err(ResolveError::MissingDataDir {
            path: data_dir.to_path_buf(),
        });
    }

    for path in regular_files(data_dir)? {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let Some(kind) = DataFile::classify(file_name) else {
            continue;
        };
        if kind == DataFile::Animations {
            continue;
        }

        debug!(file = file_name, "解析数据文件");
        let json = read_text(&path)?;
        extract(kind, &json, version, index).map_err(|source| ResolveError::Data {
            path: path.clone(),
            source,
        })?;
    }

    Ok(())
}

/// 阶段 2：Animations.json
fn parse_animations(
    registry: &PathRegistry,
    version: EngineVersion,
    index: &mut AssetIndex,
) -> ResolveResult<()> {
    let path = registry.data().join(ANIMATIONS_FILE);
    if !path.is_file() {
        return Err(ResolveError::MissingAnimations { path });
    }

    debug!(file = ANIMATIONS_FILE, ids = index.animation_ids().len(), "解析动画");
    let json = read_text(&path)?;
    extract(DataFile::Animations, &json, version, index)
        .map_err(|source| ResolveError::Data { path, source })
}

/// 阶段 3：特效容器
fn parse_effects(
    registry: &PathRegistry,
    policy: EffectFailurePolicy,
    index: &mut AssetIndex,
) -> ResolveResult<()> {
    let effects_dir = registry.effects();
    if !effects_dir.is_dir() {
        debug!(path = %effects_dir.display(), "特效目录不存在，跳过");
        return Ok(());
    }

    for path in regular_files(effects_dir)? {
        let is_effect = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(EFFECT_EXTENSION));
        if !is_effect {
            continue;
        }

        let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };
        if !index.contains(AssetCategory::Effect, &stem) {
            continue;
        }

        debug!(file = %path.display(), "解析特效");
        match parse_effect_file(&path, effects_dir) {
            Ok(resources) => {
                for resource in resources {
                    index.push_effect_resource(resource);
                }
            }
            Err(e) => {
                error!(file = %path.display(), error = %e, "特效解析失败");
                match policy {
                    EffectFailurePolicy::Abort => {
                        return Err(ResolveError::Effect { path, source: e });
                    }
                    EffectFailurePolicy::Skip => {}
                }
            }
        }
    }

    Ok(())
}

/// 列出目录第一层的普通文件（按路径排序，保证日志顺序稳定）
fn regular_files(dir: &Path) -> ResolveResult<Vec<PathBuf>> {
    let io_error = |source| ResolveError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn read_text(path: &Path) -> ResolveResult<String> {
    fs::read_to_string(path).map_err(|source| ResolveError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn log_summary(index: &AssetIndex) {
    for category in AssetCategory::ALL {
        let count = index.count(category);
        if count > 0 {
            debug!(category = %category, count, "资源类别统计");
        }
    }

    info!(
        names = index.total_names(),
        animations = index.animation_ids().len(),
        effect_resources = index.effect_resources().len(),
        plugin_paths = index.plugin_paths().map_or(0, <[PathBuf]>::len),
        side_view = index.use_side_view(),
        "资源引用解析完成"
    );
}

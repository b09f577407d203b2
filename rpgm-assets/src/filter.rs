//! # 未使用资源过滤
//!
//! 对工程中的每个文件判断它是否未被游戏数据引用。
//!
//! ## 判定顺序（先命中者为准）
//!
//! 1. 插件相关路径：始终保留
//! 2. 普通资源目录（见 [`SIMPLE_DIRECTORIES`]）：按名称查找对应类别
//! 3. 敌人图片：`img/enemies` 与 `img/sv_enemies` 由侧面视角开关决定哪个有效
//! 4. MZ 特效目录：按特效名或特效容器内嵌的完整路径查找
//! 5. 其它文件：不由这里决定，视为已使用
//!
//! ## 名称匹配
//!
//! 文件直接位于类别目录下时按文件名（去扩展名）匹配；位于子目录时，
//! 按相对类别目录的路径（去扩展名）匹配，对应游戏数据中 `foo/bar` 形式的资源名。

use std::path::Path;

use crate::index::{AssetCategory, AssetIndex};
use crate::path::{normalize_path, relative_asset_name};
use crate::registry::PathRegistry;
use crate::version::EngineVersion;

/// 普通资源目录与资源类别的对应
pub struct DirectoryRule {
    pub category: AssetCategory,
    pub dir: fn(&PathRegistry) -> &Path,
    /// 仅在该版本下生效；`None` 表示两代通用
    pub only: Option<EngineVersion>,
}

/// 普通资源目录表
pub const SIMPLE_DIRECTORIES: &[DirectoryRule] = &[
    DirectoryRule {
        category: AssetCategory::Bgm,
        dir: PathRegistry::audio_bgm,
        only: None,
    },
    DirectoryRule {
        category: AssetCategory::Bgs,
        dir: PathRegistry::audio_bgs,
        only: None,
    },
    DirectoryRule {
        category: AssetCategory::Me,
        dir: PathRegistry::audio_me,
        only: None,
    },
    DirectoryRule {
        category: AssetCategory::Se,
        dir: PathRegistry::audio_se,
        only: None,
    },
    DirectoryRule {
        category: AssetCategory::Animation,
        dir: PathRegistry::img_animations,
        only: Some(EngineVersion::Mv),
    },
    DirectoryRule {
        category: AssetCategory::Battleback1,
        dir: PathRegistry::img_battlebacks1,
        only: None,
    },
    DirectoryRule {
        category: AssetCategory::Battleback2,
        dir: PathRegistry::img_battlebacks2,
        only: None,
    },
    DirectoryRule {
        category: AssetCategory::Character,
        dir: PathRegistry::img_characters,
        only: None,
    },
    DirectoryRule {
        category: AssetCategory::Face,
        dir: PathRegistry::img_faces,
        only: None,
    },
    DirectoryRule {
        category: AssetCategory::Parallax,
        dir: PathRegistry::img_parallaxes,
        only: None,
    },
    DirectoryRule {
        category: AssetCategory::Picture,
        dir: PathRegistry::img_pictures,
        only: None,
    },
    DirectoryRule {
        category: AssetCategory::ActorBattler,
        dir: PathRegistry::img_sv_actors,
        only: None,
    },
    DirectoryRule {
        category: AssetCategory::Tileset,
        dir: PathRegistry::img_tilesets,
        only: None,
    },
    DirectoryRule {
        category: AssetCategory::Title1,
        dir: PathRegistry::img_titles1,
        only: None,
    },
    DirectoryRule {
        category: AssetCategory::Title2,
        dir: PathRegistry::img_titles2,
        only: None,
    },
    DirectoryRule {
        category: AssetCategory::Movie,
        dir: PathRegistry::movies,
        only: None,
    },
];

/// 未使用资源过滤器
///
/// 借用解析完成的索引与路径注册表，对候选路径逐个判定。
#[derive(Debug, Clone, Copy)]
pub struct UsageFilter<'a> {
    index: &'a AssetIndex,
    registry: &'a PathRegistry,
    version: EngineVersion,
}

impl<'a> UsageFilter<'a> {
    pub fn new(index: &'a AssetIndex, registry: &'a PathRegistry, version: EngineVersion) -> Self {
        Self {
            index,
            registry,
            version,
        }
    }

    /// 判断文件是否未被引用
    ///
    /// `path` 应为绝对路径；判定前会按词法规则规范化。
    pub fn is_unused(&self, path: &Path) -> bool {
        let path = normalize_path(path);
        let index = self.index;
        let registry = self.registry;

        if index.is_plugin_path(&path) {
            return false;
        }

        for rule in SIMPLE_DIRECTORIES {
            if rule.only.is_some_and(|v| v != self.version) {
                continue;
            }

            let root = (rule.dir)(registry);
            if path.starts_with(root) {
                return !special_include(&path, root, rule.category, index);
            }
        }

        let (live, dead) = if index.use_side_view() {
            (registry.img_sv_enemies(), registry.img_enemies())
        } else {
            (registry.img_enemies(), registry.img_sv_enemies())
        };

        if path.starts_with(dead) {
            return true;
        }
        if path.starts_with(live) {
            return !special_include(&path, live, AssetCategory::EnemyBattler, index);
        }

        if self.version.is_mz() && path.starts_with(registry.effects()) {
            let by_name =
                special_include(&path, registry.effects(), AssetCategory::Effect, index);
            return !(by_name || index.is_effect_resource(&path));
        }

        false
    }
}

/// 便捷函数：不构造 [`UsageFilter`] 直接判定
pub fn is_unused(
    path: &Path,
    index: &AssetIndex,
    registry: &PathRegistry,
    version: EngineVersion,
) -> bool {
    UsageFilter::new(index, registry, version).is_unused(path)
}

/// 判断 `path` 是否对应 `category` 中的某个资源名
///
/// `root` 为该类别的目录，`path` 必须位于其下。
pub fn special_include(
    path: &Path,
    root: &Path,
    category: AssetCategory,
    index: &AssetIndex,
) -> bool {
    if path.parent() == Some(root) {
        let Some(stem) = path.file_stem() else {
            return false;
        };
        return index.contains(category, &stem.to_string_lossy());
    }

    relative_asset_name(path, root).is_some_and(|name| index.contains(category, &name))
}

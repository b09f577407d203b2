//! # 资源索引
//!
//! 一次解析过程的汇总结果：每个资源类别下被引用的名称集合，
//! 以及若干派生标志。
//!
//! ## 生命周期
//!
//! 1. 解析开始时创建空索引
//! 2. 所有提取器以 `&mut AssetIndex` 借用并写入
//! 3. 解析完成后只读，交给 [`UsageFilter`](crate::filter::UsageFilter) 使用

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::path::{normalize_name, normalize_path};

/// 资源类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    /// `img/sv_actors`
    ActorBattler,
    /// `img/animations`（仅 MV）
    Animation,
    /// `effects`（仅 MZ）
    Effect,
    /// `img/enemies` 或 `img/sv_enemies`
    EnemyBattler,
    Tileset,
    Title1,
    Title2,
    Character,
    Face,
    Bgm,
    Bgs,
    Me,
    Se,
    Picture,
    Movie,
    Battleback1,
    Battleback2,
    Parallax,
}

impl AssetCategory {
    /// 所有类别
    pub const ALL: [AssetCategory; 18] = [
        Self::ActorBattler,
        Self::Animation,
        Self::Effect,
        Self::EnemyBattler,
        Self::Tileset,
        Self::Title1,
        Self::Title2,
        Self::Character,
        Self::Face,
        Self::Bgm,
        Self::Bgs,
        Self::Me,
        Self::Se,
        Self::Picture,
        Self::Movie,
        Self::Battleback1,
        Self::Battleback2,
        Self::Parallax,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ActorBattler => "actor_battler",
            Self::Animation => "animation",
            Self::Effect => "effect",
            Self::EnemyBattler => "enemy_battler",
            Self::Tileset => "tileset",
            Self::Title1 => "title1",
            Self::Title2 => "title2",
            Self::Character => "character",
            Self::Face => "face",
            Self::Bgm => "bgm",
            Self::Bgs => "bgs",
            Self::Me => "me",
            Self::Se => "se",
            Self::Picture => "picture",
            Self::Movie => "movie",
            Self::Battleback1 => "battleback1",
            Self::Battleback2 => "battleback2",
            Self::Parallax => "parallax",
        }
    }
}

impl std::fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 资源索引
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetIndex {
    /// 各类别被引用的（规范化）名称
    names: BTreeMap<AssetCategory, BTreeSet<String>>,
    /// 被引用的动画 ID，解析 Animations.json 时用作过滤条件
    animation_ids: BTreeSet<i64>,
    /// 特效容器内嵌资源的完整路径（按路径精确匹配）
    effect_resources: Vec<PathBuf>,
    /// 是否使用侧面视角战斗
    use_side_view: bool,
    /// 插件脚本及其参数引用的资源，始终保留
    plugin_paths: Option<Vec<PathBuf>>,
}

impl AssetIndex {
    /// 创建空索引
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一个资源名
    ///
    /// 名称会先规范化；空名称被丢弃。返回是否为新名称。
    pub fn insert(&mut self, category: AssetCategory, raw_name: &str) -> bool {
        let Some(name) = normalize_name(raw_name) else {
            return false;
        };

        self.names.entry(category).or_default().insert(name)
    }

    /// 查询名称是否被引用（`name` 需已规范化）
    pub fn contains(&self, category: AssetCategory, name: &str) -> bool {
        self.names
            .get(&category)
            .is_some_and(|names| names.contains(name))
    }

    /// 遍历某类别的所有名称（按字典序）
    pub fn names(&self, category: AssetCategory) -> impl Iterator<Item = &str> {
        self.names
            .get(&category)
            .into_iter()
            .flat_map(|names| names.iter().map(String::as_str))
    }

    /// 某类别的名称数量
    pub fn count(&self, category: AssetCategory) -> usize {
        self.names.get(&category).map_or(0, BTreeSet::len)
    }

    /// 记录一个动画 ID
    ///
    /// `-1`（"普通攻击"）与 `0`（"无"）不对应 Animations.json 中的条目，直接忽略。
    pub fn insert_animation_id(&mut self, id: i64) -> bool {
        if id <= 0 {
            return false;
        }
        self.animation_ids.insert(id)
    }

    pub fn has_animation_id(&self, id: i64) -> bool {
        self.animation_ids.contains(&id)
    }

    pub fn animation_ids(&self) -> &BTreeSet<i64> {
        &self.animation_ids
    }

    /// 记录特效容器内嵌资源的完整路径
    pub fn push_effect_resource(&mut self, path: PathBuf) {
        let path = normalize_path(&path);
        if !self.effect_resources.contains(&path) {
            self.effect_resources.push(path);
        }
    }

    pub fn effect_resources(&self) -> &[PathBuf] {
        &self.effect_resources
    }

    /// 是否为特效容器引用的资源
    pub fn is_effect_resource(&self, path: &Path) -> bool {
        self.effect_resources.iter().any(|p| p == path)
    }

    pub fn set_use_side_view(&mut self, value: bool) {
        self.use_side_view = value;
    }

    pub fn use_side_view(&self) -> bool {
        self.use_side_view
    }

    /// 追加插件相关路径
    pub fn extend_plugin_paths(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        let list = self.plugin_paths.get_or_insert_with(Vec::new);
        for path in paths {
            let path = normalize_path(&path);
            if !list.contains(&path) {
                list.push(path);
            }
        }
    }

    pub fn plugin_paths(&self) -> Option<&[PathBuf]> {
        self.plugin_paths.as_deref()
    }

    /// 是否为插件相关路径
    pub fn is_plugin_path(&self, path: &Path) -> bool {
        self.plugin_paths
            .as_ref()
            .is_some_and(|paths| paths.iter().any(|p| p == path))
    }

    /// 所有类别的名称总数
    pub fn total_names(&self) -> usize {
        self.names.values().map(BTreeSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_drops_empty_and_dedups() {
        let mut index = AssetIndex::new();

        assert!(index.insert(AssetCategory::Bgm, "Battle1"));
        assert!(!index.insert(AssetCategory::Bgm, "Battle1"));
        assert!(!index.insert(AssetCategory::Bgm, ""));

        assert_eq!(index.count(AssetCategory::Bgm), 1);
        assert!(index.contains(AssetCategory::Bgm, "Battle1"));
        assert!(!index.contains(AssetCategory::Bgs, "Battle1"));
    }

    #[test]
    fn test_insert_normalizes_separators() {
        let mut index = AssetIndex::new();
        index.insert(AssetCategory::Character, "foo\\bar");

        let expected = format!("foo{}bar", std::path::MAIN_SEPARATOR);
        assert!(index.contains(AssetCategory::Character, &expected));
    }

    #[test]
    fn test_animation_id_skips_placeholders() {
        let mut index = AssetIndex::new();

        assert!(!index.insert_animation_id(-1));
        assert!(!index.insert_animation_id(0));
        assert!(index.insert_animation_id(7));

        assert_eq!(index.animation_ids().len(), 1);
        assert!(index.has_animation_id(7));
    }

    #[test]
    fn test_names_iterates_sorted() {
        let mut index = AssetIndex::new();
        index.insert(AssetCategory::Se, "Cursor2");
        index.insert(AssetCategory::Se, "Cancel1");

        let names: Vec<_> = index.names(AssetCategory::Se).collect();
        assert_eq!(names, vec!["Cancel1", "Cursor2"]);
        assert_eq!(index.names(AssetCategory::Me).count(), 0);
    }

    #[test]
    fn test_plugin_paths() {
        let mut index = AssetIndex::new();
        assert!(index.plugin_paths().is_none());

        index.extend_plugin_paths([PathBuf::from("/p/js/plugins/A.js")]);
        index.extend_plugin_paths([PathBuf::from("/p/js/plugins/./A.js")]);

        assert_eq!(index.plugin_paths().map(<[PathBuf]>::len), Some(1));
        assert!(index.is_plugin_path(Path::new("/p/js/plugins/A.js")));
    }

    #[test]
    fn test_serialize_uses_category_keys() {
        let mut index = AssetIndex::new();
        index.insert(AssetCategory::ActorBattler, "Actor1_1");

        let json = serde_json::to_value(&index).unwrap();
        assert_eq!(json["names"]["actor_battler"][0], "Actor1_1");
        assert_eq!(json["use_side_view"], false);
    }
}

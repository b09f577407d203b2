//! # 数据提取
//!
//! 每个已知的数据文件（`data/*.json`）对应一个提取例程：
//! 解码 JSON 文档，把其中引用的资源名写入 [`AssetIndex`]。
//!
//! ## 约定
//!
//! - 顶层为数组的文件，数组元素可以是 `null`（编辑器保留的 0 号位），直接跳过
//! - 缺失的字段视为"未设置"，不报错；JSON 本身格式错误则返回错误
//! - 例程只修改传入的索引，不读写任何其它状态
//!
//! Animations.json 依赖其它文件收集到的动画 ID，由调用方保证最后解析。

mod animations;
mod database;
mod map;
mod system;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::index::{AssetCategory, AssetIndex};
use crate::version::EngineVersion;

pub use animations::extract_animations;
pub use database::{
    extract_actors, extract_animation_ids, extract_common_events, extract_enemies,
    extract_tilesets, extract_troops,
};
pub use map::extract_map;
pub use system::extract_system;

/// Animations.json 的文件名
pub const ANIMATIONS_FILE: &str = "Animations.json";

/// 已知的数据文件种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFile {
    Actors,
    CommonEvents,
    Enemies,
    Items,
    Skills,
    System,
    Tilesets,
    Troops,
    Weapons,
    /// `MapXXX.json`
    Map,
    Animations,
}

impl DataFile {
    /// 根据文件名判断数据文件种类
    ///
    /// 地图文件为 11 个字符、以 `Map` 开头的文件（`Map001.json`），
    /// 因此 `MapInfos.json` 不会被当作地图。
    pub fn classify(file_name: &str) -> Option<Self> {
        let kind = match file_name {
            "Actors.json" => Self::Actors,
            "CommonEvents.json" => Self::CommonEvents,
            "Enemies.json" => Self::Enemies,
            "Items.json" => Self::Items,
            "Skills.json" => Self::Skills,
            "System.json" => Self::System,
            "Tilesets.json" => Self::Tilesets,
            "Troops.json" => Self::Troops,
            "Weapons.json" => Self::Weapons,
            ANIMATIONS_FILE => Self::Animations,
            name if name.len() == 11 && name.starts_with("Map") && name.ends_with(".json") => {
                Self::Map
            }
            _ => return None,
        };

        Some(kind)
    }
}

/// 按文件种类分发到对应的提取例程
pub fn extract(
    kind: DataFile,
    json: &str,
    version: EngineVersion,
    index: &mut AssetIndex,
) -> Result<(), serde_json::Error> {
    match kind {
        DataFile::Actors => extract_actors(json, index),
        DataFile::CommonEvents => extract_common_events(json, index),
        DataFile::Enemies => extract_enemies(json, index),
        DataFile::Items | DataFile::Skills | DataFile::Weapons => {
            extract_animation_ids(json, index)
        }
        DataFile::System => extract_system(json, index),
        DataFile::Tilesets => extract_tilesets(json, index),
        DataFile::Troops => extract_troops(json, index),
        DataFile::Map => extract_map(json, index),
        DataFile::Animations => extract_animations(json, version, index),
    }
}

/// 音频引用 `{name, volume, pitch, pan}`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AudioFile {
    pub name: Option<String>,
}

/// 解码顶层数组并跳过 `null` 元素
pub(crate) fn decode_array<T: DeserializeOwned>(json: &str) -> Result<Vec<T>, serde_json::Error> {
    let items: Vec<Option<T>> = serde_json::from_str(json)?;
    Ok(items.into_iter().flatten().collect())
}

/// 写入一个可选名称
pub(crate) fn insert_name(index: &mut AssetIndex, category: AssetCategory, name: Option<&str>) {
    if let Some(name) = name {
        index.insert(category, name);
    }
}

/// 写入一个可选音频引用
pub(crate) fn insert_audio(index: &mut AssetIndex, category: AssetCategory, audio: Option<&AudioFile>) {
    insert_name(index, category, audio.and_then(|a| a.name.as_deref()));
}

//! 数据库文件：Actors / Enemies / Items / Skills / Weapons / Tilesets / CommonEvents / Troops

use serde::Deserialize;

use super::{decode_array, insert_name};
use crate::event::{EventCommand, traverse_events};
use crate::index::{AssetCategory, AssetIndex};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Actor {
    battler_name: Option<String>,
    character_name: Option<String>,
    face_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Enemy {
    battler_name: Option<String>,
}

/// 物品、技能、武器共用的结构
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct UsableItem {
    animation_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Tileset {
    tileset_names: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EventList {
    list: Vec<EventCommand>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Troop {
    pages: Vec<Option<EventList>>,
}

/// Actors.json：战斗图、行走图、脸图
pub fn extract_actors(json: &str, index: &mut AssetIndex) -> Result<(), serde_json::Error> {
    for actor in decode_array::<Actor>(json)? {
        insert_name(index, AssetCategory::ActorBattler, actor.battler_name.as_deref());
        insert_name(index, AssetCategory::Character, actor.character_name.as_deref());
        insert_name(index, AssetCategory::Face, actor.face_name.as_deref());
    }
    Ok(())
}

/// Enemies.json：敌人战斗图
pub fn extract_enemies(json: &str, index: &mut AssetIndex) -> Result<(), serde_json::Error> {
    for enemy in decode_array::<Enemy>(json)? {
        insert_name(index, AssetCategory::EnemyBattler, enemy.battler_name.as_deref());
    }
    Ok(())
}

/// Items.json / Skills.json / Weapons.json：动画 ID
pub fn extract_animation_ids(json: &str, index: &mut AssetIndex) -> Result<(), serde_json::Error> {
    for item in decode_array::<UsableItem>(json)? {
        if let Some(id) = item.animation_id {
            index.insert_animation_id(id);
        }
    }
    Ok(())
}

/// Tilesets.json：所有图块图片
pub fn extract_tilesets(json: &str, index: &mut AssetIndex) -> Result<(), serde_json::Error> {
    for tileset in decode_array::<Tileset>(json)? {
        for name in &tileset.tileset_names {
            index.insert(AssetCategory::Tileset, name);
        }
    }
    Ok(())
}

/// CommonEvents.json：遍历每个公共事件的指令列表
pub fn extract_common_events(json: &str, index: &mut AssetIndex) -> Result<(), serde_json::Error> {
    for event in decode_array::<EventList>(json)? {
        traverse_events(&event.list, index);
    }
    Ok(())
}

/// Troops.json：遍历每个敌群每一页的指令列表
pub fn extract_troops(json: &str, index: &mut AssetIndex) -> Result<(), serde_json::Error> {
    for troop in decode_array::<Troop>(json)? {
        for page in troop.pages.iter().flatten() {
            traverse_events(&page.list, index);
        }
    }
    Ok(())
}

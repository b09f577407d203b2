//! System.json：载具、战斗背景、标题画面、系统音效与音乐

use serde::Deserialize;

use super::{AudioFile, insert_audio, insert_name};
use crate::index::{AssetCategory, AssetIndex};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Vehicle {
    bgm: Option<AudioFile>,
    character_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct System {
    airship: Option<Vehicle>,
    boat: Option<Vehicle>,
    ship: Option<Vehicle>,

    battleback1_name: Option<String>,
    battleback2_name: Option<String>,
    /// 数据库测试战斗使用的敌人图
    battler_name: Option<String>,

    opt_side_view: bool,

    title1_name: Option<String>,
    title2_name: Option<String>,

    sounds: Vec<Option<AudioFile>>,

    battle_bgm: Option<AudioFile>,
    title_bgm: Option<AudioFile>,

    defeat_me: Option<AudioFile>,
    gameover_me: Option<AudioFile>,
    victory_me: Option<AudioFile>,
}

/// 解析 System.json
pub fn extract_system(json: &str, index: &mut AssetIndex) -> Result<(), serde_json::Error> {
    let system: System = serde_json::from_str(json)?;

    for vehicle in [&system.airship, &system.boat, &system.ship]
        .into_iter()
        .flatten()
    {
        insert_audio(index, AssetCategory::Bgm, vehicle.bgm.as_ref());
        insert_name(index, AssetCategory::Character, vehicle.character_name.as_deref());
    }

    insert_name(index, AssetCategory::Battleback1, system.battleback1_name.as_deref());
    insert_name(index, AssetCategory::Battleback2, system.battleback2_name.as_deref());
    insert_name(index, AssetCategory::EnemyBattler, system.battler_name.as_deref());

    index.set_use_side_view(system.opt_side_view);

    insert_name(index, AssetCategory::Title1, system.title1_name.as_deref());
    insert_name(index, AssetCategory::Title2, system.title2_name.as_deref());

    for sound in system.sounds.iter().flatten() {
        insert_audio(index, AssetCategory::Se, Some(sound));
    }

    insert_audio(index, AssetCategory::Bgm, system.battle_bgm.as_ref());
    insert_audio(index, AssetCategory::Bgm, system.title_bgm.as_ref());

    insert_audio(index, AssetCategory::Me, system.defeat_me.as_ref());
    insert_audio(index, AssetCategory::Me, system.gameover_me.as_ref());
    insert_audio(index, AssetCategory::Me, system.victory_me.as_ref());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYSTEM_JSON: &str = r#"{
        "airship": {"bgm": {"name": "Ship3", "pan": 0, "pitch": 100, "volume": 90}, "characterIndex": 3, "characterName": "Vehicle"},
        "boat": {"bgm": {"name": "Ship1"}, "characterName": "Vehicle"},
        "ship": {"bgm": {"name": "Ship2"}, "characterName": "Vehicle2"},
        "battleback1Name": "Grassland",
        "battleback2Name": "Grassland",
        "battlerName": "Dragon",
        "optSideView": true,
        "title1Name": "Castle",
        "title2Name": "",
        "sounds": [{"name": "Cursor1"}, {"name": "Decision1"}, {"name": ""}, null],
        "battleBgm": {"name": "Battle1"},
        "titleBgm": {"name": "Theme6"},
        "defeatMe": {"name": "Defeat1"},
        "gameoverMe": {"name": "Gameover1"},
        "victoryMe": {"name": "Victory1"},
        "gameTitle": "Test"
    }"#;

    #[test]
    fn test_system_fields() {
        let mut index = AssetIndex::new();
        extract_system(SYSTEM_JSON, &mut index).unwrap();

        let bgm: Vec<_> = index.names(AssetCategory::Bgm).collect();
        assert_eq!(bgm, vec!["Battle1", "Ship1", "Ship2", "Ship3", "Theme6"]);

        let characters: Vec<_> = index.names(AssetCategory::Character).collect();
        assert_eq!(characters, vec!["Vehicle", "Vehicle2"]);

        let me: Vec<_> = index.names(AssetCategory::Me).collect();
        assert_eq!(me, vec!["Defeat1", "Gameover1", "Victory1"]);

        let se: Vec<_> = index.names(AssetCategory::Se).collect();
        assert_eq!(se, vec!["Cursor1", "Decision1"]);

        assert!(index.contains(AssetCategory::Battleback1, "Grassland"));
        assert!(index.contains(AssetCategory::Battleback2, "Grassland"));
        assert!(index.contains(AssetCategory::EnemyBattler, "Dragon"));
        assert!(index.contains(AssetCategory::Title1, "Castle"));
        assert_eq!(index.count(AssetCategory::Title2), 0);
        assert!(index.use_side_view());
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let mut index = AssetIndex::new();
        extract_system(r#"{"battleBgm": {"name": "Battle1"}}"#, &mut index).unwrap();

        assert_eq!(index.total_names(), 1);
        assert!(!index.use_side_view());
    }
}

//! MapXXX.json：地图本身的背景、音乐与所有事件页

use serde::Deserialize;

use super::{AudioFile, insert_audio, insert_name};
use crate::event::{EventCommand, traverse_events};
use crate::index::{AssetCategory, AssetIndex};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Map {
    battleback1_name: Option<String>,
    battleback2_name: Option<String>,
    bgm: Option<AudioFile>,
    bgs: Option<AudioFile>,
    parallax_name: Option<String>,
    events: Vec<Option<MapEvent>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MapEvent {
    pages: Vec<Option<EventPage>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EventPage {
    image: Option<PageImage>,
    list: Vec<EventCommand>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PageImage {
    character_name: Option<String>,
}

/// 解析地图文件
pub fn extract_map(json: &str, index: &mut AssetIndex) -> Result<(), serde_json::Error> {
    let map: Map = serde_json::from_str(json)?;

    insert_name(index, AssetCategory::Battleback1, map.battleback1_name.as_deref());
    insert_name(index, AssetCategory::Battleback2, map.battleback2_name.as_deref());
    insert_audio(index, AssetCategory::Bgm, map.bgm.as_ref());
    insert_audio(index, AssetCategory::Bgs, map.bgs.as_ref());
    insert_name(index, AssetCategory::Parallax, map.parallax_name.as_deref());

    for event in map.events.iter().flatten() {
        for page in event.pages.iter().flatten() {
            let character = page.image.as_ref().and_then(|i| i.character_name.as_deref());
            insert_name(index, AssetCategory::Character, character);

            traverse_events(&page.list, index);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_fields_and_events() {
        let json = r#"{
            "autoplayBgm": true,
            "battleback1Name": "Cobblestones1",
            "battleback2Name": "",
            "bgm": {"name": "Town1", "pan": 0, "pitch": 100, "volume": 90},
            "bgs": {"name": "", "pan": 0, "pitch": 100, "volume": 90},
            "parallaxName": "Mountains1",
            "data": [0, 0, 0],
            "events": [
                null,
                {"id": 1, "name": "EV001", "pages": [
                    {"image": {"characterName": "People1", "characterIndex": 2}, "list": [
                        {"code": 101, "parameters": ["People1", 2, 0, 2]},
                        {"code": 401, "parameters": ["Hello"]},
                        {"code": 0, "parameters": []}
                    ]},
                    {"image": {"characterName": "", "tileId": 0}, "list": [
                        {"code": 505, "parameters": [{"code": 44, "parameters": [{"name": "Door1"}]}]}
                    ]}
                ]}
            ]
        }"#;

        let mut index = AssetIndex::new();
        extract_map(json, &mut index).unwrap();

        assert!(index.contains(AssetCategory::Battleback1, "Cobblestones1"));
        assert_eq!(index.count(AssetCategory::Battleback2), 0);
        assert!(index.contains(AssetCategory::Bgm, "Town1"));
        assert_eq!(index.count(AssetCategory::Bgs), 0);
        assert!(index.contains(AssetCategory::Parallax, "Mountains1"));
        assert!(index.contains(AssetCategory::Character, "People1"));
        assert!(index.contains(AssetCategory::Face, "People1"));
        assert!(index.contains(AssetCategory::Se, "Door1"));
    }

    #[test]
    fn test_empty_map() {
        let mut index = AssetIndex::new();
        extract_map("{}", &mut index).unwrap();
        assert_eq!(index.total_names(), 0);
    }
}

//! Animations.json：只保留被其它数据引用过的动画
//!
//! - MV：`animation1Name` / `animation2Name` → 动画图片，`timings[].se.name` → 音效
//! - MZ：`effectName` → 特效，`soundTimings[].se.name` → 音效

use serde::Deserialize;

use super::{AudioFile, decode_array, insert_audio, insert_name};
use crate::index::{AssetCategory, AssetIndex};
use crate::version::EngineVersion;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Animation {
    id: i64,

    // MV
    animation1_name: Option<String>,
    animation2_name: Option<String>,
    timings: Vec<Option<SoundTiming>>,

    // MZ
    effect_name: Option<String>,
    sound_timings: Vec<Option<SoundTiming>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SoundTiming {
    se: Option<AudioFile>,
}

/// 解析 Animations.json
///
/// 必须在其它数据文件之后调用，`index` 中的动画 ID 此时已经收集完毕。
pub fn extract_animations(
    json: &str,
    version: EngineVersion,
    index: &mut AssetIndex,
) -> Result<(), serde_json::Error> {
    for animation in decode_array::<Animation>(json)? {
        if !index.has_animation_id(animation.id) {
            continue;
        }

        let timings = match version {
            EngineVersion::Mv => {
                insert_name(index, AssetCategory::Animation, animation.animation1_name.as_deref());
                insert_name(index, AssetCategory::Animation, animation.animation2_name.as_deref());
                &animation.timings
            }
            EngineVersion::Mz => {
                insert_name(index, AssetCategory::Effect, animation.effect_name.as_deref());
                &animation.sound_timings
            }
        };

        for timing in timings.iter().flatten() {
            insert_audio(index, AssetCategory::Se, timing.se.as_ref());
        }
    }

    Ok(())
}

//! # 工程路径注册表
//!
//! 将工程内的语义目录（`audio/bgm`、`img/characters`、`effects` 等）
//! 映射为绝对路径。构造时一次性解析，之后只读。

use std::path::{Path, PathBuf};

use crate::path::absolute_path;

/// 工程路径注册表
///
/// 所有条目都是规范化后的绝对路径。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRegistry {
    top: PathBuf,

    audio: PathBuf,
    audio_bgm: PathBuf,
    audio_bgs: PathBuf,
    audio_me: PathBuf,
    audio_se: PathBuf,

    data: PathBuf,

    // 仅 MZ
    effects: PathBuf,
    effects_texture: PathBuf,

    fonts: PathBuf,
    icon: PathBuf,

    img: PathBuf,
    // 仅 MV
    img_animations: PathBuf,
    img_battlebacks1: PathBuf,
    img_battlebacks2: PathBuf,
    img_characters: PathBuf,
    img_enemies: PathBuf,
    img_faces: PathBuf,
    img_parallaxes: PathBuf,
    img_pictures: PathBuf,
    img_sv_actors: PathBuf,
    img_sv_enemies: PathBuf,
    img_system: PathBuf,
    img_tilesets: PathBuf,
    img_titles1: PathBuf,
    img_titles2: PathBuf,

    js: PathBuf,
    js_plugins: PathBuf,
    movies: PathBuf,
    save: PathBuf,
}

impl PathRegistry {
    /// 从工程根目录构造注册表
    ///
    /// 相对路径基于当前工作目录解析为绝对路径。
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        let top = absolute_path(project_root.as_ref());
        let audio = top.join("audio");
        let img = top.join("img");
        let effects = top.join("effects");
        let js = top.join("js");

        Self {
            audio_bgm: audio.join("bgm"),
            audio_bgs: audio.join("bgs"),
            audio_me: audio.join("me"),
            audio_se: audio.join("se"),
            audio,

            data: top.join("data"),

            effects_texture: effects.join("Texture"),
            effects,

            fonts: top.join("fonts"),
            icon: top.join("icon"),

            img_animations: img.join("animations"),
            img_battlebacks1: img.join("battlebacks1"),
            img_battlebacks2: img.join("battlebacks2"),
            img_characters: img.join("characters"),
            img_enemies: img.join("enemies"),
            img_faces: img.join("faces"),
            img_parallaxes: img.join("parallaxes"),
            img_pictures: img.join("pictures"),
            img_sv_actors: img.join("sv_actors"),
            img_sv_enemies: img.join("sv_enemies"),
            img_system: img.join("system"),
            img_tilesets: img.join("tilesets"),
            img_titles1: img.join("titles1"),
            img_titles2: img.join("titles2"),
            img,

            js_plugins: js.join("plugins"),
            js,
            movies: top.join("movies"),
            save: top.join("save"),

            top,
        }
    }

    /// 工程根目录
    pub fn top(&self) -> &Path {
        &self.top
    }

    pub fn audio(&self) -> &Path {
        &self.audio
    }

    pub fn audio_bgm(&self) -> &Path {
        &self.audio_bgm
    }

    pub fn audio_bgs(&self) -> &Path {
        &self.audio_bgs
    }

    pub fn audio_me(&self) -> &Path {
        &self.audio_me
    }

    pub fn audio_se(&self) -> &Path {
        &self.audio_se
    }

    /// 数据目录（`data/`）
    pub fn data(&self) -> &Path {
        &self.data
    }

    /// 特效目录（`effects/`，仅 MZ）
    pub fn effects(&self) -> &Path {
        &self.effects
    }

    pub fn effects_texture(&self) -> &Path {
        &self.effects_texture
    }

    pub fn fonts(&self) -> &Path {
        &self.fonts
    }

    pub fn icon(&self) -> &Path {
        &self.icon
    }

    pub fn img(&self) -> &Path {
        &self.img
    }

    /// 动画图片目录（`img/animations`，仅 MV）
    pub fn img_animations(&self) -> &Path {
        &self.img_animations
    }

    pub fn img_battlebacks1(&self) -> &Path {
        &self.img_battlebacks1
    }

    pub fn img_battlebacks2(&self) -> &Path {
        &self.img_battlebacks2
    }

    pub fn img_characters(&self) -> &Path {
        &self.img_characters
    }

    /// 正面视角敌人图片
    pub fn img_enemies(&self) -> &Path {
        &self.img_enemies
    }

    pub fn img_faces(&self) -> &Path {
        &self.img_faces
    }

    pub fn img_parallaxes(&self) -> &Path {
        &self.img_parallaxes
    }

    pub fn img_pictures(&self) -> &Path {
        &self.img_pictures
    }

    pub fn img_sv_actors(&self) -> &Path {
        &self.img_sv_actors
    }

    /// 侧面视角敌人图片
    pub fn img_sv_enemies(&self) -> &Path {
        &self.img_sv_enemies
    }

    pub fn img_system(&self) -> &Path {
        &self.img_system
    }

    pub fn img_tilesets(&self) -> &Path {
        &self.img_tilesets
    }

    pub fn img_titles1(&self) -> &Path {
        &self.img_titles1
    }

    pub fn img_titles2(&self) -> &Path {
        &self.img_titles2
    }

    pub fn js(&self) -> &Path {
        &self.js
    }

    /// 插件脚本目录（`js/plugins`）
    pub fn js_plugins(&self) -> &Path {
        &self.js_plugins
    }

    pub fn movies(&self) -> &Path {
        &self.movies
    }

    pub fn save(&self) -> &Path {
        &self.save
    }
}

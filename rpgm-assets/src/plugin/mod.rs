//! # 插件依赖解析
//!
//! 从 `js/plugins.js` 得到启用的插件列表，再读取每个插件源码中的参数声明，
//! 结合用户配置计算出插件依赖的资源路径。
//!
//! ## 参数取值规则
//!
//! - 注册表中没有该插件（或没有该参数）：只有同时 `@require 1` 且有 `@default` 的参数生效，取默认值
//! - 有配置：取去掉首尾空白后的配置值；配置为空时跳过，即使声明了默认值
//!
//! 资源路径为 `@dir` + 值 + 扩展名，扩展名由目录推断（`img` → `.png`，`audio` → `.ogg`）；
//! 没有 `@dir` 的动画参数视为 `img/animations` 下的图片，没有 `@dir` 的文件参数被忽略。
//!
//! 插件文件按 UTF-8 读取，无法解码的字节被替换（旧插件的帮助文本常见 Shift-JIS）。

mod descriptor;
mod registration;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ResolveError, ResolveResult};
use crate::path::normalize_name;
use crate::registry::PathRegistry;

pub use descriptor::{ParameterKind, PluginDescriptor, PluginParameter};
pub use registration::{PluginRegistration, parse_registration_script};

/// 插件注册脚本文件名
pub const REGISTRATION_FILE: &str = "plugins.js";

/// 未声明 `@dir` 的参数使用的目录
const ANIMATION_DIR: &str = "img/animations";

/// 解析工程的插件依赖
///
/// 返回插件脚本本身以及它们声明、引用的资源的绝对路径。
pub fn resolve_plugin_paths(registry: &PathRegistry) -> ResolveResult<Vec<PathBuf>> {
    let registration_path = registry.js().join(REGISTRATION_FILE);
    debug!(path = %registration_path.display(), "解析插件注册表");

    if !registration_path.is_file() {
        return Err(ResolveError::MissingPluginRegistry {
            path: registration_path,
        });
    }

    let text = read_text(&registration_path)?;
    let plugins = parse_registration_script(&text).map_err(|source| ResolveError::Plugin {
        path: registration_path.clone(),
        source,
    })?;

    let mut paths = Vec::new();

    for plugin in &plugins {
        let source_path = registry.js_plugins().join(format!("{}.js", plugin.name));
        if !source_path.is_file() {
            return Err(ResolveError::MissingPluginSource {
                name: plugin.name.clone(),
                path: source_path,
            });
        }

        let source = read_text(&source_path)?;
        let descriptor = PluginDescriptor::parse(&source, &plugin.name);
        debug!(
            plugin = %plugin.name,
            required_assets = descriptor.required_assets.len(),
            parameters = descriptor.parameters.len(),
            "解析插件声明"
        );

        paths.push(source_path);
        paths.extend(descriptor_paths(
            &plugin.name,
            &descriptor,
            Some(plugin),
            registry.top(),
        ));
    }

    Ok(paths)
}

/// 计算单个插件声明引用的资源路径
///
/// `registration` 为 `None` 表示注册表中没有该插件。
pub fn descriptor_paths(
    plugin: &str,
    descriptor: &PluginDescriptor,
    registration: Option<&PluginRegistration>,
    root: &Path,
) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = descriptor
        .required_assets
        .iter()
        .filter_map(|asset| normalize_name(asset))
        .map(|asset| root.join(asset))
        .collect();

    for param in &descriptor.parameters {
        let configured = registration.and_then(|r| r.parameter(&param.name));

        let value = match configured {
            Some(value) => {
                let value = value.trim();
                if value.is_empty() {
                    if param.default.is_some() {
                        warn!(plugin, param = %param.name, "参数配置为空但声明了默认值，已跳过");
                    }
                    continue;
                }
                value
            }
            None => match (&param.default, param.required) {
                (Some(default), true) => default.as_str(),
                _ => continue,
            },
        };

        if let Some(path) = parameter_path(plugin, param, value, root) {
            paths.push(path);
        }
    }

    paths
}

/// 参数值对应的资源路径
fn parameter_path(
    plugin: &str,
    param: &PluginParameter,
    value: &str,
    root: &Path,
) -> Option<PathBuf> {
    let dir = match (param.dir.as_deref(), param.kind) {
        (Some(dir), _) => dir,
        (None, ParameterKind::Animation) => ANIMATION_DIR,
        (None, ParameterKind::File) => {
            warn!(plugin, param = %param.name, "文件参数缺少 @dir，已忽略");
            return None;
        }
    };
    let file = format!("{value}{}", extension_for(dir));

    let dir = normalize_name(dir)?;
    let file = normalize_name(&file)?;

    Some(root.join(dir).join(file))
}

/// 由资源目录推断扩展名
fn extension_for(dir: &str) -> &'static str {
    if dir.starts_with("img") {
        ".png"
    } else if dir.starts_with("audio") {
        ".ogg"
    } else {
        ""
    }
}

fn read_text(path: &Path) -> ResolveResult<String> {
    let bytes = fs::read(path).map_err(|source| ResolveError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            debug!(path = %path.display(), "插件文件不是合法的 UTF-8，按替换字符解码");
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn param(name: &str, default: Option<&str>, required: bool, dir: Option<&str>) -> PluginParameter {
        PluginParameter {
            name: name.to_string(),
            default: default.map(str::to_string),
            required,
            dir: dir.map(str::to_string),
            kind: ParameterKind::File,
        }
    }

    fn registration(parameters: &[(&str, &str)]) -> PluginRegistration {
        PluginRegistration {
            name: "Test".to_string(),
            status: true,
            parameters: parameters
                .iter()
                .map(|(k, v)| (k.to_string(), serde_json::Value::from(*v)))
                .collect::<BTreeMap<_, _>>(),
            ..Default::default()
        }
    }

    #[test]
    fn test_extension_for() {
        assert_eq!(extension_for("img/pictures/"), ".png");
        assert_eq!(extension_for("audio/bgm/"), ".ogg");
        assert_eq!(extension_for("movies/"), "");
    }

    #[test]
    fn test_default_vs_configured_empty() {
        let root = Path::new("/project");
        let descriptor = PluginDescriptor {
            required_assets: vec![],
            parameters: vec![param("Image", Some("X"), true, Some("img/pictures/"))],
        };

        // 没有注册信息：使用默认值
        let paths = descriptor_paths("Test", &descriptor, None, root);
        assert_eq!(paths, vec![root.join("img").join("pictures").join("X.png")]);

        // 配置为空：跳过
        let configured = registration(&[("Image", "  ")]);
        assert!(descriptor_paths("Test", &descriptor, Some(&configured), root).is_empty());
    }

    #[test]
    fn test_configured_value_is_trimmed() {
        let root = Path::new("/project");
        let descriptor = PluginDescriptor {
            required_assets: vec![],
            parameters: vec![param("Music", None, false, Some("audio/bgm"))],
        };

        let configured = registration(&[("Music", " Theme2 ")]);
        let paths = descriptor_paths("Test", &descriptor, Some(&configured), root);
        assert_eq!(paths, vec![root.join("audio").join("bgm").join("Theme2.ogg")]);
    }

    #[test]
    fn test_optional_default_without_registration_is_skipped() {
        let root = Path::new("/project");
        let descriptor = PluginDescriptor {
            required_assets: vec![],
            parameters: vec![param("Image", Some("X"), false, Some("img/pictures/"))],
        };

        assert!(descriptor_paths("Test", &descriptor, None, root).is_empty());
    }

    #[test]
    fn test_missing_key_falls_back_to_default_rule() {
        let root = Path::new("/project");
        let descriptor = PluginDescriptor {
            required_assets: vec![],
            parameters: vec![param("Image", Some("X"), true, Some("img/pictures/"))],
        };

        let configured = registration(&[("Other", "Y")]);
        let paths = descriptor_paths("Test", &descriptor, Some(&configured), root);
        assert_eq!(paths, vec![root.join("img").join("pictures").join("X.png")]);
    }

    #[test]
    fn test_animation_parameter_without_dir() {
        let root = Path::new("/project");
        let mut animation = param("Anim", None, false, None);
        animation.kind = ParameterKind::Animation;
        let descriptor = PluginDescriptor {
            required_assets: vec!["img/system/Logo.png".to_string()],
            parameters: vec![animation],
        };

        let configured = registration(&[("Anim", "Flash")]);
        let paths = descriptor_paths("Test", &descriptor, Some(&configured), root);
        assert_eq!(
            paths,
            vec![
                root.join("img").join("system").join("Logo.png"),
                root.join("img").join("animations").join("Flash.png"),
            ]
        );
    }

    /// 文件参数必须声明目录
    #[test]
    fn test_file_parameter_without_dir_is_skipped() {
        let root = Path::new("/project");
        let descriptor = PluginDescriptor {
            required_assets: vec![],
            parameters: vec![param("Image", Some("X"), true, None)],
        };

        assert!(descriptor_paths("Test", &descriptor, None, root).is_empty());

        let configured = registration(&[("Image", "Y")]);
        assert!(descriptor_paths("Test", &descriptor, Some(&configured), root).is_empty());
    }

    #[test]
    fn test_read_text_replaces_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Sjis.js");
        fs::write(&path, b"/*:\n * @help \x83\x65\x83\x58\n */\n").unwrap();

        let text = read_text(&path).unwrap();
        assert!(text.starts_with("/*:\n * @help "));
        assert!(text.contains('\u{FFFD}'));
    }
}

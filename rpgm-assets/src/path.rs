//! # 路径规范化模块
//!
//! 资源名与文件路径的统一处理。
//!
//! ## 设计原则
//!
//! - 资源名（如 `"foo/bar"`）统一使用宿主平台的分隔符
//! - 文件路径统一为**绝对路径**，并按词法规则消除 `.` 与 `..`
//! - 不访问文件系统（不做 canonicalize，不解析符号链接）

use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

/// 规范化资源名
///
/// - 将 `/` 与 `\` 统一替换为宿主平台分隔符
/// - 空名称返回 `None`（游戏数据中空字符串表示"未设置"）
///
/// 对已规范化的名称再次调用不会产生变化。
pub fn normalize_name(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }

    let normalized = raw
        .chars()
        .map(|c| match c {
            '/' | '\\' => MAIN_SEPARATOR,
            c => c,
        })
        .collect();

    Some(normalized)
}

/// 按词法规则规范化路径
///
/// 处理路径组件：
/// - 移除 `.` 组件
/// - `..` 组件弹出上一级（已到根部时忽略）
/// - 保留前缀与根
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => result.push(prefix.as_os_str()),
            Component::RootDir => result.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() {
                    // 相对路径开头的 `..` 无法消除，原样保留
                    result.push("..");
                }
            }
            Component::Normal(part) => result.push(part),
        }
    }

    result
}

/// 转为绝对路径并规范化
///
/// 相对路径基于当前工作目录解析。
pub fn absolute_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    normalize_path(&absolute)
}

/// 计算 `path` 相对于 `root` 的资源名（去掉扩展名）
///
/// `root/foo/bar.png` → `Some("foo/bar")`（分隔符为宿主平台分隔符）。
/// `path` 不在 `root` 下时返回 `None`。
pub fn relative_asset_name(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let without_extension = relative.with_extension("");

    let name = without_extension
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join(&MAIN_SEPARATOR.to_string());

    if name.is_empty() { None } else { Some(name) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sep(s: &str) -> String {
        s.replace('/', &MAIN_SEPARATOR.to_string())
    }

    #[test]
    fn test_normalize_name_basic() {
        assert_eq!(normalize_name("Actor1"), Some("Actor1".to_string()));
        assert_eq!(normalize_name("foo/bar"), Some(sep("foo/bar")));
        assert_eq!(normalize_name("foo\\bar"), Some(sep("foo/bar")));
        assert_eq!(normalize_name(""), None);
    }

    #[test]
    fn test_normalize_name_idempotent() {
        for raw in ["Actor1", "foo/bar", "a\\b/c", "!Door", "$BigMonster"] {
            let once = normalize_name(raw).unwrap();
            let twice = normalize_name(&once).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_normalize_path_dot_components() {
        assert_eq!(
            normalize_path(Path::new("/project/./img/../audio/bgm")),
            PathBuf::from("/project/audio/bgm")
        );
        assert_eq!(
            normalize_path(Path::new("/project/effects/Texture/../x.png")),
            PathBuf::from("/project/effects/x.png")
        );
        assert_eq!(normalize_path(Path::new("../a/b")), PathBuf::from("../a/b"));
    }

    #[test]
    fn test_absolute_path_is_absolute() {
        let p = absolute_path(Path::new("some/relative/../dir"));
        assert!(p.is_absolute());
        assert!(p.ends_with("some/dir"));
    }

    #[test]
    fn test_relative_asset_name() {
        let root = Path::new("/project/img/characters");
        assert_eq!(
            relative_asset_name(Path::new("/project/img/characters/foo/bar.png"), root),
            Some(sep("foo/bar"))
        );
        assert_eq!(
            relative_asset_name(Path::new("/project/img/characters/Actor1.png"), root),
            Some("Actor1".to_string())
        );
        assert_eq!(
            relative_asset_name(Path::new("/project/img/faces/Actor1.png"), root),
            None
        );
    }
}

//! # 引擎版本
//!
//! 支持的两代引擎：MV（旧）与 MZ（新）。两者的数据结构大体一致，
//! 区别在于动画（MV 使用图片序列，MZ 使用 Effekseer 特效）以及目录结构。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ResolveError, ResolveResult};

/// 引擎版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineVersion {
    /// RPG Maker MV
    Mv,
    /// RPG Maker MZ
    Mz,
}

impl EngineVersion {
    /// 根据工程文件扩展名识别引擎版本
    ///
    /// 只扫描工程根目录的第一层：
    /// - `*.rpgproject` → MV
    /// - `*.rmmzproject` → MZ
    pub fn identify(project_root: &Path) -> ResolveResult<Self> {
        debug!(root = %project_root.display(), "识别引擎版本");

        let entries = fs::read_dir(project_root).map_err(|source| ResolveError::Io {
            path: project_root.to_path_buf(),
            source,
        })?;

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(extension) = path.extension() else {
                continue;
            };

            let extension = extension.to_string_lossy().to_lowercase();
            let version = match extension.as_str() {
                "rpgproject" => EngineVersion::Mv,
                "rmmzproject" => EngineVersion::Mz,
                _ => continue,
            };

            debug!(file = %path.display(), version = %version, "找到工程文件");
            return Ok(version);
        }

        Err(ResolveError::UnknownEngine {
            root: project_root.to_path_buf(),
        })
    }

    /// 是否为新一代引擎（MZ）
    pub fn is_mz(self) -> bool {
        self == EngineVersion::Mz
    }
}

impl std::fmt::Display for EngineVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mv => write!(f, "RPG Maker MV"),
            Self::Mz => write!(f, "RPG Maker MZ"),
        }
    }
}

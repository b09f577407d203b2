//! # 特效容器解析
//!
//! 解析 MZ 使用的 Effekseer 特效容器（`.efkefc`），取出其中引用的贴图、
//! 透明度贴图与模型文件路径。
//!
//! ## 格式（小端序）
//!
//! ```text
//! u32  magic = "EFKE" (0x454B4645)
//! u32  version = 0
//! u32  chunk = "INFO" (0x4F464E49)
//! u32  chunk_size            // 必须小于文件大小
//! u32  reserved
//! list textures
//! u32  reserved
//! list alpha_textures
//! list models
//!
//! list := u32 count, count × name
//! name := u32 n, n × u16 (UTF-16LE，最后一个单元为结尾的 0)
//! ```

use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian as LE, ReadBytesExt};

use crate::error::EffectError;
use crate::path::normalize_name;

/// 文件魔数 "EFKE"
pub const EFFECT_MAGIC: u32 = 0x454B_4645;
/// INFO 块魔数 "INFO"
pub const INFO_MAGIC: u32 = 0x4F46_4E49;
/// 唯一支持的版本
pub const EFFECT_VERSION: u32 = 0;

/// 解析特效容器字节流
///
/// 返回的路径均为 `effects_dir` 与资源名拼接后的结果，顺序为
/// 贴图、透明度贴图、模型。
pub fn parse_effect(bytes: &[u8], effects_dir: &Path) -> Result<Vec<PathBuf>, EffectError> {
    let mut reader = Cursor::new(bytes);

    let magic = read_u32(&mut reader)?;
    if magic != EFFECT_MAGIC {
        return Err(EffectError::BadMagic { found: magic });
    }

    let version = read_u32(&mut reader)?;
    if version != EFFECT_VERSION {
        return Err(EffectError::UnsupportedVersion(version));
    }

    let chunk = read_u32(&mut reader)?;
    if chunk != INFO_MAGIC {
        return Err(EffectError::BadInfoChunk { found: chunk });
    }

    let chunk_size = read_u32(&mut reader)?;
    if chunk_size as usize >= bytes.len() {
        return Err(EffectError::InfoChunkTooLarge {
            size: chunk_size,
            file_len: bytes.len(),
        });
    }
    let _reserved = read_u32(&mut reader)?;

    let mut resources = Vec::new();

    read_list(&mut reader, chunk_size, effects_dir, &mut resources)?;
    let _reserved = read_u32(&mut reader)?;
    read_list(&mut reader, chunk_size, effects_dir, &mut resources)?;
    read_list(&mut reader, chunk_size, effects_dir, &mut resources)?;

    Ok(resources)
}

/// 读取并解析特效文件
pub fn parse_effect_file(path: &Path, effects_dir: &Path) -> Result<Vec<PathBuf>, EffectError> {
    let bytes = fs::read(path)?;
    parse_effect(&bytes, effects_dir)
}

fn read_list(
    reader: &mut Cursor<&[u8]>,
    chunk_size: u32,
    effects_dir: &Path,
    out: &mut Vec<PathBuf>,
) -> Result<(), EffectError> {
    let count = read_u32(reader)?;

    for _ in 0..count {
        let name = read_name(reader, chunk_size)?;
        let Some(name) = normalize_name(&name) else {
            continue;
        };
        out.push(effects_dir.join(name));
    }

    Ok(())
}

/// 读取一个以 0 结尾的 UTF-16LE 资源名
fn read_name(reader: &mut Cursor<&[u8]>, chunk_size: u32) -> Result<String, EffectError> {
    let length = read_u32(reader)?;
    if length == 0 || length >= chunk_size {
        return Err(EffectError::InvalidNameLength { length, chunk_size });
    }

    let mut units = vec![0u16; length as usize];
    reader
        .read_u16_into::<LE>(&mut units)
        .map_err(truncated)?;

    // 去掉结尾的 0
    units.pop();

    String::from_utf16(&units).map_err(|_| EffectError::InvalidName)
}

fn read_u32(reader: &mut Cursor<&[u8]>) -> Result<u32, EffectError> {
    reader.read_u32::<LE>().map_err(truncated)
}

fn truncated(e: io::Error) -> EffectError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        EffectError::Truncated
    } else {
        EffectError::Io(e)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use byteorder::WriteBytesExt;

    /// 构造一个合成的特效容器
    pub(crate) fn encode_effect(textures: &[&str], alphas: &[&str], models: &[&str]) -> Vec<u8> {
        fn write_list(body: &mut Vec<u8>, names: &[&str]) {
            body.write_u32::<LE>(names.len() as u32).unwrap();
            for name in names {
                let units: Vec<u16> = name.encode_utf16().chain(std::iter::once(0)).collect();
                body.write_u32::<LE>(units.len() as u32).unwrap();
                for unit in units {
                    body.write_u16::<LE>(unit).unwrap();
                }
            }
        }

        let mut body = Vec::new();
        body.write_u32::<LE>(0).unwrap();
        write_list(&mut body, textures);
        body.write_u32::<LE>(0).unwrap();
        write_list(&mut body, alphas);
        write_list(&mut body, models);

        let mut bytes = Vec::new();
        bytes.write_u32::<LE>(EFFECT_MAGIC).unwrap();
        bytes.write_u32::<LE>(EFFECT_VERSION).unwrap();
        bytes.write_u32::<LE>(INFO_MAGIC).unwrap();
        bytes.write_u32::<LE>(body.len() as u32).unwrap();
        bytes.extend_from_slice(&body);
        bytes
    }

    #[test]
    fn test_parse_all_lists() {
        let dir = Path::new("/project/effects");
        let bytes = encode_effect(
            &["Texture/Fire1.png", "Texture/Fire2.png"],
            &["Texture/Alpha.png"],
            &["Model/Sword.efkmodel", "Model/Shield.efkmodel", "Model/Bow.efkmodel"],
        );

        let paths = parse_effect(&bytes, dir).unwrap();

        assert_eq!(
            paths,
            vec![
                dir.join("Texture").join("Fire1.png"),
                dir.join("Texture").join("Fire2.png"),
                dir.join("Texture").join("Alpha.png"),
                dir.join("Model").join("Sword.efkmodel"),
                dir.join("Model").join("Shield.efkmodel"),
                dir.join("Model").join("Bow.efkmodel"),
            ]
        );
    }

    #[test]
    fn test_parse_empty_lists() {
        let bytes = encode_effect(&[], &[], &[]);
        assert!(parse_effect(&bytes, Path::new("/e")).unwrap().is_empty());
    }

    #[test]
    fn test_non_ascii_names() {
        let bytes = encode_effect(&["Texture/炎.png"], &[], &[]);
        let paths = parse_effect(&bytes, Path::new("/e")).unwrap();
        assert_eq!(paths, vec![Path::new("/e").join("Texture").join("炎.png")]);
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = encode_effect(&["a.png"], &[], &[]);
        bytes[0] = b'X';

        let err = parse_effect(&bytes, Path::new("/e")).unwrap_err();
        assert!(matches!(err, EffectError::BadMagic { .. }));
    }

    #[test]
    fn test_bad_version() {
        let mut bytes = encode_effect(&["a.png"], &[], &[]);
        bytes[4] = 1;

        let err = parse_effect(&bytes, Path::new("/e")).unwrap_err();
        assert!(matches!(err, EffectError::UnsupportedVersion(1)));
    }

    #[test]
    fn test_bad_info_chunk() {
        let mut bytes = encode_effect(&["a.png"], &[], &[]);
        bytes[8] = 0;

        let err = parse_effect(&bytes, Path::new("/e")).unwrap_err();
        assert!(matches!(err, EffectError::BadInfoChunk { .. }));
    }

    #[test]
    fn test_info_chunk_larger_than_file() {
        let mut bytes = encode_effect(&["a.png"], &[], &[]);
        let len = bytes.len() as u32;
        bytes[12..16].copy_from_slice(&len.to_le_bytes());

        let err = parse_effect(&bytes, Path::new("/e")).unwrap_err();
        assert!(matches!(err, EffectError::InfoChunkTooLarge { .. }));
    }

    #[test]
    fn test_truncated_inside_name() {
        let bytes = encode_effect(&["abcdefgh"], &[], &[]);
        // 截断在第一个资源名中间，并让 INFO 块大小仍小于截断后的长度
        let mut cut = bytes[..34].to_vec();
        cut[12..16].copy_from_slice(&20u32.to_le_bytes());

        let err = parse_effect(&cut, Path::new("/e")).unwrap_err();
        assert!(matches!(err, EffectError::Truncated));
    }

    #[test]
    fn test_truncated_header() {
        let err = parse_effect(&[0x46, 0x45], Path::new("/e")).unwrap_err();
        assert!(matches!(err, EffectError::Truncated));
    }

    #[test]
    fn test_name_length_exceeds_chunk() {
        let mut bytes = encode_effect(&["a.png"], &[], &[]);
        // 第一个资源名的长度字段紧跟在 header、reserved 与 count 之后
        bytes[24..28].copy_from_slice(&u32::MAX.to_le_bytes());

        let err = parse_effect(&bytes, Path::new("/e")).unwrap_err();
        assert!(matches!(err, EffectError::InvalidNameLength { .. }));
    }

    #[test]
    fn test_parse_effect_file_missing() {
        let err = parse_effect_file(Path::new("/definitely/missing.efkefc"), Path::new("/e"))
            .unwrap_err();
        assert!(matches!(err, EffectError::Io(_)));
    }
}

//! # 插件注册表
//!
//! `js/plugins.js` 由编辑器生成，形如：
//!
//! ```text
//! // Generated by RPG Maker.
//! // Do not edit this file directly.
//! var $plugins =
//! [
//! {"name":"AltMenuScreen","status":true,"description":"...","parameters":{}},
//! ...
//! ];
//! ```
//!
//! 这里只把数组字面量当作数据截取出来再按 JSON 解码，不执行脚本。

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::PluginError;

/// 注册表绑定名
const BINDING: &str = "$plugins";

/// 单个插件的注册信息
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PluginRegistration {
    pub name: String,
    pub status: bool,
    pub description: String,
    /// 参数名 → 用户配置的值（编辑器保存为字符串）
    pub parameters: BTreeMap<String, Value>,
}

impl PluginRegistration {
    /// 取字符串类型的参数值
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).and_then(Value::as_str)
    }
}

/// 解析插件注册脚本
pub fn parse_registration_script(text: &str) -> Result<Vec<PluginRegistration>, PluginError> {
    let binding = text.find(BINDING).ok_or(PluginError::MissingBinding)?;
    let rest = &text[binding + BINDING.len()..];

    let assign = rest.find('=').ok_or(PluginError::MissingBinding)?;
    let rest = &rest[assign + 1..];

    let open = rest.find('[').ok_or(PluginError::MissingBinding)?;
    let literal = array_literal(&rest[open..]).ok_or(PluginError::UnbalancedLiteral)?;

    Ok(serde_json::from_str(literal)?)
}

/// 截取从开头 `[` 到与之匹配的 `]` 的切片
///
/// 字符串字面量中的括号与转义字符不参与匹配。
fn array_literal(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => quote = Some(c),
            '[' | '{' => depth += 1,
            ']' | '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[..=i]);
                }
            }
            _ => {}
        }
    }

    None
}

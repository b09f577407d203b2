//! # 事件遍历
//!
//! 公共事件、敌群页、地图事件页共用的指令列表遍历逻辑。
//!
//! 每条指令形如 `{code, parameters}`，参数的结构完全取决于指令码，
//! 由 [`opcode`] 中的指令表描述。未知指令码、缺失或类型不符的参数都被静默跳过。

pub mod opcode;

use serde::Deserialize;
use serde_json::Value;

use crate::index::AssetIndex;

use opcode::{EVENT_OPCODES, MOVE_ROUTE_OPCODES, Opcode, ParamRule, lookup};

/// 事件指令
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventCommand {
    /// 指令码，`0` 表示空指令
    #[serde(default)]
    pub code: i64,
    /// 参数数组
    #[serde(default)]
    pub parameters: Vec<Value>,
}

/// 遍历指令列表，将引用的资源写入索引
pub fn traverse_events<'a>(
    commands: impl IntoIterator<Item = &'a EventCommand>,
    index: &mut AssetIndex,
) {
    for command in commands {
        if command.code == 0 {
            continue;
        }

        apply_command(EVENT_OPCODES, command.code, &command.parameters, index);
    }
}

/// 在给定指令表中执行一条指令
fn apply_command(table: &'static [Opcode], code: i64, parameters: &[Value], index: &mut AssetIndex) {
    let Some(opcode) = lookup(table, code) else {
        tracing::trace!(code, "跳过无关指令");
        return;
    };

    for rule in opcode.rules {
        apply_rule(rule, parameters, index);
    }
}

fn apply_rule(rule: &ParamRule, parameters: &[Value], index: &mut AssetIndex) {
    match *rule {
        ParamRule::Name { category, index: i } => {
            if let Some(name) = parameters.get(i).and_then(Value::as_str) {
                index.insert(category, name);
            }
        }
        ParamRule::AudioName { category, index: i } => {
            if let Some(name) = audio_name(parameters.get(i)) {
                index.insert(category, name);
            }
        }
        ParamRule::AnimationId { index: i } => {
            if let Some(id) = parameters.get(i).and_then(Value::as_i64) {
                index.insert_animation_id(id);
            }
        }
        ParamRule::MoveRoute { index: i } => {
            let Some(inner) = parameters.get(i) else {
                return;
            };

            let code = inner.get("code").and_then(Value::as_i64).unwrap_or(0);
            let inner_parameters = inner
                .get("parameters")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();

            apply_command(MOVE_ROUTE_OPCODES, code, inner_parameters, index);
        }
    }
}

/// 从 `{name, volume, pitch, pan}` 音频对象中取出名称
fn audio_name(value: Option<&Value>) -> Option<&str> {
    value?.get("name")?.as_str()
}

//! # 事件指令表
//!
//! 声明式地描述每个事件指令码如何从参数数组中提取资源引用。
//!
//! 指令码参考（仅列出与资源相关的部分）：
//!
//! | 指令码 | 含义 | 参数 |
//! |---|---|---|
//! | 101 | 显示文字（带脸图） | `[0]` 脸图名 |
//! | 132 / 241 | 更改战斗 BGM / 播放 BGM | `[0].name` |
//! | 133 / 139 / 249 | 更改胜利 ME / 战败 ME / 播放 ME | `[0].name` |
//! | 140 | 更改载具 BGM | `[1].name` |
//! | 212 / 337 | 显示动画 / 显示战斗动画 | `[1]` 动画 ID |
//! | 231 | 显示图片 | `[1]` 图片名 |
//! | 245 | 播放 BGS | `[0].name` |
//! | 250 | 播放 SE | `[0].name` |
//! | 261 | 播放影片 | `[0]` |
//! | 283 | 更改战斗背景 | `[0]` 背景1，`[1]` 背景2 |
//! | 284 | 更改远景 | `[0]` |
//! | 322 | 更改角色图像 | `[1]` 脸图，`[3]` 行走图，`[5]` 战斗图 |
//! | 323 | 更改载具图像 | `[1]` |
//! | 505 | 移动路线的子指令 | `[0]` 为嵌套的 `{code, parameters}` |
//!
//! 505 的嵌套指令只识别 41（更改行走图，`[0]`）与 44（播放 SE，`[0].name`）。

use crate::index::AssetCategory;

/// 单条参数提取规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamRule {
    /// `parameters[index]` 是资源名字符串
    Name {
        category: AssetCategory,
        index: usize,
    },
    /// `parameters[index].name` 是音频名
    AudioName {
        category: AssetCategory,
        index: usize,
    },
    /// `parameters[index]` 是动画 ID
    AnimationId { index: usize },
    /// `parameters[index]` 是嵌套的移动路线指令，按 [`MOVE_ROUTE_OPCODES`] 解析
    MoveRoute { index: usize },
}

/// 指令码及其提取规则
#[derive(Debug, Clone, Copy)]
pub struct Opcode {
    pub code: i64,
    pub rules: &'static [ParamRule],
}

const fn name(category: AssetCategory, index: usize) -> ParamRule {
    ParamRule::Name { category, index }
}

const fn audio(category: AssetCategory, index: usize) -> ParamRule {
    ParamRule::AudioName { category, index }
}

/// 事件列表指令表
pub const EVENT_OPCODES: &[Opcode] = &[
    Opcode {
        code: 101,
        rules: &[name(AssetCategory::Face, 0)],
    },
    Opcode {
        code: 132,
        rules: &[audio(AssetCategory::Bgm, 0)],
    },
    Opcode {
        code: 133,
        rules: &[audio(AssetCategory::Me, 0)],
    },
    Opcode {
        code: 139,
        rules: &[audio(AssetCategory::Me, 0)],
    },
    Opcode {
        code: 140,
        rules: &[audio(AssetCategory::Bgm, 1)],
    },
    Opcode {
        code: 212,
        rules: &[ParamRule::AnimationId { index: 1 }],
    },
    Opcode {
        code: 231,
        rules: &[name(AssetCategory::Picture, 1)],
    },
    Opcode {
        code: 241,
        rules: &[audio(AssetCategory::Bgm, 0)],
    },
    Opcode {
        code: 245,
        rules: &[audio(AssetCategory::Bgs, 0)],
    },
    Opcode {
        code: 249,
        rules: &[audio(AssetCategory::Me, 0)],
    },
    Opcode {
        code: 250,
        rules: &[audio(AssetCategory::Se, 0)],
    },
    Opcode {
        code: 261,
        rules: &[name(AssetCategory::Movie, 0)],
    },
    Opcode {
        code: 283,
        rules: &[
            name(AssetCategory::Battleback1, 0),
            name(AssetCategory::Battleback2, 1),
        ],
    },
    Opcode {
        code: 284,
        rules: &[name(AssetCategory::Parallax, 0)],
    },
    Opcode {
        code: 322,
        rules: &[
            name(AssetCategory::Face, 1),
            name(AssetCategory::Character, 3),
            name(AssetCategory::ActorBattler, 5),
        ],
    },
    Opcode {
        code: 323,
        rules: &[name(AssetCategory::Face, 1)],
    },
    Opcode {
        code: 337,
        rules: &[ParamRule::AnimationId { index: 1 }],
    },
    Opcode {
        code: 505,
        rules: &[ParamRule::MoveRoute { index: 0 }],
    },
];

/// 移动路线子指令表（505 的嵌套指令）
pub const MOVE_ROUTE_OPCODES: &[Opcode] = &[
    Opcode {
        code: 41,
        rules: &[name(AssetCategory::Character, 0)],
    },
    Opcode {
        code: 44,
        rules: &[audio(AssetCategory::Se, 0)],
    },
];

/// 在指令表中查找指令码
pub fn lookup(table: &'static [Opcode], code: i64) -> Option<&'static Opcode> {
    table.iter().find(|op| op.code == code)
}

//! # 插件参数声明
//!
//! 插件源码开头的 `/*: ... */` 注释块声明了插件的参数与依赖资源：
//!
//! ```text
//! /*:
//!  * @plugindesc 标题画面扩展
//!  * @requiredAssets img/system/Logo.png
//!  *
//!  * @param Background
//!  * @type file
//!  * @dir img/titles1/
//!  * @require 1
//!  * @default Castle
//!  */
//! ```
//!
//! 只有 `@type` 为 `file` 或 `animation` 的参数会被记录。

use tracing::warn;

/// 注释块起始标记
const BLOCK_START: &str = "/*:";
/// 注释块结束标记
const BLOCK_END: &str = "*/";

/// 参数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    File,
    Animation,
}

impl ParameterKind {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "file" => Some(Self::File),
            "animation" => Some(Self::Animation),
            _ => None,
        }
    }
}

/// 单个参数声明
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginParameter {
    pub name: String,
    pub default: Option<String>,
    pub required: bool,
    /// 资源目录，动画类型参数可以省略
    pub dir: Option<String>,
    pub kind: ParameterKind,
}

/// 插件声明
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginDescriptor {
    /// `@requiredAssets`，相对于工程根目录
    pub required_assets: Vec<String>,
    pub parameters: Vec<PluginParameter>,
}

/// 解析过程中尚未结束的参数
#[derive(Default)]
struct PendingParameter {
    name: String,
    default: Option<String>,
    required: bool,
    dir: Option<String>,
    kind: Option<ParameterKind>,
}

impl PluginDescriptor {
    /// 从插件源码解析声明
    ///
    /// `plugin` 只用于日志。没有声明块时返回空声明。
    pub fn parse(source: &str, plugin: &str) -> Self {
        let mut descriptor = Self::default();

        let Some(block) = declaration_block(source) else {
            return descriptor;
        };

        let mut pending: Option<PendingParameter> = None;

        for (directive, value) in directives(block) {
            match directive {
                "@requiredAssets" => {
                    descriptor.required_assets.push(value.to_string());
                    continue;
                }
                "@param" => {
                    if let Some(param) = pending.take() {
                        descriptor.close(param, plugin);
                    }
                    pending = Some(PendingParameter {
                        name: value.to_string(),
                        ..Default::default()
                    });
                    continue;
                }
                _ => {}
            }

            let Some(param) = pending.as_mut() else {
                continue;
            };

            match directive {
                "@default" => param.default = Some(value.to_string()),
                "@require" => param.required = value == "1",
                "@dir" => param.dir = Some(value.to_string()),
                "@type" => match ParameterKind::parse(value) {
                    Some(kind) => param.kind = Some(kind),
                    None => {
                        warn!(plugin, param = %param.name, kind = value, "未知的参数类型");
                    }
                },
                _ => {}
            }
        }

        if let Some(param) = pending.take() {
            descriptor.close(param, plugin);
        }

        descriptor
    }

    /// 结束一个参数声明
    fn close(&mut self, param: PendingParameter, plugin: &str) {
        if param.name.is_empty() {
            warn!(plugin, "参数缺少名称，已忽略");
            return;
        }

        let Some(kind) = param.kind else {
            return;
        };

        self.parameters.push(PluginParameter {
            name: param.name,
            default: param.default,
            required: param.required,
            dir: param.dir,
            kind,
        });
    }
}

/// 截取 `/*:` 与其后第一个 `*/` 之间的内容（不含起始行）
fn declaration_block(source: &str) -> Option<&str> {
    let start = source.find(BLOCK_START)?;
    let body = &source[start..];
    let end = body.find(BLOCK_END).unwrap_or(body.len());
    let body = &body[..end];

    // 起始行上 `/*:` 之后的内容是语言标记（如 `/*:ja`），不参与解析
    Some(body.split_once('\n').map_or("", |(_, rest)| rest))
}

/// 把声明块拆成 `(指令, 值)` 序列
///
/// 每行去掉行首的 `*` 后首尾去空白，空行跳过；指令与值以第一个空格分隔。
fn directives(block: &str) -> impl Iterator<Item = (&str, &str)> {
    block
        .lines()
        .map(|line| {
            let line = line.trim_start();
            line.strip_prefix('*').unwrap_or(line).trim()
        })
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(char::is_whitespace) {
            Some((directive, value)) => (directive, value.trim()),
            None => (line, ""),
        })
}

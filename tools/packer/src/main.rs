//! # Packer
//!
//! RPG Maker MV/MZ 工程打包工具 - 解析游戏数据中的资源引用，列出或剔除未使用的资源。
//!
//! ## 用法
//!
//! ```bash
//! # 在项目根目录使用 cargo 运行
//! cargo run -p packer -- scan --input path/to/project
//! cargo run -p packer -- unused --input path/to/project
//! cargo run -p packer -- export --input path/to/project --output dist
//!
//! # 或安装后直接使用
//! cargo install --path tools/packer
//! packer scan -i game
//! packer unused -i game --skip-broken-effects
//! packer export -i game -o dist --no-plugins
//! ```
//!
//! ## 配置
//!
//! 优先级：命令行参数 > 配置文件（`--config`，默认读取当前目录的 `packer.json`）> 默认值。

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use walkdir::WalkDir;

use rpgm_assets::{
    AssetIndex, EffectFailurePolicy, EngineVersion, PathRegistry, ResolveConfig, UsageFilter,
    resolve_with_registry,
};

/// 默认配置文件
const DEFAULT_CONFIG: &str = "packer.json";

#[derive(Parser)]
#[command(name = "packer")]
#[command(about = "RPG Maker 工程打包工具 - 解析资源引用并剔除未使用的资源")]
#[command(version, author)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 工程目录（默认：当前目录）
    #[arg(short, long, default_value = ".", global = true)]
    input: PathBuf,

    /// 配置文件路径（默认：packer.json，不存在时使用默认配置）
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,

    /// 特效文件解析失败时跳过而不是中止
    #[arg(long, global = true)]
    skip_broken_effects: bool,

    /// 不解析插件依赖
    #[arg(long, global = true)]
    no_plugins: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// 输出资源引用索引（JSON）
    Scan,

    /// 列出未使用的资源
    Unused,

    /// 复制所有被使用的文件到输出目录
    Export {
        /// 输出目录
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = real_main(cli) {
        eprintln!("❌ {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn real_main(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;

    if !cli.input.is_dir() {
        bail!("工程目录不存在: {}", cli.input.display());
    }

    let registry = PathRegistry::new(&cli.input);
    let version = EngineVersion::identify(registry.top())?;
    info!(root = %registry.top().display(), version = %version, "识别到工程");

    let index = resolve_with_registry(&registry, version, &config)
        .with_context(|| format!("解析工程 {} 失败", registry.top().display()))?;

    match cli.command {
        Commands::Scan => scan(&index),
        Commands::Unused => list_unused(&index, &registry, version),
        Commands::Export { output } => export(&index, &registry, version, &output),
    }
}

/// 合并配置：命令行参数 > 配置文件 > 默认值
fn load_config(cli: &Cli) -> anyhow::Result<ResolveConfig> {
    let mut config = match &cli.config {
        Some(path) => ResolveConfig::load(path)
            .with_context(|| format!("读取配置文件 {} 失败", path.display()))?,
        None if Path::new(DEFAULT_CONFIG).is_file() => ResolveConfig::load(DEFAULT_CONFIG)
            .with_context(|| format!("读取配置文件 {DEFAULT_CONFIG} 失败"))?,
        None => ResolveConfig::default(),
    };

    if cli.skip_broken_effects {
        config.effect_failure = EffectFailurePolicy::Skip;
    }
    if cli.no_plugins {
        config.include_plugins = false;
    }

    debug!(?config, "最终配置");
    Ok(config)
}

/// 输出索引
fn scan(index: &AssetIndex) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(index)?;
    println!("{json}");
    Ok(())
}

/// 列出未使用的资源
fn list_unused(
    index: &AssetIndex,
    registry: &PathRegistry,
    version: EngineVersion,
) -> anyhow::Result<()> {
    let unused = unused_files(index, registry, version);
    let total_size: u64 = unused.iter().map(|(_, size)| size).sum();

    for (path, size) in &unused {
        let relative = path.strip_prefix(registry.top()).unwrap_or(path);
        println!("{:<60} {:>12}", relative.display(), format_size(*size));
    }

    println!("{}", "-".repeat(74));
    println!(
        "{:<60} {:>12}",
        format!("共 {} 个未使用的文件", unused.len()),
        format_size(total_size)
    );

    Ok(())
}

/// 收集未使用的文件及其大小
fn unused_files(
    index: &AssetIndex,
    registry: &PathRegistry,
    version: EngineVersion,
) -> Vec<(PathBuf, u64)> {
    let filter = UsageFilter::new(index, registry, version);

    project_files(registry.top(), None)
        .filter(|entry| filter.is_unused(entry.path()))
        .map(|entry| {
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            (entry.into_path(), size)
        })
        .collect()
}

/// 复制被使用的文件
fn export(
    index: &AssetIndex,
    registry: &PathRegistry,
    version: EngineVersion,
    output: &Path,
) -> anyhow::Result<()> {
    let output = rpgm_assets::path::absolute_path(output);
    if output == registry.top() {
        bail!("输出目录不能与工程目录相同: {}", output.display());
    }

    println!("📦 导出工程: {} -> {}", registry.top().display(), output.display());

    let filter = UsageFilter::new(index, registry, version);

    let mut copied = 0usize;
    let mut skipped = 0usize;
    let mut total_size = 0u64;

    for entry in project_files(registry.top(), Some(&output)) {
        let path = entry.path();
        if filter.is_unused(path) {
            skipped += 1;
            continue;
        }

        let relative = path.strip_prefix(registry.top())?;
        let target = output.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("创建目录 {} 失败", parent.display()))?;
        }

        total_size += fs::copy(path, &target)
            .with_context(|| format!("复制 {} 失败", path.display()))?;
        copied += 1;
    }

    println!();
    println!("✅ 导出完成！");
    println!("   复制文件数: {copied}");
    println!("   剔除文件数: {skipped}");
    println!("   总大小: {}", format_size(total_size));

    Ok(())
}

/// 遍历工程中的所有文件，跳过 `exclude` 目录
fn project_files<'a>(
    root: &Path,
    exclude: Option<&'a Path>,
) -> impl Iterator<Item = walkdir::DirEntry> + 'a {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(move |e| exclude.is_none_or(|dir| !e.path().starts_with(dir)))
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "跳过无法访问的路径");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
}

/// 格式化文件大小
fn format_size(size: u64) -> String {
    if size < 1024 {
        format!("{} B", size)
    } else if size < 1024 * 1024 {
        format!("{:.1} KB", size as f64 / 1024.0)
    } else {
        format!("{:.2} MB", size as f64 / 1024.0 / 1024.0)
    }
}

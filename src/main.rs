use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use locale_editor::{
    CodecRegistry, EditConfig, EditEngine, EditOutcome, Locale, TranslationFileSet,
    TranslationFileType, SUPPORTED_EXTENSIONS,
};

/// 支持的编辑操作
const OPERATIONS: &[&str] = &["add", "move", "copy", "delete", "outdated"];

#[derive(Parser)]
#[command(name = "locale_editor")]
#[command(about = "批量重组翻译文件（JSON/YAML/CSV）中的条目")]
#[command(version = "0.3.0")]
struct Cli {
    /// 翻译文件所在目录
    #[arg(short, long)]
    dir: PathBuf,

    /// 文件类型(json/yaml/csv)
    #[arg(long, default_value = "json")]
    file_type: String,

    /// 启用命名空间模式(路径首段为命名空间名)
    #[arg(long)]
    namespaces: bool,

    /// 基准语言
    #[arg(long, default_value = "en")]
    base_locale: String,

    /// 覆盖文件前创建备份
    #[arg(long)]
    backup: bool,

    /// 显示文件集合统计信息
    #[arg(long)]
    stats: bool,

    /// 静默模式(仅输出错误)
    #[arg(long)]
    quiet: bool,

    /// 编辑操作(add/move/copy/delete/outdated)
    operation: Option<String>,

    /// 操作参数
    args: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = build_config(&cli)?;
    validate_input(&cli)?;

    let set = TranslationFileSet::load_from_directory(&cli.dir, config, CodecRegistry::with_defaults())
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("加载目录失败: {:?}", cli.dir))?;

    if cli.stats {
        return handle_stats(&cli, &set);
    }

    let operation = validate_operation(&cli)?;
    let engine = EditEngine::new(&set);

    let outcome = run_operation(&engine, &operation, &cli.args)?;
    print_outcome(&cli, &outcome);

    Ok(())
}

/// 构造编辑配置
fn build_config(cli: &Cli) -> Result<EditConfig> {
    let file_type = TranslationFileType::from_extension(&cli.file_type).ok_or_else(|| {
        anyhow::anyhow!(
            "不支持的文件类型: {}（可选值: {}）",
            cli.file_type,
            SUPPORTED_EXTENSIONS.join(", ")
        )
    })?;

    let base_locale = Locale::from_str(&cli.base_locale)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("无效的基准语言: {}", cli.base_locale))?;

    Ok(EditConfig {
        file_type,
        namespaces: cli.namespaces,
        base_locale,
        backup: cli.backup,
    })
}

/// 验证输入目录
fn validate_input(cli: &Cli) -> Result<()> {
    if !cli.dir.is_dir() {
        bail!("目录不存在: {:?}", cli.dir);
    }
    Ok(())
}

/// 验证操作名和参数数量
fn validate_operation(cli: &Cli) -> Result<String> {
    let operation = match &cli.operation {
        Some(operation) => operation.clone(),
        None => bail!("缺少操作名（可选值: {}）", OPERATIONS.join(", ")),
    };

    if !OPERATIONS.contains(&operation.as_str()) {
        bail!(
            "无效的操作: {}（可选值: {}）",
            operation,
            OPERATIONS.join(", ")
        );
    }

    let expected = match operation.as_str() {
        "add" => ("<locale> <path> <value>", 3),
        "move" | "copy" => ("<originPath> <destinationPath>", 2),
        _ => ("<path>", 1),
    };

    if cli.args.len() != expected.1 {
        bail!("操作 {} 需要参数: {}", operation, expected.0);
    }

    Ok(operation)
}

/// 分发并执行编辑操作
fn run_operation(engine: &EditEngine, operation: &str, args: &[String]) -> Result<EditOutcome> {
    let outcome = match operation {
        "move" => engine.move_entry(&args[0], &args[1]),
        "copy" => engine.copy_entry(&args[0], &args[1]),
        "delete" => engine.delete_path(&args[0]),
        "outdated" => engine.flag_outdated(&args[0]),
        "add" => engine.add_entry(&args[0], &args[1], &args[2]),
        _ => unreachable!("操作名已验证"),
    };

    outcome
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("执行 {} 失败", operation))
}

/// 处理统计模式
fn handle_stats(cli: &Cli, set: &TranslationFileSet) -> Result<()> {
    let stats = set
        .stats()
        .map_err(|e| anyhow::anyhow!("{}", e))
        .context("读取统计信息失败")?;
    if !cli.quiet {
        print!("{}", stats);
    }
    Ok(())
}

/// 打印进度行和摘要
fn print_outcome(cli: &Cli, outcome: &EditOutcome) {
    if cli.quiet {
        return;
    }

    for change in outcome.iter() {
        println!("{}", change);
    }
    println!("{}", outcome.summary());
}

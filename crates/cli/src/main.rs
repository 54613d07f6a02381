//! # sinkctl
//!
//! 命令行接口入口点。
//!
//! 提供：
//! - Decoder 配置加载与 registry 发布
//! - Payload 校验，报告字段级错误
//! - Registry 列表

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::{run_info, run_types, run_validate};
use sink_decoder::DecoderConfig;

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli)?;

    info!(version = env!("CARGO_PKG_VERSION"), "sinkctl starting");

    let config = load_decoder_config(&cli)?;
    publish_registry(&config)?;

    let result = match &cli.command {
        Commands::Validate(args) => run_validate(args, &config),
        Commands::Types(args) => run_types(args),
        Commands::Info(args) => run_info(args, &config),
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

/// 根据 CLI 选项初始化日志
///
/// `-q` 强制 error 级别；否则 `RUST_LOG` 优先于 `-v` 计数。
fn init_logging(cli: &Cli) -> Result<()> {
    let filter = if cli.quiet {
        EnvFilter::new(cli.default_log_level())
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(cli.default_log_level()))
    };

    observability::init_with_filter(cli.log_format.into(), filter)
}

fn load_decoder_config(cli: &Cli) -> Result<DecoderConfig> {
    match &cli.config {
        Some(path) => DecoderConfig::load_from_path(path)
            .with_context(|| format!("Failed to load decoder config from {}", path.display())),
        None => Ok(DecoderConfig::default()),
    }
}

/// 构建 registry 并在解码任何 payload 之前发布一次
fn publish_registry(config: &DecoderConfig) -> Result<()> {
    let registry = config
        .build_registry()
        .context("Invalid sink type registration")?;
    let registry = sink_registry::install(registry).context("Failed to publish registry")?;
    observability::record_registered_sink_types(registry.len());
    Ok(())
}

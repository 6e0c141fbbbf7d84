//! mattermost-github CLI
//!
//! 把 GitHub webhook 事件转成 Mattermost 消息

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use mattermost_github::{server, Config, EventRecord, Notifier, Outcome};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "mmgh")]
#[command(about = "Format GitHub webhook events as Mattermost messages")]
#[command(version)]
struct Cli {
    /// 配置文件路径（默认 ~/.config/mattermost-github/config.json）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 启动 webhook HTTP 服务
    Serve {
        /// 监听地址（覆盖配置）
        #[arg(long)]
        address: Option<String>,
        /// Dry-run 模式（只打印不发送）
        #[arg(long)]
        dry_run: bool,
    },
    /// 格式化一条事件并打印消息
    Format {
        /// 事件名（X-GitHub-Event）
        #[arg(long, short)]
        event: String,
        /// 事件 JSON 文件，缺省从 stdin 读取
        #[arg(long, short)]
        file: Option<PathBuf>,
    },
    /// 格式化一条事件并投递到 Mattermost
    Notify {
        /// 事件名（X-GitHub-Event）
        #[arg(long, short)]
        event: String,
        /// 事件 JSON 文件，缺省从 stdin 读取
        #[arg(long, short)]
        file: Option<PathBuf>,
        /// Dry-run 模式（只打印不发送）
        #[arg(long)]
        dry_run: bool,
    },
}

fn read_record(file: Option<&PathBuf>) -> Result<EventRecord> {
    let content = match file {
        Some(path) => std::fs::read(path)
            .map_err(|e| anyhow!("Cannot read {}: {}", path.display(), e))?,
        None => std::io::read_to_string(std::io::stdin())?.into_bytes(),
    };
    EventRecord::from_slice(&content).map_err(|e| anyhow!("Invalid event JSON: {}", e))
}

fn main() -> Result<()> {
    // 通过 RUST_LOG 环境变量控制日志级别，默认为 info
    // 例如: RUST_LOG=debug mmgh serve
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mattermost_github=info,mmgh=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { address, dry_run } => {
            if let Some(address) = address {
                config.server.address = address;
            }
            // 阻塞 HTTP 客户端必须在异步运行时之外创建和销毁
            let notifier = Arc::new(Notifier::from_config(config, dry_run)?);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(notifier.clone()))?;
            drop(runtime);
            drop(notifier);
        }
        Commands::Format { event, file } => {
            let record = read_record(file.as_ref())?;
            let notifier = Notifier::from_config(config, true)?;
            match notifier.render(&event, &record)? {
                Some(message) => println!("{}", message),
                None => eprintln!("Event `{}` produces no message", event),
            }
        }
        Commands::Notify { event, file, dry_run } => {
            let record = read_record(file.as_ref())?;
            let notifier = Notifier::from_config(config, dry_run)?;
            let outcome = notifier.handle(&event, &record)?;
            info!(event = %event, outcome = ?outcome, "Event handled");
            if let Outcome::Failed { route, error } = outcome {
                return Err(anyhow!("Failed to post to route {}: {}", route, error));
            }
        }
    }

    Ok(())
}

//! ARQ 仿真命令行
//!
//! 在有丢包/损坏/时延的模拟信道上运行交替位或 Go-Back-N 协议，
//! 结束后打印统计信息。

use clap::Parser;
use arq_sim::config::SimConfig;
use arq_sim::proto::Protocol;
use arq_sim::scenario::Scenario;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "arq-sim", about = "可靠传输协议仿真：交替位 / Go-Back-N")]
struct Args {
    /// JSON 配置文件；命令行参数会覆盖其中的字段
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    protocol: Option<Protocol>,

    /// 应用层生成的消息数
    #[arg(long)]
    messages: Option<u64>,

    /// 丢包概率 [0, 1]
    #[arg(long)]
    loss: Option<f64>,

    /// 损坏概率 [0, 1]
    #[arg(long)]
    corrupt: Option<f64>,

    /// 应用层消息平均间隔（时间单位）
    #[arg(long)]
    avg_delay: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,

    /// 重传定时器间隔（时间单位）
    #[arg(long)]
    timeout: Option<u64>,

    /// Go-Back-N 窗口大小
    #[arg(long)]
    window: Option<usize>,

    /// Go-Back-N 发送缓冲容量
    #[arg(long)]
    buffer: Option<usize>,

    /// 仿真时间上限（时间单位）
    #[arg(long)]
    max_time: Option<u64>,

    /// 日志详细程度：0=warn 1=info 2=debug 3=trace（设置了 RUST_LOG 时以其为准）
    #[arg(long, default_value_t = 0)]
    trace: u8,

    /// 输出统计 JSON 文件
    #[arg(long)]
    stats_json: Option<PathBuf>,

    /// 输出时间线 JSON 文件
    #[arg(long)]
    timeline_json: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> Result<SimConfig, arq_sim::error::ConfigError> {
        let mut cfg = match &self.config {
            Some(path) => SimConfig::from_json_file(path)?,
            None => SimConfig::default(),
        };
        if let Some(v) = self.protocol {
            cfg.protocol = v;
        }
        if let Some(v) = self.messages {
            cfg.num_messages = v;
        }
        if let Some(v) = self.loss {
            cfg.loss_prob = v;
        }
        if let Some(v) = self.corrupt {
            cfg.corrupt_prob = v;
        }
        if let Some(v) = self.avg_delay {
            cfg.avg_delay = v;
        }
        if let Some(v) = self.seed {
            cfg.seed = v;
        }
        if let Some(v) = self.timeout {
            cfg.timeout_units = v;
        }
        if let Some(v) = self.window {
            cfg.window = v;
        }
        if let Some(v) = self.buffer {
            cfg.buffer_capacity = v;
        }
        if let Some(v) = self.max_time {
            cfg.max_time_units = v;
        }
        Ok(cfg)
    }
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.trace {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let cfg = match args.config() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };
    let mut scenario = match Scenario::new(cfg) {
        Ok(s) => s,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };
    if args.timeline_json.is_some() {
        scenario.enable_timeline();
    }

    let run = scenario.run();

    if let Some(path) = &args.timeline_json {
        if let Some(t) = scenario.take_timeline() {
            if let Err(err) = write_json(path, &t.events) {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
            eprintln!("wrote timeline to {}", path.display());
        }
    }
    if let Some(path) = &args.stats_json {
        if let Err(err) = write_json(path, &run) {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
        eprintln!("wrote stats to {}", path.display());
    }

    let c = run.report.counters;
    println!("protocol: {:?}", run.protocol);
    println!(
        "messages: generated={}, accepted={}, delivered={}",
        run.messages_generated,
        run.messages_accepted,
        run.delivered.len()
    );
    println!("Packets lost: {}%", run.report.lost_pct);
    println!("Packets corrupted: {}%", run.report.corrupt_pct);
    println!("Application packets: {}", c.application);
    println!("Successful packets: {}", c.successful);
    println!("Total packets: {}", c.total);
    println!(
        "channel: offered={}, lost={}, corrupted={}, delivered={}",
        run.channel.offered, run.channel.lost, run.channel.corrupted, run.channel.delivered
    );
    println!(
        "done @ {:.3}: events={}, truncated={}",
        run.final_time, run.events, run.truncated
    );
    ExitCode::SUCCESS
}

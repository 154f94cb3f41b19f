// ==========================================
// 配方替代优化系统 - 命令行入口
// ==========================================
// 用法:
//   recipe-optimizer [OPTIONS] [request.json]
//
// 选项:
//   --catalog <path>  指定原料目录文件（覆盖配置）
//   --text            输出可读报告而非 JSON
//   --batch           请求为 JSON 数组,并发优化
//   --summary         仅输出目录概况
//
// 未指定请求文件时从 stdin 读取;结果写 stdout,日志写 stderr
// ==========================================

use anyhow::{bail, Context};
use recipe_optimizer::app::{self, map_api_error, AppState};
use recipe_optimizer::logging;
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, Default)]
struct CliArgs {
    request_path: Option<PathBuf>,
    catalog_path: Option<PathBuf>,
    text: bool,
    batch: bool,
    summary: bool,
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut cli = CliArgs::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--text" => cli.text = true,
            "--batch" => cli.batch = true,
            "--summary" => cli.summary = true,
            "--catalog" => {
                let path = args.next().context("--catalog 需要文件路径")?;
                cli.catalog_path = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                println!(
                    "用法: recipe-optimizer [--catalog <path>] [--text] [--batch] [--summary] [request.json]"
                );
                std::process::exit(0);
            }
            other if other.starts_with("--") => bail!("未知选项: {}", other),
            other => {
                if cli.request_path.is_some() {
                    bail!("只能指定一个请求文件");
                }
                cli.request_path = Some(PathBuf::from(other));
            }
        }
    }

    if cli.text && cli.batch {
        bail!("--text 与 --batch 不能同时使用");
    }
    Ok(cli)
}

fn read_payload(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("读取请求文件失败: {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("读取 stdin 失败")?;
            Ok(buf)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = parse_args()?;

    // 配置失败与目录加载失败同属启动期错误
    let mut config = match AppState::resolve_config(|key| std::env::var(key).ok()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("配置加载失败: {}", e);
            println!("{}", map_api_error(e));
            std::process::exit(2);
        }
    };
    if let Some(path) = cli.catalog_path.clone() {
        config.catalog_path = path;
    }

    // 初始化日志系统
    logging::init(&config.log_filter, config.log_json);

    tracing::info!("==================================================");
    tracing::info!("{} v{}", recipe_optimizer::APP_NAME, recipe_optimizer::VERSION);
    tracing::info!("==================================================");
    tracing::info!(
        catalog_path = %config.catalog_path.display(),
        amount_tolerance = config.amount_tolerance,
        log_filter = %config.log_filter,
        "配置加载完成"
    );

    // 目录加载失败即终止
    let state = match AppState::new(config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("AppState初始化失败: {}", e);
            println!("{}", map_api_error(e));
            std::process::exit(2);
        }
    };

    if cli.summary {
        match app::get_catalog_summary(&state) {
            Ok(json) => println!("{}", json),
            Err(envelope) => {
                println!("{}", envelope);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let payload = read_payload(cli.request_path.as_ref())?;

    let outcome = if cli.batch {
        app::optimize_recipes(&state, &payload).await
    } else if cli.text {
        state
            .recipe_api
            .optimize_json(&payload)
            .map(|recipe| recipe.render_report())
            .map_err(map_api_error)
    } else {
        app::optimize_recipe(&state, &payload)
    };

    match outcome {
        Ok(out) => {
            print!("{}", out);
            if !out.ends_with('\n') {
                println!();
            }
            Ok(())
        }
        Err(envelope) => {
            println!("{}", envelope);
            std::process::exit(1);
        }
    }
}

// ==========================================
// 応募者ランキング - 命令行入口
// ==========================================
// 用法: candidate-ranker <FILE> [--page N] [--sort KEY]... [--json]
// ==========================================

use anyhow::{Context, Result};
use candidate_ranker::api::CandidateApi;
use candidate_ranker::config::RankerConfig;
use candidate_ranker::domain::{CandidateField, SortKey};
use candidate_ranker::view::PageView;
use candidate_ranker::{logging, APP_NAME, VERSION};
use clap::Parser;
use std::path::PathBuf;

/// Load an applicant list, optionally rank it remotely, and print one page
#[derive(Parser, Debug)]
#[command(name = "candidate-ranker")]
#[command(version, about, long_about = None)]
struct Args {
    /// Applicant list (.csv / .xlsx / .xls)
    file: PathBuf,

    /// Page to print (1-based)
    #[arg(short, long, default_value = "1")]
    page: usize,

    /// Sort priority, highest first (能力試験JLPT / jlpt, 学校名 / school-name)
    #[arg(short, long = "sort", value_name = "KEY")]
    sort: Vec<SortKey>,

    /// Print the page as JSON
    #[arg(long)]
    json: bool,

    /// Ranking service base URL (overrides config file and environment)
    #[arg(long, value_name = "URL")]
    api_base_url: Option<String>,

    /// Config file (TOML)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    tracing::info!("{} v{}", APP_NAME, VERSION);

    let config = RankerConfig::load(args.config.as_deref())
        .context("配置加载失败")?
        .with_base_url(args.api_base_url.clone());

    let mut api = CandidateApi::from_config(&config)?;

    let summary = api
        .load_file(&args.file)
        .await
        .with_context(|| format!("无法加载 {}", args.file.display()))?;
    tracing::info!(
        source = %summary.source_kind,
        loaded = summary.loaded,
        dropped = summary.dropped,
        "加载完成"
    );

    let outcome = if args.sort.is_empty() {
        None
    } else {
        api.set_priorities(&args.sort)?;
        let outcome = api.sort_selected().await?;
        tracing::info!(request_id = %outcome.request_id, "排序完成");
        Some(outcome)
    };

    let page = api.go_to_page(args.page);

    if args.json {
        let output = serde_json::json!({ "sort": outcome, "page": page });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_table(&page);
    }

    Ok(())
}

fn print_table(page: &PageView) {
    if page.total_records == 0 {
        println!("データがありません");
        return;
    }

    println!("{}", page.headers.join(" | "));
    for row in &page.rows {
        let cells: Vec<String> = CandidateField::ALL.iter().map(|f| row.cell_text(*f)).collect();
        println!("{}", cells.join(" | "));
    }
    println!();
    println!("Page {} of {}", page.current_page, page.total_pages);
}

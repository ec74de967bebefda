// wosgift-cli/src/main.rs

use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use wosgift_core::{
    parse_fids, BatchRunner, GiftCodeApi, ReqwestClient, RunState, Transport,
};

#[derive(Parser, Debug, Clone)]
#[command(name = "wosgift")]
#[command(author, version, about = "Batch gift-code redemption across player fids")]
struct Args {
    /// Comma-separated list of player fids
    #[arg(long)]
    fids: String,

    /// Gift code to redeem for every fid; omit to only fetch profiles
    #[arg(long)]
    code: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("wosgift=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)
        .expect("Failed to set global subscriber");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let fids = parse_fids(&args.fids);
    if fids.is_empty() {
        anyhow::bail!("no fids supplied");
    }
    info!("processing {} fids", fids.len());

    let transport = Transport::new(Arc::new(ReqwestClient::new()));
    let runner = BatchRunner::new(GiftCodeApi::new(transport));

    let report = match &args.code {
        Some(code) => runner.redeem_all(&fids, code).await,
        None => runner.fetch_profiles(&fids).await,
    };

    for rec in report.result.records() {
        println!("{}\t{}\t{}", rec.fid, rec.nickname, rec.msg);
    }

    if report.state == RunState::Aborted {
        let msg = report
            .error
            .unwrap_or_else(|| "unknown error".to_string());
        error!("run aborted: {msg}");
        anyhow::bail!("run aborted: {msg}");
    }

    info!("done: {} records", report.result.len());
    Ok(())
}

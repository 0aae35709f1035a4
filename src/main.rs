use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use p2p_router::api::{create_api_router, ApiState};
use p2p_router::cli::{Cli, Command};
use p2p_router::config::AppConfig;
use p2p_router::format::RouteFormatter;
use p2p_router::offers::Catalog;
use p2p_router::router::{list_banks, RouteOptimizer, RouteResult};

fn main() -> Result<()> {
    init_tracing().context("initialize tracing subscriber")?;

    if let Err(err) = run() {
        tracing::error!(error = ?err, "fatal router error");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("load configuration")?;

    match cli.command {
        Command::Route {
            catalog,
            amount,
            max_offers,
            bank,
            json,
        } => route(&config, &catalog, amount, max_offers, bank.as_deref(), json),
        Command::Banks { catalog } => {
            let catalog = Catalog::load(&catalog)?;
            for bank in list_banks(catalog.as_slice()) {
                println!("{bank}");
            }
            Ok(())
        }
        Command::Serve { bind } => {
            let addr = bind.unwrap_or(config.api.bind);
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("build tokio runtime")?
                .block_on(serve(config, addr))
        }
    }
}

fn route(
    config: &AppConfig,
    catalog: &Path,
    amount: f64,
    max_offers: Option<usize>,
    bank: Option<&str>,
    json: bool,
) -> Result<()> {
    let catalog = Catalog::load(catalog)?;
    let optimizer = RouteOptimizer::new(config.optimizer.clone());
    let max_offers = max_offers.unwrap_or(config.optimizer.max_offers_per_route);

    let result = optimizer
        .compute_best_route(catalog.as_slice(), amount, max_offers, bank)
        .context("compute best route")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&RouteFormatter::from_config(&config.display), &result);
    }
    Ok(())
}

fn print_result(formatter: &RouteFormatter, result: &RouteResult) {
    let summary = &result.summary;
    println!(
        "{} {} using {} offer(s)",
        summary.direction, result.target_amount, summary.offers_used
    );
    for (rank, route) in result.ranked().enumerate() {
        let f = formatter.format_route(route);
        let label = if rank == 0 { "best".to_string() } else { format!("alt {rank}") };
        println!(
            "[{label}] cost {} | avg {} | efficiency {} | savings {}",
            f.total_cost, f.average_price, f.efficiency, f.savings
        );
        for leg in &route.offers_used {
            println!(
                "    {:<16} {:>12.4} @ {} ({})",
                leg.offer.id,
                leg.amount,
                formatter.currency(leg.offer.price),
                leg.offer.counterparty.display_name
            );
        }
    }
    println!(
        "evaluated {} combinations, {} feasible; worst case {}",
        summary.combinations_evaluated,
        summary.feasible_routes,
        formatter.currency(summary.worst_case_cost)
    );
}

async fn serve(config: AppConfig, addr: SocketAddr) -> Result<()> {
    let state = Arc::new(ApiState {
        optimizer: RouteOptimizer::new(config.optimizer.clone()),
        formatter: RouteFormatter::from_config(&config.display),
    });
    let app = create_api_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind API server address {addr}"))?;
    info!(
        address = %addr,
        max_offers_per_route = config.optimizer.max_offers_per_route,
        max_combinations = config.optimizer.max_combinations,
        "HTTP API server starting"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server error")?;
    info!("Shutdown signal received, exiting");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "ctrl_c listener error");
    }
}

fn init_tracing() -> Result<()> {
    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("tracing subscriber init: {err}"))
}

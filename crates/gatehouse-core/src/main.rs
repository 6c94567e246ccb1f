use anyhow::{Context, Result};
use clap::Parser;
use gatehouse_flags::{build_init_flags, InitFlags, RawCookieJar};
use gatehouse_js::{JsInterop, Runtime};
use gatehouse_server::{Secrets, ServerConfig};
use std::path::PathBuf;

mod cli;
use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("GATEHOUSE_LOG").unwrap_or_else(|_| {
            "gatehouse=info,gatehouse_server=info,tower_http=debug,axum::rejection=trace".into()
        }))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "gatehouse starting");

    match args.command {
        cli::Command::Serve {
            config,
            bind,
            ui_dir,
        } => serve(config, bind, ui_dir).await,
        cli::Command::Flags { cookie, name } => print_flags(&cookie, &name),
        cli::Command::Run { script, name } => run_script(script, &name),
        cli::Command::Eval {
            expression,
            cookie,
            name,
        } => eval_expression(&expression, &cookie, &name),
    }
}

async fn serve(
    config_path: Option<PathBuf>,
    bind: Option<std::net::SocketAddr>,
    ui_dir: Option<PathBuf>,
) -> Result<()> {
    let secrets = Secrets::from_env()?;
    let mut config = ServerConfig::load(config_path.as_deref())?;
    if let Some(bind) = bind {
        config.bind = bind;
    }
    if let Some(ui_dir) = ui_dir {
        config.ui_dir = ui_dir;
    }

    tracing::info!(bind = %config.bind, "starting server mode");
    gatehouse_server::serve(&config, secrets).await?;
    Ok(())
}

fn print_flags(cookie: &str, name: &str) -> Result<()> {
    let flags = build_init_flags(&RawCookieJar::new(cookie), name)?;
    emit(&flags)
}

fn run_script(script: PathBuf, name: &str) -> Result<()> {
    let source = std::fs::read_to_string(&script)
        .with_context(|| format!("cannot read {}", script.display()))?;

    let runtime = Runtime::new()?;
    tracing::info!(path = ?script, backend = runtime.backend_name(), "executing script");
    runtime.execute_script(&source)?;

    let flags = JsInterop::new(name).start(&runtime)?;
    emit(&flags)
}

fn eval_expression(expression: &str, cookies: &[String], name: &str) -> Result<()> {
    let runtime = Runtime::new()?;
    for cookie in cookies {
        runtime.set_document_cookie(cookie)?;
    }
    JsInterop::new(name).start(&runtime)?;

    tracing::info!("evaluating expression");
    println!("{}", runtime.eval_expression(expression)?);
    Ok(())
}

fn emit(flags: &InitFlags) -> Result<()> {
    println!("{}", serde_json::to_string(flags)?);
    Ok(())
}

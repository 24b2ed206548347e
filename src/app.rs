use std::sync::Arc;
use std::time::Duration;

use clap::{error::ErrorKind, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::adapter::Envelope;
use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::fetcher::{FetcherOptions, HttpFetcher, DEFAULT_API_URL};
use crate::messages;
use crate::output::{self, Layout, MemoryTarget, PageFile};
use crate::present::{Outcome, OutputTarget, Presenter};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Input {
    Single(String),
    Stdin,
}

#[derive(Clone, Debug)]
struct RunConfig {
    input: Input,
    api_url: String,
    timeout: Option<u64>,
    proxy: Option<String>,
    envelope: Envelope,
    output: Option<String>,
    layout: Layout,
    no_color: bool,
    workers: usize,
}

fn format_kv_line(label: &str, value: &str) {
    eprintln!(":: {:<10}: {}", label, value);
}

fn build_run_config(
    args: CliArgs,
    cfg: ConfigFile,
    env_api_url: Option<String>,
) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let api_url = args
        .api_url
        .or(env_api_url)
        .or(cfg.api_url)
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    validation::validate_api_url(&api_url)
        .map_err(|e| format!("invalid api url '{api_url}': {e}"))?;

    let envelope_raw = args
        .envelope
        .or(cfg.envelope)
        .unwrap_or_else(|| "auto".to_string());
    let envelope = Envelope::parse(&envelope_raw).ok_or_else(|| {
        format!("invalid envelope '{envelope_raw}', expected auto, combined, or flat")
    })?;

    let timeout = args.timeout.or(cfg.timeout).filter(|t| *t > 0);
    let proxy = args.proxy.or(cfg.proxy).filter(|p| !p.trim().is_empty());
    let output = args
        .output
        .or(cfg.output)
        .filter(|p| !p.trim().is_empty())
        .map(|p| config::expand_tilde_string(&p));
    let layout = if args.fragment || cfg.fragment.unwrap_or(false) {
        Layout::Fragment
    } else {
        Layout::Page
    };
    let no_color = args.no_color || cfg.no_color.unwrap_or(false);
    let workers = args.workers.or(cfg.workers).unwrap_or(2);
    if workers == 0 {
        return Err("invalid workers, expected positive integer".to_string());
    }

    let input = if args.interactive {
        Input::Stdin
    } else {
        Input::Single(args.order_id.unwrap_or_default())
    };

    Ok(RunConfig {
        input,
        api_url,
        timeout,
        proxy,
        envelope,
        output,
        layout,
        no_color,
        workers,
    })
}

fn init_tracing(verbose: u8, no_color: bool) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("order_viewer={level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .try_init();
}

/// Loading spinner for a lookup; blank input only shows the prompt.
fn spinner(raw_id: &str) -> Option<ProgressBar> {
    let order_id = raw_id.trim();
    if order_id.is_empty() {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!(
        "{} {}",
        messages::LOADING.bold().white(),
        order_id.bold().blue()
    ));
    pb.enable_steady_tick(Duration::from_millis(120));
    Some(pb)
}

struct Session {
    presenter: Presenter,
    memory: Option<Arc<MemoryTarget>>,
    page: Option<PageFile>,
    layout: Layout,
}

impl Session {
    async fn lookup(&self, raw_id: &str) -> Result<bool, String> {
        let id = raw_id.trim();
        let pb = spinner(raw_id);
        let outcome = self.presenter.present(raw_id).await;
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }
        let outcome = outcome.map_err(|e| e.to_string())?;

        if let Some(memory) = self.memory.as_ref() {
            let input = memory.last_input().await.unwrap_or_default();
            let markup = memory.last().await.unwrap_or_default();
            output::write_stdout(&self.layout.wrap(&input, &markup))
                .await
                .map_err(|e| e.to_string())?;
            memory.clear().await;
        }

        let failed = outcome.is_failure();
        match outcome {
            Outcome::Prompted => {
                eprintln!("{}", messages::ENTER_ORDER_ID.yellow());
            }
            Outcome::Rendered { .. } => {
                let dest = self
                    .page
                    .as_ref()
                    .map(|p| p.path().display().to_string())
                    .unwrap_or_else(|| "stdout".to_string());
                eprintln!(
                    "{} {} {} {}",
                    ":: rendered ::".bold().green(),
                    id.bold().white(),
                    "->".white(),
                    dest.blue()
                );
            }
            Outcome::Failed(err) => {
                eprintln!(
                    "{} {}",
                    format!("{}:", messages::ERROR_PREFIX).bold().red(),
                    messages::describe_error(&err).red()
                );
                if let Some(status) = err.status() {
                    format_kv_line("Status", &status.to_string());
                }
            }
        }
        Ok(failed)
    }
}

async fn run_async(run: RunConfig) -> Result<bool, String> {
    if run.no_color {
        colored::control::set_override(false);
    }

    format_kv_line("API", &run.api_url);
    format_kv_line("Envelope", run.envelope.label());
    if let Some(path) = run.output.as_deref() {
        format_kv_line("Output", path);
    }

    let fetcher = HttpFetcher::new(&FetcherOptions {
        base_url: run.api_url.clone(),
        timeout_seconds: run.timeout,
        proxy: run.proxy.clone(),
    })
    .map_err(|e| e.to_string())?;

    let (target, memory, page) = match run.output.as_deref() {
        Some(path) => {
            let page = PageFile::new(path, run.layout);
            let target: Arc<dyn OutputTarget> = Arc::new(page.clone());
            (target, None, Some(page))
        }
        None => {
            let memory = Arc::new(MemoryTarget::default());
            let target: Arc<dyn OutputTarget> = memory.clone();
            (target, Some(memory), None)
        }
    };

    let session = Session {
        presenter: Presenter::new(Arc::new(fetcher), target, run.envelope),
        memory,
        page,
        layout: run.layout,
    };

    match run.input {
        Input::Single(id) => session.lookup(&id).await,
        Input::Stdin => {
            let mut any_failed = false;
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines
                .next_line()
                .await
                .map_err(|e| format!("failed to read stdin: {e}"))?
            {
                any_failed |= session.lookup(&line).await?;
            }
            Ok(any_failed)
        }
    }
}

/// Entry point for the binary. Returns the process exit code.
pub fn run_cli() -> Result<i32, String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{e}");
                return Ok(0);
            }
            _ => return Err(e.to_string()),
        },
    };

    let explicit_config = args.config.clone().map(|p| config::expand_tilde(&p));
    let config_path = explicit_config.clone().or_else(config::default_config_path);

    if args.init_config {
        let path = config_path.ok_or_else(|| "could not determine config path".to_string())?;
        config::ensure_default_config_file(&path)?;
        println!("{}", path.display());
        return Ok(0);
    }

    let cfg = match config_path.as_ref() {
        Some(path) => config::load_config(path, explicit_config.is_none())?,
        None => ConfigFile::default(),
    };

    let verbose = args.verbose;
    let run = build_run_config(args, cfg, config::api_url_from_env())?;
    init_tracing(verbose, run.no_color);

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(run.workers)
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    let failed = rt.block_on(run_async(run))?;
    Ok(if failed { 1 } else { 0 })
}

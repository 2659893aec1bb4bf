use crate::{
    analysis::{self, DirectionAnalysis},
    config::Config,
    document::Document,
    lines, metrics,
    report::{Decision, DetectionReport, InputInfo},
    util::{ensure_dir, hash_file, now_rfc3339, sha256_hex},
    verdict,
};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "bidi-scan")]
#[command(about = "Geometric reading-direction inference (LTR vs RTL) for extracted text runs")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./bidi-scan.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the direction verdict for a run dump.
    Detect {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print the full detection report: per-page statistics and both
    /// sub-decisions.
    Explain {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print the grouped lines per page (debugging aid).
    Lines {
        #[arg(long)]
        input: PathBuf,
    },
    /// Detect and persist the report into a content-addressed job directory.
    Run {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg_path = resolve_config_path(args.config.as_deref())?;
    let cfg = Config::load(&cfg_path)?;

    match &args.cmd {
        Command::Detect { input } => {
            let log_path = resolve_log_path(&cfg, None);
            let _guard = init_logging(&args, &cfg, log_path.as_deref())?;
            detect(&cfg, input)
        }
        Command::Explain { input } => {
            let log_path = resolve_log_path(&cfg, None);
            let _guard = init_logging(&args, &cfg, log_path.as_deref())?;
            explain(&cfg, input)
        }
        Command::Lines { input } => {
            let log_path = resolve_log_path(&cfg, None);
            let _guard = init_logging(&args, &cfg, log_path.as_deref())?;
            dump_lines(&cfg, input)
        }
        Command::Run { input, out_dir } => run(&args, &cfg, input, out_dir.as_deref()),
    }
}

fn resolve_config_path(user: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = user {
        return Ok(p.to_path_buf());
    }
    let default = PathBuf::from("bidi-scan.toml");
    if default.exists() {
        Ok(default)
    } else {
        Ok(PathBuf::from("bidi-scan.example.toml"))
    }
}

fn init_logging(args: &Args, cfg: &Config, file_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stdout_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = file_path {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

/// Run the full analysis over a loaded document and assemble the report.
/// A forced direction from config overrides the inferred verdict but the
/// statistics are still computed and reported.
fn build_report(cfg: &Config, input: &Path, doc: &Document) -> Result<DetectionReport> {
    let tunables = cfg.detection.tunables();

    let mut acc = DirectionAnalysis::default();
    let mut pages = Vec::with_capacity(doc.pages.len());
    for page in &doc.pages {
        pages.push(analysis::analyze_page(&mut acc, &page.runs, &tunables));
    }

    let alignment = verdict::alignment_direction(&acc, &tunables);
    let content = verdict::content_direction(&acc, &tunables);
    let inferred = verdict::combine(&acc, &tunables);

    let (direction, forced) = match cfg.detection.forced() {
        Some(forced) => {
            info!("forced_direction={} overrides inference", forced.as_str());
            (forced, true)
        }
        None => (inferred, false),
    };

    let meta = std::fs::metadata(input)
        .with_context(|| format!("stat input: {}", input.display()))?;
    let sha256 = hash_file(input).with_context(|| "hashing input")?;

    Ok(DetectionReport {
        input: InputInfo {
            path: input.display().to_string(),
            file_bytes: meta.len(),
            sha256,
        },
        page_count: doc.pages.len(),
        run_count: doc.run_count(),
        pages,
        analysis: acc,
        decision: Decision {
            alignment,
            content,
            direction,
            code: direction.code(),
            forced,
        },
    })
}

fn detect(cfg: &Config, input: &Path) -> Result<()> {
    validate_input(input)?;
    let doc = Document::load(cfg, input)?;
    let report = build_report(cfg, input, &doc)?;
    info!(
        "direction={} code={} pages={} runs={}",
        report.decision.direction.as_str(),
        report.decision.code,
        report.page_count,
        report.run_count
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "input": input,
            "direction": report.decision.direction,
            "code": report.decision.code,
            "forced": report.decision.forced,
        }))?
    );
    Ok(())
}

fn explain(cfg: &Config, input: &Path) -> Result<()> {
    validate_input(input)?;
    let doc = Document::load(cfg, input)?;
    let report = build_report(cfg, input, &doc)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn dump_lines(cfg: &Config, input: &Path) -> Result<()> {
    validate_input(input)?;
    let doc = Document::load(cfg, input)?;
    let tunables = cfg.detection.tunables();

    let mut pages = Vec::with_capacity(doc.pages.len());
    for page in &doc.pages {
        let grouped = lines::group_into_lines(&page.runs, tunables.line_proximity);
        let lines_json: Vec<_> = grouped
            .iter()
            .map(|line| {
                let m = metrics::collect(line);
                serde_json::json!({
                    "runs": line.len(),
                    "left_edge": m.left_edge,
                    "right_edge": m.right_edge,
                    "rtl_chars": m.scripts.rtl,
                    "ltr_chars": m.scripts.ltr,
                    "text": line.iter().map(|r| r.text.as_str()).collect::<String>(),
                })
            })
            .collect();
        pages.push(serde_json::json!({ "lines": lines_json }));
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({ "pages": pages }))?
    );
    Ok(())
}

fn run(args: &Args, cfg: &Config, input: &Path, out_override: Option<&Path>) -> Result<()> {
    validate_input(input)?;

    let cfg_hash = sha256_hex(cfg.normalized_for_hash().as_bytes());
    let input_hash =
        hash_file(input).with_context(|| format!("hashing input: {}", input.display()))?;
    let job_id = sha256_hex(format!("{}:{}", cfg_hash, input_hash).as_bytes());

    let out_root = out_override
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&cfg.paths.out_dir));
    let job_dir = out_root.join(&job_id);

    ensure_dir(&job_dir)?;
    ensure_dir(&job_dir.join("final"))?;
    ensure_dir(&job_dir.join("logs"))?;

    let log_path = resolve_log_path(cfg, Some(&job_dir));
    let _guard = init_logging(args, cfg, log_path.as_deref())?;

    info!("job_id={job_id} out={}", job_dir.display());

    let started = now_rfc3339();
    let doc = Document::load(cfg, input)?;
    let report = build_report(cfg, input, &doc)?;

    info!(
        "direction={} code={} pages={} runs={}",
        report.decision.direction.as_str(),
        report.decision.code,
        report.page_count,
        report.run_count
    );

    if cfg.output.write_report_json {
        std::fs::write(
            job_dir.join("final").join(&cfg.output.report_filename),
            serde_json::to_string_pretty(&report)?,
        )?;
    }

    if cfg.output.write_index_json {
        let index = serde_json::json!({
            "job_id": job_id,
            "started": started,
            "finished": now_rfc3339(),
            "direction": report.decision.direction,
            "code": report.decision.code,
            "report": format!("final/{}", cfg.output.report_filename),
        });
        std::fs::write(
            job_dir.join("index.json"),
            serde_json::to_string_pretty(&index)?,
        )?;
    }

    if cfg.output.print_summary {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "job_id": job_id,
                "job_dir": job_dir,
                "direction": report.decision.direction,
                "code": report.decision.code,
            }))?
        );
    }

    Ok(())
}

fn validate_input(input: &Path) -> Result<()> {
    if !input.exists() {
        return Err(anyhow!("input does not exist: {}", input.display()));
    }

    if let Some(ext) = input.extension().and_then(|s| s.to_str()) {
        if ext.to_ascii_lowercase() != "json" {
            warn!("input does not look like a run dump: {}", input.display());
        }
    } else {
        warn!("input has no extension; assuming run dump: {}", input.display());
    }

    Ok(())
}

fn resolve_log_path(cfg: &Config, job_dir: Option<&Path>) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }

    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }

    if let Some(job_dir) = job_dir {
        return Some(job_dir.join("logs").join("bidi-scan.log"));
    }

    Some(PathBuf::from(&cfg.paths.out_dir).join("bidi-scan.log"))
}

use carviz::api::{Dashboard, DashboardConfig};
use carviz::render::{NullRenderer, Surface};
use carviz::telemetry;
use std::fs;
use std::path::PathBuf;

const USAGE: &str =
    "usage: dashboard_snapshot <dataset.csv> [--frames <n>] [--frame-ms <ms>] [--config <path>] [--verbose]";

#[derive(Debug)]
struct CliArgs {
    dataset: PathBuf,
    frames: u32,
    frame_ms: f64,
    config: Option<PathBuf>,
    verbose: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    if args.verbose {
        let _ = telemetry::init_tracing_with_fallback("carviz=debug");
    } else {
        let _ = telemetry::init_default_tracing();
    }

    let config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            DashboardConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => DashboardConfig::default(),
    };

    let mut dashboard = Dashboard::load_csv(NullRenderer::default(), &args.dataset, config)
        .map_err(|err| format!("failed to load `{}`: {err}", args.dataset.display()))?;

    for frame in 1..=args.frames {
        dashboard
            .tick(f64::from(frame) * args.frame_ms)
            .map_err(|err| format!("frame {frame} failed: {err}"))?;
    }

    let renderer = dashboard.renderer();
    eprintln!(
        "rendered ribbon={} gauges={} scatter={}",
        renderer.render_count(Surface::Ribbon),
        renderer.render_count(Surface::Gauges),
        renderer.render_count(Surface::Scatter),
    );

    let json = serde_json::to_string_pretty(&dashboard.snapshot())
        .map_err(|err| format!("failed to serialize snapshot: {err}"))?;
    println!("{json}");
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let dataset = match args.next() {
        Some(flag) if flag == "--help" || flag == "-h" => return Err(USAGE.to_owned()),
        Some(path) => PathBuf::from(path),
        None => return Err(USAGE.to_owned()),
    };

    let mut parsed = CliArgs {
        dataset,
        frames: 60,
        frame_ms: 16.0,
        config: None,
        verbose: false,
    };

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--frames" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --frames".to_owned())?;
                parsed.frames = value
                    .parse()
                    .map_err(|err| format!("invalid --frames `{value}`: {err}"))?;
            }
            "--frame-ms" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --frame-ms".to_owned())?;
                let frame_ms: f64 = value
                    .parse()
                    .map_err(|err| format!("invalid --frame-ms `{value}`: {err}"))?;
                if !frame_ms.is_finite() || frame_ms < 0.0 {
                    return Err(format!("--frame-ms must be finite and >= 0, got {value}"));
                }
                parsed.frame_ms = frame_ms;
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                parsed.config = Some(PathBuf::from(value));
            }
            "--verbose" | "-v" => parsed.verbose = true,
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }
    Ok(parsed)
}

#[cfg(all(feature = "csv-source", feature = "cairo-backend"))]
use procchart::api::{ChartConfig, ChartSession};
#[cfg(all(feature = "csv-source", feature = "cairo-backend"))]
use procchart::render::NullRenderer;
#[cfg(all(feature = "csv-source", feature = "cairo-backend"))]
use procchart::source::read_table_from_path;
#[cfg(all(feature = "csv-source", feature = "cairo-backend"))]
use std::path::PathBuf;

#[cfg(all(feature = "csv-source", feature = "cairo-backend"))]
struct CliArgs {
    results_path: PathBuf,
    limits_path: PathBuf,
    config_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
}

#[cfg(all(feature = "csv-source", feature = "cairo-backend"))]
fn main() {
    let _ = procchart::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(all(feature = "csv-source", feature = "cairo-backend")))]
fn main() {
    eprintln!("this tool requires features `csv-source` and `cairo-backend`");
    std::process::exit(1);
}

#[cfg(all(feature = "csv-source", feature = "cairo-backend"))]
fn run() -> Result<(), String> {
    let args = parse_args()?;

    let mut config = match &args.config_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            ChartConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => ChartConfig::default(),
    };
    if let Some(output_path) = args.output_path {
        config = config.with_export_path(output_path);
    }

    let results = read_table_from_path(&args.results_path, config.encoding_fallback)
        .map_err(|err| format!("{}: {err}", args.results_path.display()))?;
    let limits = read_table_from_path(&args.limits_path, config.encoding_fallback)
        .map_err(|err| format!("{}: {err}", args.limits_path.display()))?;

    let session = ChartSession::build(config, &results, &limits, NullRenderer::default())
        .map_err(|err| err.to_string())?;

    let diagnostics = session.chart().diagnostics();
    println!("{}", diagnostics.summary_line());
    for issue in &diagnostics.limit_issues {
        println!("limit issue: {issue:?}");
    }
    for parameter in &diagnostics.empty_parameters {
        println!("no data found for {parameter}");
    }

    session
        .export_to_configured_path()
        .map_err(|err| err.to_string())?;
    println!("wrote {}", session.config().export_path.display());
    Ok(())
}

#[cfg(all(feature = "csv-source", feature = "cairo-backend"))]
fn parse_args() -> Result<CliArgs, String> {
    let mut positional = Vec::new();
    let mut output_path = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--output" | "-o" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output_path = Some(PathBuf::from(value));
            }
            "--help" | "-h" => {
                println!("{}", usage_message());
                std::process::exit(0);
            }
            _ if arg.starts_with('-') => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    let mut positional = positional.into_iter();
    let (Some(results_path), Some(limits_path)) = (positional.next(), positional.next()) else {
        return Err(usage_message());
    };
    let config_path = positional.next();
    if let Some(extra) = positional.next() {
        return Err(format!(
            "unexpected argument `{}`\n\n{}",
            extra.display(),
            usage_message()
        ));
    }

    Ok(CliArgs {
        results_path,
        limits_path,
        config_path,
        output_path,
    })
}

#[cfg(all(feature = "csv-source", feature = "cairo-backend"))]
fn usage_message() -> String {
    "Usage: render_process_chart <results.csv> <limits.csv> [config.json] [options]\n\nOptions:\n  -o, --output <path>   PNG path (default: config `export_path`)\n  -h, --help            Show this message".to_owned()
}

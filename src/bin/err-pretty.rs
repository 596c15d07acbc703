use std::{
    env,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

use err_pretty::{ErrorRenderer, ProcessEnvProvider, RenderError, RenderOptions};
use serde_json::Value as JsonValue;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILTER_VAR: &str = "ERR_PRETTY_LOG";

#[derive(Debug, Default, PartialEq, Eq)]
struct RenderCliOptions {
    raw: bool,
    no_color: bool,
    project_root: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_tracing();
    match run(env::args().collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = env::var(LOG_FILTER_VAR)
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(args: Vec<String>) -> Result<(), String> {
    if args.len() < 3 {
        return Err("not enough arguments".to_string());
    }

    let command = args[1].as_str();
    let input = args[2].as_str();

    match command {
        "render" => {
            let cli_options = parse_render_options(&args[3..])?;
            run_render(input, &cli_options).map_err(|e| e.to_string())
        }
        _ => Err(format!("unknown command '{command}'")),
    }
}

fn run_render(input: &str, cli_options: &RenderCliOptions) -> Result<(), RenderError> {
    let mut options = RenderOptions::from_env(&ProcessEnvProvider)?;
    if cli_options.no_color {
        options.color = false;
    }
    if let Some(root) = &cli_options.project_root {
        options.project_root = Some(root.clone());
    }

    let record = read_record(input)?;
    let renderer = ErrorRenderer::new(&options);
    let lines = renderer.render(&record, cli_options.raw);
    if lines.is_empty() {
        tracing::warn!("input does not contain an error record; use --raw for bare error objects");
    }
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

fn read_record(input: &str) -> Result<JsonValue, RenderError> {
    let text = if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)
            .map_err(|e| RenderError::InputError(format!("failed to read '{input}': {e}")))?
    };

    serde_json::from_str(&text)
        .map_err(|e| RenderError::InputError(format!("'{input}' is not valid JSON: {e}")))
}

fn parse_render_options(args: &[String]) -> Result<RenderCliOptions, String> {
    let mut options = RenderCliOptions::default();
    let mut i = 0usize;

    while i < args.len() {
        match args[i].as_str() {
            "--raw" => {
                options.raw = true;
                i += 1;
            }
            "--no-color" => {
                options.no_color = true;
                i += 1;
            }
            "--root" => {
                if i + 1 >= args.len() {
                    return Err("missing value for --root (expected project directory)".to_string());
                }
                let root = args[i + 1].trim();
                if root.is_empty() {
                    return Err("--root value must be non-empty".to_string());
                }
                options.project_root = Some(PathBuf::from(root));
                i += 2;
            }
            other => return Err(format!("unknown option '{other}'")),
        }
    }

    Ok(options)
}

fn print_usage() {
    eprintln!("usage:");
    eprintln!("  err-pretty render <file|-> [--raw] [--no-color] [--root <dir>]");
    eprintln!();
    eprintln!("render options:");
    eprintln!("  --raw                  treat the document itself as the error object");
    eprintln!("  --no-color             disable ANSI styling (also: NO_COLOR=1)");
    eprintln!("  --root <dir>           project root for application frame paths (also: ERR_PRETTY_ROOT)");
    eprintln!();
    eprintln!("note: set {LOG_FILTER_VAR} (for example 'debug') to see diagnostics on stderr.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn parses_all_render_options() {
        let options = parse_render_options(&args(&["--raw", "--no-color", "--root", "/srv"])).unwrap();
        assert_eq!(
            options,
            RenderCliOptions {
                raw: true,
                no_color: true,
                project_root: Some(PathBuf::from("/srv")),
            }
        );
    }

    #[test]
    fn rejects_unknown_and_incomplete_options() {
        let err = parse_render_options(&args(&["--pretty"])).unwrap_err();
        assert!(err.contains("unknown option '--pretty'"));

        let err = parse_render_options(&args(&["--root"])).unwrap_err();
        assert!(err.contains("missing value for --root"));
    }

    #[test]
    fn rejects_unknown_command() {
        let err = run(args(&["err-pretty", "explode", "-"])).unwrap_err();
        assert!(err.contains("unknown command 'explode'"));
    }

    #[test]
    fn missing_input_file_is_an_input_error() {
        let err = read_record("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("input error"));
    }
}

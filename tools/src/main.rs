// Usage:
//   design-tokens-tools extract-colors <image> [K] [options]
//   design-tokens-tools normalize-tokens <json file> [options]
// Options:
//   --config FILE   engine configuration (TOML, JSON or YAML)
//   --yaml          print YAML instead of JSON
//   --typescript    (normalize-tokens) print a TypeScript module
//   -v              debug logs
//
// The result, or an {error, suggestion} payload, is printed on stdout.
// Logs go to stderr.

use std::{env,
          io::{self, Write},
          path::{Path, PathBuf},
          process::ExitCode};
use serde::Serialize;
use tracing::{debug, Level};
use design_tokens::{extract_image_colors, EngineConfig, ErrorPayload,
                    Normalizer, RawExtraction, Response, TokenDocument,
                    TokenError};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Format { Json, Yaml, TypeScript }

#[derive(Debug)]
struct Args {
    command: String,
    positional: Vec<String>,
    config: Option<PathBuf>,
    format: Format,
    verbose: bool,
}

fn usage() -> ErrorPayload {
    ErrorPayload {
        error: "Usage: design-tokens-tools (extract-colors <image> [K] | \
                normalize-tokens <json file>) [--config FILE] [--yaml | \
                --typescript] [-v]".into(),
        suggestion: None }
}

fn parse_args(mut args: impl Iterator<Item = String>)
              -> Result<Args, ErrorPayload> {
    let command = args.next().ok_or_else(usage)?;
    let mut a = Args { command, positional: vec![], config: None,
                       format: Format::Json, verbose: false };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => a.config = Some(args.next().ok_or_else(usage)?.into()),
            "--yaml" => a.format = Format::Yaml,
            "--typescript" => a.format = Format::TypeScript,
            "-v" | "--verbose" => a.verbose = true,
            "-h" | "--help" => return Err(usage()),
            _ => a.positional.push(arg),
        }
    }
    Ok(a)
}

fn print<T: Serialize>(value: &T, format: Format) -> io::Result<()> {
    let out = match format {
        Format::Yaml => serde_yaml::to_string(value)
            .map_err(io::Error::other)?,
        _ => serde_json::to_string_pretty(value)?,
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", out.trim_end())
}

/// Print `r` and tell whether it was a success.
fn report<T: Serialize>(r: design_tokens::Result<T>, format: Format)
                        -> io::Result<bool> {
    if let Err(e) = &r { debug!(error = ?e, "command failed") }
    let response: Response<T> = r.into();
    print(&response, format)?;
    Ok(response.is_ok())
}

fn extract_colors(args: &Args, cfg: &EngineConfig) -> io::Result<bool> {
    let Some(image) = args.positional.first() else {
        print(&usage(), args.format)?;
        return Ok(false)
    };
    let mut opts = cfg.quantize.clone();
    if let Some(k) = args.positional.get(1) {
        match k.parse::<usize>() {
            Ok(k) => opts = opts.with_colors(k),
            Err(_) => {
                let e = TokenError::invalid_parameter("colors", k);
                return report::<()>(Err(e), args.format)
            }
        }
    }
    report(extract_image_colors(Path::new(image), &opts), args.format)
}

fn read_document(path: &Path, cfg: &EngineConfig)
                 -> design_tokens::Result<TokenDocument> {
    let raw = RawExtraction::from_file(path)?;
    Normalizer::new(cfg.normalize.clone())?.normalize(&raw)
}

fn normalize_tokens(args: &Args, cfg: &EngineConfig) -> io::Result<bool> {
    let Some(input) = args.positional.first() else {
        print(&usage(), args.format)?;
        return Ok(false)
    };
    let doc = read_document(Path::new(input), cfg);
    match (args.format, doc) {
        (Format::TypeScript, Ok(doc)) => {
            match doc.to_typescript() {
                Ok(ts) => {
                    io::stdout().lock().write_all(ts.as_bytes())?;
                    Ok(true)
                }
                Err(e) => report::<()>(Err(e), Format::Json),
            }
        }
        (Format::TypeScript, Err(e)) => report::<()>(Err(e), Format::Json),
        (format, doc) => report(doc, format),
    }
}

fn run() -> io::Result<bool> {
    let args = match parse_args(env::args().skip(1)) {
        Ok(a) => a,
        Err(usage) => {
            print(&usage, Format::Json)?;
            return Ok(false)
        }
    };
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level)
        .with_writer(io::stderr).init();
    let cfg = match EngineConfig::load(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => return report::<()>(Err(e), args.format),
    };
    match args.command.as_str() {
        "extract-colors" => extract_colors(&args, &cfg),
        "normalize-tokens" => normalize_tokens(&args, &cfg),
        _ => {
            print(&usage(), args.format)?;
            Ok(false)
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("design-tokens-tools: {}", e);
            ExitCode::FAILURE
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Result<Args, ErrorPayload> {
        parse_args(v.iter().map(|s| s.to_string()))
    }

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("design-tokens-tools-{}-{}",
                                                std::process::id(), name));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn flags() {
        let a = args(&["normalize-tokens", "raw.json", "--typescript", "-v",
                       "--config", "engine.toml"]).unwrap();
        assert_eq!(a.command, "normalize-tokens");
        assert_eq!(a.positional, ["raw.json"]);
        assert_eq!(a.format, Format::TypeScript);
        assert!(a.verbose);
        assert_eq!(a.config, Some(PathBuf::from("engine.toml")));

        let a = args(&["extract-colors", "shot.png", "8", "--yaml"]).unwrap();
        assert_eq!(a.positional, ["shot.png", "8"]);
        assert_eq!(a.format, Format::Yaml);
        assert!(!a.verbose && a.config.is_none());
    }

    #[test]
    fn bad_arguments() {
        assert!(args(&[]).is_err());
        let e = args(&["extract-colors", "shot.png", "--config"]).unwrap_err();
        assert!(e.error.starts_with("Usage:"));
        assert!(args(&["normalize-tokens", "--help"]).is_err());
    }

    #[test]
    fn report_tells_success() {
        assert!(report(Ok(3), Format::Json).unwrap());
        assert!(report(Ok(3), Format::Yaml).unwrap());
        let e = TokenError::FileNotFound { path: "missing.png".into() };
        assert!(!report::<()>(Err(e), Format::Json).unwrap());
    }

    #[test]
    fn documents() {
        let cfg = EngineConfig::default();
        let r = read_document(Path::new("no/such/raw.json"), &cfg);
        assert!(matches!(r, Err(TokenError::FileNotFound { .. })));

        let path = temp_file("bad.json", "{\"colors\": [");
        let r = read_document(&path, &cfg);
        std::fs::remove_file(&path).ok();
        assert!(matches!(r, Err(TokenError::Json(_))));

        let path = temp_file("ok.json", "{\"colors\": [\"#e11d48\"]}");
        let doc = read_document(&path, &cfg).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(doc.colors.primary.base(), "#e11d48");
    }

    #[test]
    fn missing_input_fails() {
        let a = args(&["extract-colors"]).unwrap();
        assert!(!extract_colors(&a, &EngineConfig::default()).unwrap());
        let a = args(&["extract-colors", "no/such/shot.png", "x"]).unwrap();
        assert!(!extract_colors(&a, &EngineConfig::default()).unwrap());
        let a = args(&["normalize-tokens", "no/such/raw.json",
                       "--typescript"]).unwrap();
        assert!(!normalize_tokens(&a, &EngineConfig::default()).unwrap());
    }
}

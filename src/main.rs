//! Tether CLI
//!
//! Usage:
//!   tether [OPTIONS] [FILE]
//!
//! Reads a scene document (TOML), positions every `[[float]]` entry and
//! prints the resolved placement and styles.
//!
//! Options:
//!   -v, --verbose   Increase log output (repeatable)
//!   -h, --help      Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::Parser;
use env_logger::Env;

use tether::{position_all, Scene, SceneError, UpdateOutcome};

#[derive(Parser)]
#[command(name = "tether")]
#[command(about = "Position floating elements described by a scene document")]
struct Cli {
    /// Scene file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Increase log output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(filter)).init();

    let (filename, source) = match read_input(&cli.input) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut scene = match Scene::from_toml_str(&source) {
        Ok(scene) => scene,
        Err(e) => {
            report_scene_error(&e, &source, &filename);
            return ExitCode::FAILURE;
        }
    };

    match position_all(&mut scene) {
        Ok(placed) => {
            for float in placed {
                match float.outcome {
                    UpdateOutcome::Skipped => println!("{}: skipped (not visible)", float.name),
                    UpdateOutcome::Applied(result) => {
                        let arrow = result
                            .arrow
                            .map(|style| format!(" [arrow: {}]", style))
                            .unwrap_or_default();
                        println!(
                            "{}: {} {} ({}, {}) {}{}",
                            float.name,
                            result.placement,
                            result.position,
                            result.offset.x,
                            result.offset.y,
                            result.style,
                            arrow
                        );
                    }
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_scene_error(&e, &source, &filename);
            ExitCode::FAILURE
        }
    }
}

fn read_input(input: &Option<PathBuf>) -> io::Result<(String, String)> {
    match input {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Ok((path.display().to_string(), content))
        }
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(("<stdin>".to_string(), buffer))
        }
    }
}

/// Print a scene error, with source context when the TOML parser reported a span
fn report_scene_error(error: &SceneError, source: &str, filename: &str) {
    let span = match error {
        SceneError::ParseError(e) => e.span().map(|span| (span, e.message().to_string())),
        _ => None,
    };

    let Some((span, message)) = span else {
        eprintln!("Error: {}", error);
        return;
    };

    let printed = Report::build(ReportKind::Error, filename, span.start)
        .with_message("invalid scene document")
        .with_label(
            Label::new((filename, span))
                .with_message(message)
                .with_color(Color::Red),
        )
        .finish()
        .eprint((filename, Source::from(source)));
    if printed.is_err() {
        eprintln!("Error: {}", error);
    }
}

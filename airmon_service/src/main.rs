/// airmon_service: evaluate one reading snapshot and print active advisories.
///
/// Usage:
///   airmon_service [--dashboard] [SNAPSHOT.json]
///
/// Reads the snapshot from the given file, or from stdin when no path is
/// given. `--dashboard` selects the flat `/api/aqi` payload format. The
/// active advisory set is written to stdout as JSON; logs go to stderr.

use std::error::Error;
use std::io::Read;
use std::process::ExitCode;

use airmon_service::alert::RuleEvaluator;
use airmon_service::alert::stalenesses;
use airmon_service::config;
use airmon_service::ingest::{self, SnapshotFormat};
use airmon_service::logging::{self, Component};
use airmon_service::model::{ReadingSnapshot, SnapshotError};

struct Args {
    format: SnapshotFormat,
    path: Option<String>,
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args {
        format: SnapshotFormat::Nested,
        path: None,
    };
    for arg in args {
        if arg == "--dashboard" {
            parsed.format = SnapshotFormat::Dashboard;
        } else if arg.starts_with("--") {
            return Err(format!("unknown option '{}'", arg));
        } else if parsed.path.is_some() {
            return Err("only one snapshot path may be given".into());
        } else {
            parsed.path = Some(arg);
        }
    }
    Ok(parsed)
}

fn read_snapshot(args: &Args) -> Result<(String, ReadingSnapshot), SnapshotError> {
    let (origin, text) = match &args.path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| SnapshotError::Io(format!("{}: {}", path, e)))?;
            (path.clone(), text)
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| SnapshotError::Io(format!("stdin: {}", e)))?;
            ("stdin".to_string(), text)
        }
    };
    let snapshot = ingest::decode(args.format, &text)?;
    Ok((origin, snapshot))
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = config::load_service_config(config::config_path_from_env().as_deref())?;
    logging::init_logger(
        config.log_level()?,
        config.logging.file.as_deref(),
        config.logging.timestamps,
    );
    match &config.source {
        Some(path) => {
            let path = path.display().to_string();
            logging::info(Component::Config, Some(&path), "loaded service config");
        }
        None => logging::info(
            Component::Config,
            Some(config::DEFAULT_CONFIG_PATH),
            "no config file found, using built-in defaults",
        ),
    }

    let table = config.threshold_table().inspect_err(|e| {
        logging::error(Component::Config, None, &e.to_string());
    })?;
    let evaluator = RuleEvaluator::new(table);
    logging::debug(
        Component::Config,
        None,
        &format!("freshness window is {} minutes", config.freshness.max_age_minutes),
    );

    let (origin, snapshot) = read_snapshot(&args).inspect_err(|e| {
        let label = args.path.as_deref().unwrap_or("stdin");
        logging::log_snapshot_failure(label, e);
    })?;

    if snapshot.observed_at.is_some() {
        match stalenesses::is_stale(&snapshot, config.freshness.max_age_minutes) {
            Ok(false) => {}
            Ok(true) => logging::warn(
                Component::Ingest,
                Some(&origin),
                &format!(
                    "snapshot is older than {} minutes; advisories may be out of date",
                    config.freshness.max_age_minutes
                ),
            ),
            Err(e) => logging::warn(Component::Ingest, Some(&origin), &e),
        }
    }

    let active = evaluator.evaluate(&snapshot);
    logging::log_evaluation_summary(Some(&origin), &active.active_keys());

    println!("{}", serde_json::to_string_pretty(&active)?);
    Ok(())
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("✗ {}", msg);
            eprintln!("usage: airmon_service [--dashboard] [SNAPSHOT.json]");
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ {}", e);
            ExitCode::FAILURE
        }
    }
}

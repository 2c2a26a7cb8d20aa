//! config-tree CLI
//!
//! Reads and edits JSON/YAML configuration documents through dotted key
//! paths, using the same store the library exposes.

use anyhow::{Result, bail};
use clap::Parser;
use config_tree::cli::{Cli, Command, ExtractArgs, FilesArgs, ListArgs, PathArgs, SetArgs};
use config_tree::config::{ConfigStore, Value, node_to_json};
use config_tree::files::FileLocator;
use config_tree::resources::EmbeddedResources;
use serde_json::Value as JsonValue;
use std::fs::OpenOptions;
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log, cli.verbose)?;

    let locator = cli
        .root
        .clone()
        .map(FileLocator::new)
        .unwrap_or_else(FileLocator::discover);
    debug!(root = %locator.root().display(), "Resolved root directory");

    match cli.command {
        Command::Get(args) => run_get(&locator, &args),
        Command::Set(args) => run_set(&locator, &args),
        Command::Unset(args) => run_unset(&locator, &args),
        Command::Type(args) => run_type(&locator, &args),
        Command::Keys(args) => run_keys(&locator, &args),
        Command::Values(args) => run_values(&locator, &args),
        Command::Extract(args) => run_extract(&locator, &args),
        Command::Files(args) => run_files(&locator, &args),
    }
}

/// Initialize logging based on the --log option.
fn init_logging(target: &str, verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    match target {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

/// Interpret a command-line value as JSON, falling back to a plain string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str::<JsonValue>(raw)
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(raw))
}

fn print_json(value: &JsonValue) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_get(locator: &FileLocator, args: &PathArgs) -> Result<()> {
    let store = locator.load_store(&args.file)?;
    match store.get(&args.path) {
        Some(value) => print_json(&value.to_json()),
        None => bail!("No value at '{}' in {}", args.path, store.current_path()),
    }
}

fn run_set(locator: &FileLocator, args: &SetArgs) -> Result<()> {
    let path = locator.file_or_create(&args.file)?;
    let mut store = ConfigStore::load(&path)?;
    store.set(&args.path, parse_value(&args.value))?;
    store.save(&path)?;
    info!(file = %path.display(), key = %args.path, "Updated value");
    Ok(())
}

fn run_unset(locator: &FileLocator, args: &PathArgs) -> Result<()> {
    let mut store = locator.load_store(&args.file)?;
    if store.remove(&args.path).is_none() {
        bail!("No value at '{}' in {}", args.path, store.current_path());
    }
    locator.save_store(&store, &args.file)?;
    info!(file = %store.current_path(), key = %args.path, "Removed value");
    Ok(())
}

fn run_type(locator: &FileLocator, args: &PathArgs) -> Result<()> {
    let store = locator.load_store(&args.file)?;
    match store.get(&args.path) {
        Some(value) => {
            println!("{}", value.kind());
            Ok(())
        }
        None => bail!("No value at '{}' in {}", args.path, store.current_path()),
    }
}

fn run_keys(locator: &FileLocator, args: &ListArgs) -> Result<()> {
    let store = locator.load_store(&args.file)?;
    for key in store.keys(args.deep) {
        println!("{}", key);
    }
    Ok(())
}

fn run_values(locator: &FileLocator, args: &ListArgs) -> Result<()> {
    let store = locator.load_store(&args.file)?;
    print_json(&JsonValue::Object(node_to_json(&store.values(args.deep))))
}

fn run_extract(locator: &FileLocator, args: &ExtractArgs) -> Result<()> {
    let resources = EmbeddedResources::bundled();
    if resources.get(&args.name).is_none() {
        let available: Vec<&str> = resources.names().collect();
        bail!(
            "Unknown resource '{}'. Available: {}",
            args.name,
            available.join(", ")
        );
    }

    let out = args.out.clone().unwrap_or_default();
    if resources.extract(&args.name, &out, locator)? {
        println!("Extracted {}", args.name);
    } else {
        println!("Skipped {} (destination exists)", args.name);
    }
    Ok(())
}

fn run_files(locator: &FileLocator, args: &FilesArgs) -> Result<()> {
    for file in locator.files(&args.dir, args.deep)? {
        println!("{}", file.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn set_args(file: &str, path: &str, value: &str) -> SetArgs {
        SetArgs {
            file: PathBuf::from(file),
            path: path.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_parse_value_reads_json() {
        assert_eq!(parse_value("42"), Value::Int(42));
        assert_eq!(parse_value("true"), Value::Bool(true));
        assert_eq!(parse_value("null"), Value::Null);
        assert_eq!(parse_value("[1,2]"), Value::from(vec![1, 2]));
        assert_eq!(parse_value("\"quoted\""), Value::from("quoted"));
    }

    #[test]
    fn test_parse_value_falls_back_to_string() {
        assert_eq!(parse_value("localhost"), Value::from("localhost"));
        assert_eq!(parse_value("{broken"), Value::from("{broken"));
        assert_eq!(parse_value(""), Value::from(""));
    }

    #[test]
    fn test_set_then_unset_updates_the_file() {
        let temp = TempDir::new().unwrap();
        let locator = FileLocator::new(temp.path());

        run_set(&locator, &set_args("conf/app.json", "server.port", "8080")).unwrap();
        run_set(&locator, &set_args("conf/app.json", "server.host", "example.org")).unwrap();

        let store = locator.load_store("conf/app.json").unwrap();
        assert_eq!(store.get_int_or("server.port", 0), 8080);
        assert_eq!(store.get_string_or("server.host", ""), "example.org");

        let unset = PathArgs {
            file: PathBuf::from("conf/app.json"),
            path: "server.port".to_string(),
        };
        run_unset(&locator, &unset).unwrap();
        assert!(run_unset(&locator, &unset).is_err());

        let store = locator.load_store("conf/app.json").unwrap();
        assert!(!store.contains("server.port"));
        assert!(store.contains("server.host"));
    }

    #[test]
    fn test_get_and_type_report_missing_paths() {
        let temp = TempDir::new().unwrap();
        let locator = FileLocator::new(temp.path());
        run_set(&locator, &set_args("a.yaml", "flag", "true")).unwrap();

        let present = PathArgs {
            file: PathBuf::from("a.yaml"),
            path: "flag".to_string(),
        };
        let missing = PathArgs {
            file: PathBuf::from("a.yaml"),
            path: "nope".to_string(),
        };
        assert!(run_get(&locator, &present).is_ok());
        assert!(run_type(&locator, &present).is_ok());
        assert!(run_get(&locator, &missing).is_err());
        assert!(run_type(&locator, &missing).is_err());
    }

    #[test]
    fn test_extract_rejects_unknown_resource() {
        let temp = TempDir::new().unwrap();
        let locator = FileLocator::new(temp.path());
        let args = ExtractArgs {
            name: "missing.json".to_string(),
            out: None,
        };
        assert!(run_extract(&locator, &args).is_err());

        let args = ExtractArgs {
            name: "config.json".to_string(),
            out: None,
        };
        run_extract(&locator, &args).unwrap();
        assert!(temp.path().join("config.json").is_file());
    }
}

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gcdicom::config::Config;
use gcdicom::gcp::auth::AdcAuthenticator;
use gcdicom::gcp::client::HealthcareClient;
use gcdicom::gcp::dicomweb::{self, DicomStoreId};
use gcdicom::gcp::{healthcare, projects};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;

/// Browse Google Cloud Healthcare DICOM stores and download DICOM files
#[derive(Parser, Debug)]
#[command(name = "gcdicom", version, about, long_about = None)]
struct Args {
    /// GCP project to use
    #[arg(short, long, global = true)]
    project: Option<String>,

    /// Healthcare API location
    #[arg(short, long, global = true)]
    location: Option<String>,

    /// Healthcare dataset
    #[arg(short, long, global = true)]
    dataset: Option<String>,

    /// DICOM store
    #[arg(short, long, global = true)]
    store: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List active project IDs visible to the signed-in account
    Projects,
    /// List Healthcare API locations for the project
    Locations,
    /// List datasets in the project location
    Datasets,
    /// List DICOM stores in the dataset
    Stores,
    /// List studies in the DICOM store (raw DICOM-JSON records)
    Studies,
    /// List series in a study (raw DICOM-JSON records)
    Series {
        /// Study instance UID
        study_uid: String,
    },
    /// List instances in a series (raw DICOM-JSON records)
    Instances {
        /// Study instance UID
        study_uid: String,
        /// Series instance UID
        series_uid: String,
    },
    /// Download an instance as a DICOM Part 10 file
    Pull {
        /// Study instance UID
        study_uid: String,
        /// Series instance UID
        series_uid: String,
        /// SOP instance UID
        instance_uid: String,
        /// Output path (defaults to <instance_uid>.dcm)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

/// Logs go to a file so stdout stays clean for command output.
fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    else {
        eprintln!("Warning: could not open log file {:?}", log_path);
        return None;
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("gcdicom started with log level: {:?}", level);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("gcdicom").join("gcdicom.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".gcdicom").join("gcdicom.log");
    }
    PathBuf::from("gcdicom.log")
}

/// A `None` from a lister means the call was abandoned pending sign-in.
fn require_signed_in<T>(value: Option<T>) -> Result<T> {
    value.ok_or_else(|| {
        anyhow!("Authentication required. Run 'gcloud auth application-default login' and retry.")
    })
}

fn require_arg(value: Option<String>, fallback: String, what: &str) -> Result<String> {
    let resolved = value.unwrap_or(fallback);
    if resolved.is_empty() {
        return Err(anyhow!(
            "No {} configured. Pass --{} or set it in the config file.",
            what,
            what
        ));
    }
    Ok(resolved)
}

fn print_ids(ids: &[String]) {
    for id in ids {
        println!("{}", id);
    }
}

fn print_records(records: &[serde_json::Value]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(records)?);
    Ok(())
}

/// Scope flags resolved against the config file
struct Scope {
    project: Option<String>,
    location: Option<String>,
    dataset: Option<String>,
    store: Option<String>,
    config: Config,
}

impl Scope {
    fn project(&self) -> Result<String> {
        require_arg(
            self.project.clone(),
            self.config.effective_project(),
            "project",
        )
    }

    fn location(&self) -> Result<String> {
        require_arg(
            self.location.clone(),
            self.config.effective_location(),
            "location",
        )
    }

    fn dataset(&self) -> Result<String> {
        require_arg(
            self.dataset.clone(),
            self.config.dataset.clone().unwrap_or_default(),
            "dataset",
        )
    }

    fn store(&self) -> Result<DicomStoreId> {
        let store = require_arg(
            self.store.clone(),
            self.config.dicom_store.clone().unwrap_or_default(),
            "store",
        )?;

        Ok(DicomStoreId::new(
            &self.project()?,
            &self.location()?,
            &self.dataset()?,
            &store,
        ))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let Args {
        project,
        location,
        dataset,
        store,
        log_level,
        command,
    } = Args::parse();

    let _log_guard = setup_logging(log_level);

    let scope = Scope {
        project,
        location,
        dataset,
        store,
        config: Config::load(),
    };

    let auth = Arc::new(AdcAuthenticator::new().await?);
    let client = HealthcareClient::new(auth)?;

    match command {
        Command::Projects => {
            let ids = require_signed_in(projects::list_project_ids(&client).await?)?;
            print_ids(&ids);
        }
        Command::Locations => {
            let project = scope.project()?;
            let locations =
                require_signed_in(healthcare::list_locations(&client, &project).await?)?;
            print_ids(&locations);
        }
        Command::Datasets => {
            let datasets = require_signed_in(
                healthcare::list_datasets(&client, &scope.project()?, &scope.location()?).await?,
            )?;
            print_ids(&datasets);
        }
        Command::Stores => {
            let stores = require_signed_in(
                healthcare::list_dicom_stores(
                    &client,
                    &scope.project()?,
                    &scope.location()?,
                    &scope.dataset()?,
                )
                .await?,
            )?;
            print_ids(&stores);
        }
        Command::Studies => {
            let store = scope.store()?;
            let studies = require_signed_in(dicomweb::search_studies(&client, &store).await?)?;
            print_records(&studies)?;
        }
        Command::Series { study_uid } => {
            let store = scope.store()?;
            let series =
                require_signed_in(dicomweb::search_series(&client, &store, &study_uid).await?)?;
            print_records(&series)?;
        }
        Command::Instances {
            study_uid,
            series_uid,
        } => {
            let store = scope.store()?;
            let instances = require_signed_in(
                dicomweb::search_instances(&client, &store, &study_uid, &series_uid).await?,
            )?;
            print_records(&instances)?;
        }
        Command::Pull {
            study_uid,
            series_uid,
            instance_uid,
            output,
        } => {
            let store = scope.store()?;
            let url =
                dicomweb::instance_url(&client, &store, &study_uid, &series_uid, &instance_uid);
            let bytes = require_signed_in(dicomweb::fetch_dicom_file(&client, &url).await?)?;

            let path =
                output.unwrap_or_else(|| PathBuf::from(format!("{}.dcm", instance_uid)));
            std::fs::write(&path, &bytes)?;
            println!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
    }

    Ok(())
}

mod atomic;
mod logging;
mod output;
mod sample;
mod settings;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use ddlsmith_core::{CommaStyle, ConstraintApproach, DdlConfig, NamingConvention, parse_model_str};
use ddlsmith_fetch::{DEFAULT_ENVIRONMENT, EllieApiSource, FetchError, FileSource, ModelSource};
use ddlsmith_generate::{GenerationEngine, GenerationError};
use thiserror::Error;

use crate::atomic::{write_bytes_atomic, write_json_atomic};
use crate::output::Destination;
use crate::settings::{DEFAULT_SETTINGS_FILE, SettingsError, load_settings, save_settings};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("{0}")]
    Model(#[from] ddlsmith_core::Error),
    #[error("{0}")]
    Generation(#[from] GenerationError),
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "ddlsmith",
    version,
    about = "Generate Databricks DDL from a JSON physical data model"
)]
struct Cli {
    /// Settings file (defaults to ./ddlsmith.toml when present).
    #[arg(long = "config", global = true, value_name = "FILE")]
    settings: Option<PathBuf>,
    /// Append JSON log lines to this file instead of logging to stderr.
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate DDL from a model file, stdin or the Ellie.ai API.
    Generate(GenerateArgs),
    /// Download a model document from the Ellie.ai API.
    Fetch(FetchArgs),
    /// Print the bundled sample model.
    Sample(SampleArgs),
    /// Manage the settings file.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Model JSON file, `-` for stdin. Read from stdin when no source is given.
    #[arg(long, short, value_name = "FILE", conflicts_with = "model_id")]
    input: Option<PathBuf>,
    #[command(flatten)]
    api: ApiArgs,
    /// Output file (stdout when omitted).
    #[arg(long, value_name = "FILE", conflicts_with = "out_dir")]
    out: Option<PathBuf>,
    /// Output directory; the file is named after the model.
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,
    /// Write the generation report as JSON.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
    #[command(flatten)]
    overrides: OverrideArgs,
}

#[derive(Args, Debug)]
struct ApiArgs {
    /// Ellie.ai model id.
    #[arg(long, value_name = "ID")]
    model_id: Option<String>,
    /// Ellie.ai environment slug.
    #[arg(long, env = "ELLIE_ENVIRONMENT", default_value = DEFAULT_ENVIRONMENT)]
    environment: String,
    /// Ellie.ai API token.
    #[arg(long, env = "ELLIE_API_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Override the API origin (for proxies and tests).
    #[arg(long, value_name = "URL", hide = true)]
    api_base_url: Option<String>,
}

impl ApiArgs {
    fn source(&self, model_id: &str) -> Result<EllieApiSource, CliError> {
        let token = self.token.clone().ok_or_else(|| {
            CliError::InvalidArgs("--token or ELLIE_API_TOKEN is required".to_string())
        })?;
        let source = EllieApiSource::new(model_id, token, self.environment.clone());
        Ok(match &self.api_base_url {
            Some(base) => source.with_base_url(base.clone()),
            None => source,
        })
    }
}

/// Per-run overrides applied on top of the settings file.
#[derive(Args, Debug, Default)]
struct OverrideArgs {
    #[arg(long, value_name = "NAME")]
    catalog: Option<String>,
    #[arg(long, value_name = "NAME")]
    schema: Option<String>,
    /// SNAKE, LOWER, UPPER, KEBAB, CAMEL, PASCAL or ORIGINAL.
    #[arg(long, value_name = "CONVENTION")]
    naming: Option<NamingConvention>,
    /// TRAILING, LEADING_SPACE or LEADING_NO_SPACE.
    #[arg(long, value_name = "STYLE")]
    comma_style: Option<CommaStyle>,
    /// ALTER_TABLE or COMMENT_ONLY.
    #[arg(long, value_name = "APPROACH")]
    constraints: Option<ConstraintApproach>,
    #[arg(long, value_name = "BOOL")]
    create_database: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    primary_keys: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    foreign_keys: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    delta: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    comments: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    validation_queries: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    header: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    constraint_info: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    clustering: Option<bool>,
}

impl OverrideArgs {
    fn apply(&self, config: &mut DdlConfig) {
        if let Some(catalog) = &self.catalog {
            config.catalog = Some(catalog.clone());
        }
        if let Some(schema) = &self.schema {
            config.schema = Some(schema.clone());
        }
        if let Some(naming) = self.naming {
            config.naming_convention = naming;
        }
        if let Some(style) = self.comma_style {
            config.comma_style = style;
        }
        if let Some(approach) = self.constraints {
            config.constraint_approach = approach;
        }

        let toggles = [
            (self.create_database, &mut config.create_database),
            (self.primary_keys, &mut config.include_primary_keys),
            (self.foreign_keys, &mut config.include_foreign_keys),
            (self.delta, &mut config.use_delta),
            (self.comments, &mut config.include_comments),
            (self.validation_queries, &mut config.include_validation_queries),
            (self.header, &mut config.include_header),
            (self.constraint_info, &mut config.include_constraint_info),
            (self.clustering, &mut config.add_clustering),
        ];
        for (value, target) in toggles {
            if let Some(value) = value {
                *target = value;
            }
        }
    }
}

#[derive(Args, Debug)]
struct FetchArgs {
    #[command(flatten)]
    api: ApiArgs,
    /// Output file (stdout when omitted).
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SampleArgs {
    /// Output file (stdout when omitted).
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the recommended settings file.
    Init {
        #[arg(long, value_name = "FILE", default_value = DEFAULT_SETTINGS_FILE)]
        path: PathBuf,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Print the JSON Schema of the settings file.
    Schema,
    /// Print the settings in effect.
    Show,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logging::init_logging(cli.log_file.as_deref(), cli.verbose) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(event = "command_failed", error = %err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.settings.as_deref();
    match cli.command {
        Command::Generate(args) => run_generate(args, config_path).await,
        Command::Fetch(args) => run_fetch(args).await,
        Command::Sample(args) => {
            emit(&sample_destination(args.out), Artifact::Model, sample::SAMPLE_MODEL)
        }
        Command::Config(command) => run_config(command, config_path),
    }
}

async fn run_generate(args: GenerateArgs, config_path: Option<&Path>) -> Result<(), CliError> {
    let loaded = load_settings(config_path)?;
    let mut config = loaded.config;
    args.overrides.apply(&mut config);
    tracing::info!(
        event = "settings_loaded",
        source = %loaded
            .source
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "recommended".to_string())
    );

    let json = match (&args.input, &args.api.model_id) {
        (Some(path), _) => read_source(&FileSource::new(path)).await?,
        (None, Some(model_id)) => read_source(&args.api.source(model_id)?).await?,
        (None, None) => read_source(&FileSource::new("-")).await?,
    };

    let result = GenerationEngine::new(config).generate_str(&json)?;

    if let Some(path) = &args.report {
        write_json_atomic(path, &result.report)?;
    }

    let destination = Destination::resolve(
        args.out.as_deref(),
        args.out_dir.as_deref(),
        &result.report.model_name,
    );
    let mut ddl = result.ddl;
    ddl.push('\n');
    emit(&destination, Artifact::Ddl, &ddl)?;

    if !result.report.warnings.is_empty() {
        tracing::warn!(
            event = "generation_warnings",
            count = result.report.warnings.len(),
            "some relationships or entities were skipped"
        );
    }
    Ok(())
}

async fn run_fetch(args: FetchArgs) -> Result<(), CliError> {
    let model_id = args
        .api
        .model_id
        .as_deref()
        .ok_or_else(|| CliError::InvalidArgs("--model-id is required".to_string()))?;
    let json = read_source(&args.api.source(model_id)?).await?;
    let model = parse_model_str(&json)?;
    tracing::info!(
        event = "model_validated",
        model = %model.display_name(),
        entities = model.entities.len()
    );

    let destination = match args.out {
        Some(path) => Destination::File(path),
        None => Destination::Stdout,
    };
    let mut json = json;
    if !json.ends_with('\n') {
        json.push('\n');
    }
    emit(&destination, Artifact::Model, &json)
}

fn run_config(command: ConfigCommand, config_path: Option<&Path>) -> Result<(), CliError> {
    match command {
        ConfigCommand::Init { path, force } => {
            save_settings(&path, &DdlConfig::recommended(), force)?;
            tracing::info!(event = "settings_written", path = %path.display());
            println!("wrote {}", path.display());
            Ok(())
        }
        ConfigCommand::Schema => {
            let schema = schemars::schema_for!(DdlConfig);
            let mut json = serde_json::to_string_pretty(&schema)?;
            json.push('\n');
            emit(&Destination::Stdout, Artifact::Text, &json)
        }
        ConfigCommand::Show => {
            let loaded = load_settings(config_path)?;
            let encoded = settings::encode_settings(&loaded.config)?;
            emit(&Destination::Stdout, Artifact::Text, &encoded)
        }
    }
}

async fn read_source(source: &dyn ModelSource) -> Result<String, CliError> {
    tracing::info!(event = "model_read_started", kind = source.kind(), source = %source.describe());
    let json = source.fetch().await?;
    tracing::info!(event = "model_read_finished", bytes = json.len());
    Ok(json)
}

fn sample_destination(out: Option<PathBuf>) -> Destination {
    out.map(Destination::File).unwrap_or(Destination::Stdout)
}

/// What a command writes, for the event logged after a file write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Artifact {
    Ddl,
    Model,
    Text,
}

impl Artifact {
    fn written_event(self) -> &'static str {
        match self {
            Artifact::Ddl => "ddl_written",
            Artifact::Model => "model_written",
            Artifact::Text => "output_written",
        }
    }
}

fn emit(destination: &Destination, artifact: Artifact, text: &str) -> Result<(), CliError> {
    match destination {
        Destination::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
        Destination::File(path) => {
            write_bytes_atomic(path, text.as_bytes())?;
            tracing::info!(
                event = artifact.written_event(),
                path = %path.display(),
                bytes = text.len()
            );
        }
    }
    Ok(())
}

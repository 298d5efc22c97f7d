use crate::config::RegistryConfig;
use crate::core::commands::Command;
use crate::core::{ListQuery, PractitionerId, SortSpec};
use crate::utils::error::{RegistryError, Result};
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, Parser)]
#[command(name = "practitioner-registry")]
#[command(about = "Register, list, update and deactivate medical practitioners")]
pub struct CliConfig {
    #[arg(short, long, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "JSON data file; overrides [storage] from the config file")]
    pub data_file: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Register a new practitioner from a JSON payload
    Register(PayloadArgs),

    /// List active practitioners, one page at a time
    List {
        #[arg(long, help = "Zero-based page number")]
        page: Option<u32>,

        #[arg(long, help = "Page size (default 5)")]
        size: Option<u32>,

        #[arg(long, help = "Sort as field[,direction], e.g. fullName,desc")]
        sort: Option<String>,
    },

    /// Apply a partial update from a JSON payload
    Update(PayloadArgs),

    /// Deactivate a practitioner; repeating it is harmless
    Deactivate { id: u64 },
}

#[derive(Debug, Clone, Args)]
pub struct PayloadArgs {
    #[arg(long, conflicts_with = "payload_file", help = "Inline JSON payload")]
    pub payload: Option<String>,

    #[arg(long, help = "Read the JSON payload from a file")]
    pub payload_file: Option<String>,
}

impl PayloadArgs {
    fn read<T: DeserializeOwned>(&self) -> Result<T> {
        let raw = match (&self.payload, &self.payload_file) {
            (Some(inline), _) => inline.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)?,
            (None, None) => {
                return Err(RegistryError::validation(
                    "payload",
                    "Provide --payload or --payload-file",
                ))
            }
        };

        serde_json::from_str(&raw)
            .map_err(|e| RegistryError::validation("payload", format!("Malformed JSON: {}", e)))
    }
}

impl CliCommand {
    pub fn into_command(self) -> Result<Command> {
        match self {
            CliCommand::Register(args) => Ok(Command::Register(args.read()?)),
            CliCommand::List { page, size, sort } => {
                let sort = sort.as_deref().map(str::parse::<SortSpec>).transpose()?;
                Ok(Command::List(ListQuery {
                    page_number: page,
                    page_size: size,
                    sort,
                }))
            }
            CliCommand::Update(args) => Ok(Command::Update(args.read()?)),
            CliCommand::Deactivate { id } => Ok(Command::Deactivate {
                id: PractitionerId::new(id),
            }),
        }
    }
}

impl CliConfig {
    /// 載入 TOML 配置（若有指定），再套用命令列覆蓋
    pub fn load_registry_config(&self) -> Result<RegistryConfig> {
        let mut config = match &self.config {
            Some(path) => RegistryConfig::from_file(path)?,
            None => RegistryConfig::default(),
        };

        if let Some(data_file) = &self.data_file {
            config.use_data_file(data_file.clone());
        }

        Ok(config)
    }
}

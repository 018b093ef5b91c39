//! Configuration management for the converter CLI

use crate::error::{Audio64Error, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub encode: EncodeConfig,
    pub decode: DecodeConfig,
    pub verbose: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeConfig {
    /// Worker threads used when encoding several inputs at once.
    pub workers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeConfig {
    /// Directory decoded files are saved into.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            encode: EncodeConfig::default(),
            decode: DecodeConfig::default(),
            verbose: false,
        }
    }
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self { workers: 4 }
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self { output_dir: PathBuf::from(".") }
    }
}

impl Config {
    /// Get worker count (convenience method)
    pub fn workers(&self) -> usize {
        self.encode.workers
    }

    /// Get decode output directory (convenience method)
    pub fn output_dir(&self) -> &Path {
        &self.decode.output_dir
    }

    /// Get verbose mode (convenience method)
    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "audio64", about = "Audio Base64 Data URI converter", version)]
pub struct Args {
    #[arg(short = 'c', long = "config", global = true, help = "Config file path (TOML format)")]
    pub config_file: Option<PathBuf>,

    #[arg(short = 'v', long = "verbose", global = true, help = "Enable verbose output mode")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Encode audio files into Base64 Data URIs
    Encode {
        /// Input audio file paths
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (one input) or directory (several inputs); stdout when omitted
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        /// Override the declared MIME type (must be audio/*)
        #[arg(long = "mime")]
        mime: Option<String>,

        /// Worker thread count for batch encoding
        #[arg(long = "workers")]
        workers: Option<usize>,
    },

    /// Decode a Data URI back into a playable audio file
    Decode {
        /// File holding the Data URI text; read from stdin when omitted
        input: Option<PathBuf>,

        /// Directory the decoded file is saved into
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },

    /// Validate a Data URI and report its header without saving anything
    Inspect {
        /// File holding the Data URI text; read from stdin when omitted
        input: Option<PathBuf>,
    },
}

impl Config {
    /// Create config from command line arguments and config file
    pub fn from_args_and_config(args: &Args) -> Result<Self> {
        // First load config file (if provided)
        let mut config = if let Some(config_path) = &args.config_file {
            Self::from_file(config_path)?
        } else {
            Self::default()
        };

        // Command line arguments override config file settings
        if args.verbose {
            config.verbose = true;
        }
        match &args.command {
            Command::Encode { workers: Some(workers), .. } => {
                config.encode.workers = *workers;
            }
            Command::Decode { output: Some(output), .. } => {
                config.decode.output_dir = output.clone();
            }
            _ => {}
        }

        config.validate()?;

        Ok(config)
    }

    /// Load config from TOML config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Audio64Error::config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| Audio64Error::config(format!("Failed to parse config file: {}", e)))
    }

    /// Validate configuration parameter validity
    pub fn validate(&self) -> Result<()> {
        if self.encode.workers == 0 {
            return Err(Audio64Error::config("Worker count must be greater than 0"));
        }
        if self.encode.workers > num_cpus::get() * 2 {
            return Err(Audio64Error::config(
                "Worker count cannot exceed 2x logical CPU cores",
            ));
        }

        if self.decode.output_dir.as_os_str().is_empty() {
            return Err(Audio64Error::config("Output directory must not be empty"));
        }

        Ok(())
    }

    /// Save config to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Audio64Error::config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| Audio64Error::config(format!("Failed to write config file: {}", e)))
    }

    /// Create default config file
    pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let default_config = Self::default();
        default_config.save_to_file(path)
    }
}

pub mod utils {
    pub fn cpu_count() -> usize {
        num_cpus::get()
    }

    /// Worker count for a batch: one per input, capped at the core count.
    pub fn recommended_workers(inputs: usize) -> usize {
        inputs.clamp(1, cpu_count())
    }
}

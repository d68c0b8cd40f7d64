use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// YouTube Data API settings
    pub api: ApiConfig,

    /// Punctuation model settings
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API key (can also be supplied via --api-key or YOUTUBE_API_KEY)
    pub key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Command used to run the punctuation restoration model
    pub command: String,

    /// Extra arguments passed to the model command
    pub args: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig { key: None },
            model: ModelConfig {
                command: "punctuate".to_string(),
                args: Vec::new(),
            },
        }
    }
}

impl Config {
    /// Load configuration from file or create default
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content =
                fs_err::read_to_string(&config_path).context("Failed to read config file")?;

            let config: Config =
                serde_yaml::from_str(&content).context("Failed to parse config file")?;

            Ok(config)
        } else {
            let config = Self::default();
            config.save().await?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub async fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;

        fs_err::write(&config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join("tubescribe").join("config.yaml"))
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        match &self.api.key {
            Some(_) => println!("  API Key: (set)"),
            None => println!("  API Key: (not set)"),
        }
        println!("  Model Command: {}", self.model.command);
        if !self.model.args.is_empty() {
            println!("  Model Args: {}", self.model.args.join(" "));
        }
    }

    /// Interactive configuration setup
    pub async fn interactive_setup(&self) -> Result<()> {
        println!("Interactive configuration setup coming soon!");
        println!("For now, please edit the config file manually:");
        println!("  {}", Self::config_path()?.display());
        Ok(())
    }
}

/// Everything one pipeline run needs: the API key, exactly one of a video or
/// playlist id, and an optional output path.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub api_key: String,
    pub video_id: Option<String>,
    pub playlist_id: Option<String>,
    pub output_file: Option<PathBuf>,
}

impl FetchRequest {
    /// Exactly one of video_id/playlist_id must be set
    pub fn validate(&self) -> Result<()> {
        crate::resolver::validate_selection(self.video_id.as_deref(), self.playlist_id.as_deref())
    }

    /// Tag used to build default output filenames
    pub fn tag(&self) -> &str {
        self.video_id
            .as_deref()
            .or(self.playlist_id.as_deref())
            .unwrap_or("untitled")
    }
}

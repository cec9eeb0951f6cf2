//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{load_config, GatewayConfig};
use crate::decode::{DecoderConfig, ResponseDecoder};
use crate::error::{Error, Result, ResultExt};
use crate::gateway;
use crate::registration::RegistrationOptions;
use serde_json::{json, Value};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Decode {
                file,
                retain_untranslated,
                retain_unknown,
            } => {
                let config = DecoderConfig::new()
                    .with_retain_untranslated_values(*retain_untranslated)
                    .with_retain_unknown_fields(*retain_unknown);
                self.decode(file.as_deref(), config)
            }
            Commands::Register { options, payment } => self.register(options, *payment).await,
            Commands::Validate => self.validate(),
        }
    }

    /// Load the gateway configuration named by `--config`
    fn load_config(&self) -> Result<GatewayConfig> {
        let path = self
            .cli
            .config
            .as_ref()
            .ok_or_else(|| Error::config("Gateway config not specified (use -C flag)"))?;
        load_config(path)
    }

    fn decode(&self, file: Option<&Path>, config: DecoderConfig) -> Result<()> {
        let body = match file {
            Some(path) => fs::read(path)
                .with_context(|| format!("Failed to read body from '{}'", path.display()))?,
            None => {
                let mut buf = Vec::new();
                std::io::stdin().read_to_end(&mut buf)?;
                buf
            }
        };
        let body = String::from_utf8(body)
            .map_err(|e| Error::decode(format!("Body is not valid UTF-8: {e}")))?;

        let response = ResponseDecoder::with_config(config).decode(&body);
        self.emit(&response.summary())
    }

    async fn register(&self, options_path: &Path, payment: bool) -> Result<()> {
        let config = self.load_config()?;
        let content = fs::read_to_string(options_path).with_context(|| {
            format!("Failed to read options from '{}'", options_path.display())
        })?;
        let options: RegistrationOptions = serde_yaml::from_str(&content)?;

        let (registrar, client) = gateway::from_config(&config)?;
        let registration = if payment {
            registrar.payment(options)?
        } else {
            registrar.registration(options)?
        };

        info!(
            vendor_tx_code = %registration.vendor_tx_code(),
            endpoint = client.endpoint_for(&registration),
            "Registering transaction"
        );
        let response = client.register(&registration).await?;

        let mut output = response.summary();
        output["vendor_tx_code"] = json!(registration.vendor_tx_code().as_str());
        self.emit(&output)
    }

    fn validate(&self) -> Result<()> {
        let config = self.load_config()?;
        let endpoint = config
            .endpoint_url
            .clone()
            .or_else(|| config.defaults.mode.map(|m| m.registration_url().to_string()));

        self.emit(&json!({
            "valid": true,
            "endpoint": endpoint,
            "vendor": config.defaults.vendor,
            "decoder": config.decoder,
        }))
    }

    fn emit(&self, value: &Value) -> Result<()> {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{text}");
        Ok(())
    }
}

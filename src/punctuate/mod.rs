use anyhow::{Context, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::TubescribeError;

/// Punctuation restoration seam. The real implementation drives an external
/// pretrained model; tests substitute a mock.
#[async_trait]
pub trait Restorer: Send + Sync {
    /// Return the input text with sentence boundaries and punctuation inserted
    async fn restore(&self, text: &str) -> Result<String>;
}

/// Handle over an external punctuation restoration model, driven as a
/// subprocess over stdin/stdout. Loaded once per run and reused for every
/// record; inference is stateless.
#[derive(Debug)]
pub struct PunctuationModel {
    command: String,
    args: Vec<String>,
}

impl PunctuationModel {
    /// Probe the model command once. Failure here is fatal for the whole run,
    /// before any transcript processing begins.
    pub async fn load(command: impl Into<String>, args: Vec<String>) -> Result<Self> {
        let command = command.into();

        let probe = Command::new(&command)
            .arg("--version")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        match probe {
            Ok(output) if output.status.success() => {
                tracing::debug!("Punctuation model available: {}", command);
                Ok(Self { command, args })
            }
            Ok(output) => Err(TubescribeError::ModelLoad(format!(
                "`{} --version` exited with {}",
                command, output.status
            ))
            .into()),
            Err(e) => Err(
                TubescribeError::ModelLoad(format!("failed to run `{}`: {}", command, e)).into(),
            ),
        }
    }
}

#[async_trait]
impl Restorer for PunctuationModel {
    async fn restore(&self, text: &str) -> Result<String> {
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("Failed to spawn punctuation model")?;

        let mut stdin = child
            .stdin
            .take()
            .context("Punctuation model stdin unavailable")?;
        stdin.write_all(text.as_bytes()).await?;
        drop(stdin);

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("Punctuation model failed: {}", stderr.trim());
        }

        let restored =
            String::from_utf8(output.stdout).context("Model produced non-UTF-8 output")?;

        Ok(restored.trim_end().to_string())
    }
}

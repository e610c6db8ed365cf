use super::cli_mapper::{self, AssistantArg};
use crate::error::BabajiError;
use crate::models::{ApiKey, ModelDescriptor};
use anyhow::{Context, Result};
use async_trait::async_trait;
use indicatif::{ProgressBar as IndicatifProgressBar, ProgressStyle};
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

/// Captured result of one assistant invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// An external assistant that turns an instruction into text
#[async_trait]
pub trait AssistantTool {
    async fn invoke(
        &self,
        model: &ModelDescriptor,
        task: &str,
        instruction: &str,
    ) -> Result<ToolOutput>;
}

/// Runs the assistant CLI as a child process
pub struct ToolRunner {
    command: String,
    api_key: ApiKey,
    show_progress: bool,
}

impl ToolRunner {
    pub fn new(command: impl Into<String>, api_key: ApiKey) -> Self {
        Self {
            command: command.into(),
            api_key,
            show_progress: true,
        }
    }

    /// Run without the spinner; output is only captured
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Arguments for one invocation, in order
    pub fn build_args(&self, model: &ModelDescriptor, task: &str, instruction: &str) -> Vec<String> {
        cli_mapper::build_args(&[
            AssistantArg::Model(cli_mapper::model_spec(model)),
            AssistantArg::ApiKey(self.api_key.expose().to_string()),
            AssistantArg::Task(task.to_string()),
            AssistantArg::Instruction(instruction.to_string()),
        ])
    }

    fn spinner(&self) -> Result<Option<IndicatifProgressBar>> {
        if !self.show_progress {
            return Ok(None);
        }

        let pb = IndicatifProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")?
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
        );
        pb.set_message(format!("Running {}...", self.command));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Ok(Some(pb))
    }

    async fn run_command(&self, args: &[String]) -> Result<ToolOutput> {
        let mut cmd = Command::new(&self.command);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BabajiError::ToolNotFound(self.command.clone()).into());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to spawn '{}'", self.command));
            }
        };

        let progress = self.spinner()?;

        // Drain both pipes together so a chatty stderr cannot block stdout
        let mut stdout = child.stdout.take().context("Failed to capture stdout")?;
        let mut stderr = child.stderr.take().context("Failed to capture stderr")?;

        let mut stdout_buf = [0u8; 8192];
        let mut stderr_buf = [0u8; 8192];

        let mut output = Vec::new();
        let mut stderr_output = Vec::new();
        let mut stdout_done = false;
        let mut stderr_done = false;

        // Raw bytes are kept as-is; line endings and a missing final newline survive
        while !stdout_done || !stderr_done {
            tokio::select! {
                read = stdout.read(&mut stdout_buf), if !stdout_done => {
                    let n = read.context("Failed to read stdout")?;
                    if n == 0 {
                        stdout_done = true;
                    } else {
                        let chunk = &stdout_buf[..n];
                        output.extend_from_slice(chunk);
                        if let Some(ref pb) = progress {
                            if let Some(line) = last_line(chunk) {
                                pb.set_message(line);
                            }
                        }
                    }
                }
                read = stderr.read(&mut stderr_buf), if !stderr_done => {
                    let n = read.context("Failed to read stderr")?;
                    if n == 0 {
                        stderr_done = true;
                    } else {
                        stderr_output.extend_from_slice(&stderr_buf[..n]);
                    }
                }
            }
        }

        let status = child.wait().await?;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        Ok(ToolOutput {
            stdout: String::from_utf8_lossy(&output).into_owned(),
            stderr: String::from_utf8_lossy(&stderr_output).into_owned(),
            exit_code: status.code(),
        })
    }
}

/// Last non-empty line of a chunk, shortened for the spinner
fn last_line(chunk: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(chunk);
    let line = text.lines().rev().map(str::trim).find(|l| !l.is_empty())?;
    if line.chars().count() > 60 {
        let truncated: String = line.chars().take(60).collect();
        Some(format!("{}...", truncated))
    } else {
        Some(line.to_string())
    }
}

#[async_trait]
impl AssistantTool for ToolRunner {
    async fn invoke(
        &self,
        model: &ModelDescriptor,
        task: &str,
        instruction: &str,
    ) -> Result<ToolOutput> {
        let args = self.build_args(model, task, instruction);
        tracing::debug!(
            command = %self.command,
            model = %cli_mapper::model_spec(model),
            task,
            "invoking assistant"
        );

        let output = self.run_command(&args).await?;
        if !output.success() {
            tracing::warn!(
                command = %self.command,
                task,
                exit_code = ?output.exit_code,
                stderr = %output.stderr.trim(),
                "assistant exited unsuccessfully"
            );
        }
        Ok(output)
    }
}

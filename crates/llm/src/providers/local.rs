//! Local language-model runner invoked as a subprocess.
//!
//! The instruction text is written to the runner's stdin and its stdout is
//! taken as the draft. The child is spawned with `kill_on_drop`, so a
//! timed-out or cancelled call never leaves a runner behind.

use crate::client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use navigator_core::{AppError, AppResult};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Subprocess-backed LLM client.
#[derive(Debug, Clone)]
pub struct LocalRunnerClient {
    command: String,
    args: Vec<String>,
}

impl LocalRunnerClient {
    /// Create a runner for `command` invoked with `args`.
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    /// Text written to the runner's stdin.
    fn stdin_payload(request: &LlmRequest) -> String {
        match request.system.as_deref() {
            Some(system) => format!("{}\n\n{}", system, request.prompt),
            None => request.prompt.clone(),
        }
    }

    async fn run(&self, payload: String) -> AppResult<std::process::Output> {
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                AppError::Llm(format!("Failed to spawn local runner '{}': {}", self.command, e))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| AppError::Llm("Local runner stdin unavailable".to_string()))?;

        let writer = async move {
            stdin.write_all(payload.as_bytes()).await?;
            stdin.shutdown().await
        };

        let (written, output) = tokio::join!(writer, child.wait_with_output());

        // A runner may close stdin early; its exit status decides the outcome
        if let Err(e) = written {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(AppError::Llm(format!("Failed to write to local runner: {}", e)));
            }
        }
        output.map_err(|e| AppError::Llm(format!("Local runner failed: {}", e)))
    }
}

#[async_trait::async_trait]
impl LlmClient for LocalRunnerClient {
    fn provider_name(&self) -> &str {
        "local"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        tracing::info!(command = %self.command, "Invoking local runner");

        let payload = Self::stdin_payload(request);
        let output = match request.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.run(payload))
                .await
                .map_err(|_| {
                    AppError::Llm(format!(
                        "Local runner timed out after {}ms",
                        timeout.as_millis()
                    ))
                })??,
            None => self.run(payload).await?,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let snippet: String = stderr.chars().take(200).collect();
            return Err(AppError::Llm(format!(
                "Local runner exited with {}: {}",
                output.status, snippet
            )));
        }

        let content = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if content.is_empty() {
            return Err(AppError::Llm("Local runner produced no output".to_string()));
        }

        tracing::info!(output_chars = content.len(), "Received completion from local runner");

        Ok(LlmResponse {
            content,
            model: request.model.clone(),
            usage: LlmUsage::default(),
        })
    }
}

use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Trait for executing system commands, allowing for mocking in tests
pub trait CommandExecutor: Send + Sync {
    /// Execute a command with arguments and capture its output
    fn execute(&self, command: &str, args: &[&str], working_dir: &Path) -> Result<Output>;

    /// Execute a command interactively (inherits stdin/stdout/stderr)
    fn execute_interactive(&self, command: &str, args: &[&str], working_dir: &Path) -> Result<i32>;
}

/// Real command executor using std::process::Command
pub struct RealCommandExecutor;

impl RealCommandExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealCommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor for RealCommandExecutor {
    fn execute(&self, command: &str, args: &[&str], working_dir: &Path) -> Result<Output> {
        let output = Command::new(command)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to execute {}", command))?;

        Ok(output)
    }

    fn execute_interactive(&self, command: &str, args: &[&str], working_dir: &Path) -> Result<i32> {
        let mut child = Command::new(command)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("Failed to execute {}", command))?;

        let status = child.wait()?;
        Ok(status.code().unwrap_or(-1))
    }
}

/// Mock command executor for testing
#[cfg(test)]
pub struct MockCommandExecutor {
    /// Pre-configured outputs, consumed in order of registration
    outputs: std::sync::Mutex<Vec<MockCommandResult>>,
    /// Every command line executed so far
    calls: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
#[derive(Clone, Debug)]
pub struct MockCommandResult {
    /// Full command line ("terraform import -no-color a.b 1") or just the program name
    pub command: String,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

#[cfg(test)]
impl MockCommandResult {
    pub fn ok(command: &str, stdout: &str) -> Self {
        Self {
            command: command.to_string(),
            exit_code: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    pub fn stderr(command: &str, stderr: &str) -> Self {
        Self {
            command: command.to_string(),
            exit_code: 1,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}

#[cfg(test)]
impl MockCommandExecutor {
    pub fn new() -> Self {
        Self::with_outputs(Vec::new())
    }

    pub fn with_outputs(outputs: Vec<MockCommandResult>) -> Self {
        Self {
            outputs: std::sync::Mutex::new(outputs),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Command lines executed so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn take_result(&self, command: &str, args: &[&str]) -> Option<MockCommandResult> {
        let line = std::iter::once(command)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.lock().unwrap().push(line.clone());

        let mut outputs = self.outputs.lock().unwrap();
        outputs
            .iter()
            .position(|r| r.command == line)
            .or_else(|| outputs.iter().position(|r| r.command == command))
            .map(|index| outputs.remove(index))
    }
}

#[cfg(test)]
impl Default for MockCommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl CommandExecutor for MockCommandExecutor {
    fn execute(&self, command: &str, args: &[&str], _working_dir: &Path) -> Result<Output> {
        if let Some(mock_result) = self.take_result(command, args) {
            return Ok(Output {
                status: create_exit_status(mock_result.exit_code),
                stdout: mock_result.stdout.into_bytes(),
                stderr: mock_result.stderr.into_bytes(),
            });
        }

        // Default: successful empty output
        Ok(Output {
            status: create_exit_status(0),
            stdout: Vec::new(),
            stderr: Vec::new(),
        })
    }

    fn execute_interactive(&self, command: &str, args: &[&str], _working_dir: &Path) -> Result<i32> {
        Ok(self
            .take_result(command, args)
            .map(|r| r.exit_code)
            .unwrap_or(0))
    }
}

#[cfg(test)]
fn create_exit_status(code: i32) -> std::process::ExitStatus {
    // ExitStatus can't be constructed directly
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        // Raw wait status: the exit code lives in the high byte
        std::process::ExitStatus::from_raw(code << 8)
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::ExitStatusExt;
        std::process::ExitStatus::from_raw(code as u32)
    }
}

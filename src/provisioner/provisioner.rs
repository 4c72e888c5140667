use anyhow::Result;

/// Result of a single import attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportAttempt {
    /// Everything the provisioner wrote to standard output
    pub stdout: String,
    /// Everything the provisioner wrote to standard error
    pub stderr: String,
}

impl ImportAttempt {
    /// Any standard error output counts as a failure; exit codes are ignored
    pub fn failed(&self) -> bool {
        !self.stderr.is_empty()
    }
}

/// Trait for infrastructure provisioners able to import existing resources
/// (Terraform, OpenTofu)
pub trait Provisioner {
    /// Get the name of this provisioner (e.g., "terraform", "tofu")
    fn get_name(&self) -> &str;

    /// Prepare the local state directory ('terraform init')
    fn init(&self) -> Result<()>;

    /// Attach the live resource `external_id` to the declared `address`.
    /// Errors are reserved for failing to run the provisioner at all.
    fn import(&self, address: &str, external_id: &str) -> Result<ImportAttempt>;

    /// Render the imported attributes of `address` as configuration text
    fn show_state(&self, address: &str) -> Result<String>;

    /// Delete all local state so nothing leaks between runs
    fn reset_state(&self) -> Result<()>;
}

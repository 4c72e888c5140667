//! Scratch declaration file the provisioner needs before it can import

use crate::annotate::MigrationItem;
use crate::config::ProviderSettings;
use crate::traits::FileSystem;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

/// Provider block plus the two variables it reads its credentials from
pub fn preamble(provider: &ProviderSettings) -> String {
    format!(
        r#"
provider "{name}" {{
  auth_token = var.{token}
  api_url = var.{url}
}}

variable "{token}" {{
  type = string
}}

variable "{url}" {{
  type = string
}}

"#,
        name = provider.name,
        token = provider.auth_token_variable,
        url = provider.api_url_variable,
    )
}

/// Preamble followed by one empty resource block per item
pub fn render(provider: &ProviderSettings, items: &[MigrationItem<'_>]) -> String {
    let mut out = preamble(provider);

    for item in items {
        let annotation = item.annotation();
        // Writing to a String cannot fail
        let _ = write!(
            out,
            "\nresource \"{}\" \"{}\" {{\n}}\n",
            annotation.resource_type, annotation.resource_id
        );
    }

    out
}

/// Overwrite `path` with the declarations for `items`
pub fn write(
    fs: &dyn FileSystem,
    path: &Path,
    provider: &ProviderSettings,
    items: &[MigrationItem<'_>],
) -> Result<()> {
    fs.write(path, &render(provider, items))
        .with_context(|| format!("Failed to write boilerplate file {}", path.display()))
}

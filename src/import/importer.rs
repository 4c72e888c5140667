use crate::annotate::Annotation;
use crate::error::MigrationError;
use crate::provisioner::Provisioner;
use crate::traits::Output;
use anyhow::Result;

/// Imports live state for annotated items with bounded retries.
///
/// Items are retried as a cohort: a round attempts every pending item in
/// order, and the items that failed form the next round. There is no
/// backoff between rounds.
pub struct StateImporter<'a> {
    provisioner: &'a dyn Provisioner,
    output: &'a dyn Output,
    max_tries: u32,
}

impl<'a> StateImporter<'a> {
    pub fn new(provisioner: &'a dyn Provisioner, output: &'a dyn Output, max_tries: u32) -> Self {
        Self {
            provisioner,
            output,
            max_tries,
        }
    }

    /// Import every item.
    ///
    /// Fails with `MigrationError::ImportExhausted` as soon as one item has
    /// used up its tries; items after it in the same round are not attempted.
    pub fn import_all(&self, items: &[&Annotation]) -> Result<()> {
        let mut pending: Vec<(&Annotation, u32)> = items.iter().map(|item| (*item, 1)).collect();

        while !pending.is_empty() {
            let mut retry = Vec::new();

            for (item, attempt) in pending {
                let result = self
                    .provisioner
                    .import(&item.resource_type_id, &item.external_id)?;

                if result.failed() {
                    if !result.stdout.trim().is_empty() {
                        self.output.dimmed(result.stdout.trim_end());
                    }
                    self.output.dimmed(result.stderr.trim_end());

                    if attempt >= self.max_tries {
                        self.output.error(&format!(
                            "Error importing state of item {} from ID {}",
                            item.resource_type_id, item.external_id
                        ));
                        return Err(MigrationError::ImportExhausted {
                            address: item.resource_type_id.clone(),
                            external_id: item.external_id.clone(),
                            attempts: attempt,
                        }
                        .into());
                    }

                    self.output.warning(&format!(
                        "Failed to import state of item {} from ID {}, retrying...",
                        item.resource_type_id, item.external_id
                    ));
                    retry.push((item, attempt + 1));
                    continue;
                }

                self.output.success(&format!(
                    "Successfully imported state of item {} from ID {}",
                    item.resource_type_id, item.external_id
                ));
            }

            pending = retry;
        }

        Ok(())
    }
}

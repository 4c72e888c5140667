//! Text surgery on `state show` output
//!
//! The provisioner prints imported state as configuration text. No parser
//! is applied; a fixed, ordered list of substitutions turns it into
//! something fit to commit.

use crate::annotate::Annotation;
use regex::Regex;

/// Ordered transform pipeline over `state show` output
pub struct StateTransformer {
    ansi_pattern: Regex,
    id_attribute_pattern: Regex,
    url_attribute_pattern: Regex,
    heredoc_open_pattern: Regex,
    heredoc_close_pattern: Regex,
    comment_pattern: Regex,
}

impl Default for StateTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl StateTransformer {
    /// Create a new transformer with compiled regex patterns
    pub fn new() -> Self {
        Self {
            // CSI and other escape sequences, 7-bit and 8-bit forms
            ansi_pattern: Regex::new(r"(?:\x1B[@-_]|[\x80-\x9F])[0-?]*[ -/]*[@-~]")
                .expect("Invalid ANSI escape regex"),

            // Computed attributes that must not be hardcoded:
            //     id  = "D123"
            //     url = "https://app.signalfx.com/#/dashboard/D123"
            id_attribute_pattern: Regex::new(r"(?m)^ *id *=.*\n?")
                .expect("Invalid id attribute regex"),
            url_attribute_pattern: Regex::new(r"(?m)^ *url *=.*\n?")
                .expect("Invalid url attribute regex"),

            // description = <<~EOT  /  <<-EOT
            heredoc_open_pattern: Regex::new(r"<<[~-]EOT\b").expect("Invalid heredoc open regex"),

            // Closing marker on a line of its own, optionally ending a list item
            heredoc_close_pattern: Regex::new(r"(?m)^([ \t]*)EOT[ \t]*(,?)[ \t]*$")
                .expect("Invalid heredoc close regex"),

            // # signalfx_dashboard.ops:
            comment_pattern: Regex::new(r"(?m)^# .*\n?").expect("Invalid comment regex"),
        }
    }

    /// Apply the cleanup steps, in order: strip ANSI escapes, drop `id` and
    /// `url` attributes, rewrite heredoc delimiters to `<<-EOF`/`EOF`, drop
    /// full-line comments
    pub fn transform(&self, state: &str) -> String {
        let text = self.ansi_pattern.replace_all(state, "");
        let text = self.id_attribute_pattern.replace_all(&text, "");
        let text = self.url_attribute_pattern.replace_all(&text, "");
        let text = self.heredoc_open_pattern.replace_all(&text, "<<-EOF");
        let text = self.heredoc_close_pattern.replace_all(&text, "${1}EOF${2}");
        let text = self.comment_pattern.replace_all(&text, "");

        text.into_owned()
    }
}

/// Replace quoted literal ids of `references` with expressions pointing at
/// the declared resources, e.g. `"C456"` → `signalfx_time_chart.ops--load.id`
pub fn rewrite_references(text: &str, references: &[&Annotation]) -> String {
    let mut text = text.to_string();

    for reference in references {
        let literal = format!("\"{}\"", reference.external_id);
        if text.contains(&literal) {
            text = text.replace(&literal, &reference.id_reference());
        }
    }

    text
}

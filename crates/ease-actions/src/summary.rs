//! Rendering of action outcomes under the cleaned reply.

use ease_core::{ActionResult, SummaryConfig};

/// One `"<prefix> <message>"` line per result, in result order.
pub fn summary_lines(results: &[ActionResult], style: &SummaryConfig) -> Vec<String> {
    results
        .iter()
        .map(|result| {
            let prefix = if result.success {
                &style.success_prefix
            } else {
                &style.failure_prefix
            };
            format!("{} {}", prefix, result.message)
        })
        .collect()
}

/// Append the summary block to the prose, separated by a blank line.
///
/// Without results the prose is returned unchanged. Blank prose yields the
/// summary lines alone.
pub fn render_display_text(prose: &str, results: &[ActionResult], style: &SummaryConfig) -> String {
    if results.is_empty() {
        return prose.to_string();
    }

    let block = summary_lines(results, style).join("\n");
    if prose.trim().is_empty() {
        block
    } else {
        format!("{}\n\n{}", prose, block)
    }
}

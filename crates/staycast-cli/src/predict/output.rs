use anyhow::{Context, Result};
use std::path::Path;

use staycast::narrative::StayBreakdown;
use staycast::report::render_breakdown_html;

use crate::util::write_bytes_to_file;

/// Print the breakdown to stdout and optionally write it as an HTML page.
pub fn write_breakdown(breakdown: &StayBreakdown, html_output: Option<&Path>) -> Result<()> {
    print!("{}", breakdown);

    if let Some(path) = html_output {
        let page = render_breakdown_html(breakdown).into_string();
        write_bytes_to_file(path, page.as_bytes())
            .with_context(|| format!("Failed to write breakdown page: {}", path.display()))?;
        log::info!("Breakdown page saved to: {}", path.display());
    }
    Ok(())
}

//! Standalone HTML reports assembled from sections of markup and plots.
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use plotly::Plot;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";

const REPORT_STYLE: &str = "
body { font-family: Helvetica, Arial, sans-serif; margin: 0 auto; max-width: 1100px; padding: 20px; color: #222; }
header { border-bottom: 2px solid #6a82fb; margin-bottom: 20px; }
header .meta { color: #666; font-size: 14px; }
section { margin-bottom: 40px; }
table { border-collapse: collapse; }
td, th { border: 1px solid #ddd; padding: 6px 12px; text-align: left; }
.plot { margin: 20px 0; }
";

enum SectionItem {
    Content(Markup),
    Plot(Plot),
}

/// A titled block of a report.
pub struct ReportSection {
    title: String,
    items: Vec<SectionItem>,
}

impl ReportSection {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            items: Vec::new(),
        }
    }

    pub fn add_content(&mut self, content: Markup) {
        self.items.push(SectionItem::Content(content));
    }

    pub fn add_plot(&mut self, plot: Plot) {
        self.items.push(SectionItem::Plot(plot));
    }

    fn render(&self, index: usize) -> Markup {
        html! {
            section {
                h2 { (self.title) }
                @for (i, item) in self.items.iter().enumerate() {
                    @match item {
                        SectionItem::Content(markup) => {
                            div { (markup) }
                        }
                        SectionItem::Plot(plot) => {
                            @let div_id = format!("plot-{}-{}", index, i);
                            div class="plot" {
                                (PreEscaped(plot.to_inline_html(Some(div_id.as_str()))))
                            }
                        }
                    }
                }
            }
        }
    }
}

/// An HTML report made of sections, rendered with inline plotly charts.
pub struct Report {
    software_name: String,
    version: String,
    title: String,
    generated_at: String,
    sections: Vec<ReportSection>,
}

impl Report {
    pub fn new(software_name: &str, version: &str, title: &str) -> Self {
        Self {
            software_name: software_name.to_string(),
            version: version.to_string(),
            title: title.to_string(),
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            sections: Vec::new(),
        }
    }

    pub fn add_section(&mut self, section: ReportSection) {
        self.sections.push(section);
    }

    pub fn render(&self) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    title { (self.title) }
                    script src=(PLOTLY_CDN) {}
                    style { (PreEscaped(REPORT_STYLE)) }
                }
                body {
                    header {
                        h1 { (self.title) }
                        p class="meta" {
                            (self.software_name) " v" (self.version) " | generated " (self.generated_at)
                        }
                    }
                    @for (i, section) in self.sections.iter().enumerate() {
                        (section.render(i))
                    }
                }
            }
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.render().into_string())
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        log::info!("Report saved to: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_renders_sections() {
        let mut report = Report::new("staycast", "0.1.0", "Length of Stay Report");
        let mut section = ReportSection::new("Overview");
        section.add_content(html! { p { "Hello <world>" } });
        report.add_section(section);

        let page = report.render().into_string();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<h2>Overview</h2>"));
        assert!(page.contains("Hello &lt;world&gt;"));
        assert!(page.contains(PLOTLY_CDN));
    }
}

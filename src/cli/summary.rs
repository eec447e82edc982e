//! The report printed after a run.

use flattener::Report;

use super::terminal::{is_narrow, Colorize};

/// Maximum number of skipped records listed in table output.
const MAX_SKIP_DISPLAY: usize = 10;

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub struct Summary<'a> {
    report: &'a Report,
}

impl<'a> Summary<'a> {
    pub const fn new(report: &'a Report) -> Self {
        Self { report }
    }

    pub fn print(&self, format: OutputFormat, quiet: bool) -> anyhow::Result<()> {
        match format {
            OutputFormat::Json => self.output_json()?,
            OutputFormat::Table if quiet => self.output_quiet(),
            OutputFormat::Table => self.output_table(),
        }
        Ok(())
    }

    fn output_json(&self) -> anyhow::Result<()> {
        use serde_json::json;

        let report = self.report;
        let skipped: Vec<_> = report
            .skipped
            .iter()
            .map(|skipped| {
                json!({
                    "index": skipped.index,
                    "identifier": skipped.identifier,
                    "reason": skipped.reason,
                })
            })
            .collect();

        let output = json!({
            "input": report.paths.input.display().to_string(),
            "outputs": {
                "table": report.paths.table.display().to_string(),
                "blob": report.paths.blob.display().to_string(),
            },
            "loaded": report.loaded,
            "extracted": report.extracted,
            "skipped": skipped,
        });

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    fn output_quiet(&self) {
        let report = self.report;
        println!(
            "loaded={} extracted={} skipped={}",
            report.loaded,
            report.extracted,
            report.skipped.len()
        );
    }

    fn output_table(&self) {
        let report = self.report;
        let narrow = is_narrow();

        println!("Extraction summary");
        println!("{}", "──────────────────".dim());

        if narrow {
            // Stacked output for narrow terminals
            println!("Input: {}", report.paths.input.display());
            println!("Records: {}", report.loaded);
        } else {
            println!("{:<10} {}", "Input", report.paths.input.display());
            println!("{:<10} {}", "Records", report.loaded);
        }

        println!();

        println!("Extracted: {} ✅", report.extracted.to_string().success());

        if report.skipped.is_empty() {
            println!("Skipped: {} ✅", "0".success());
        } else {
            println!("Skipped: {} ⚠️", report.skipped.len().to_string().warning());
            for skipped in report.skipped.iter().take(MAX_SKIP_DISPLAY) {
                println!(
                    "  - {} (row {}): {}",
                    skipped.identifier, skipped.index, skipped.reason
                );
            }
            if report.skipped.len() > MAX_SKIP_DISPLAY {
                println!(
                    "  - ... and {} more",
                    report.skipped.len() - MAX_SKIP_DISPLAY
                );
            }
        }

        println!();

        println!("Wrote {}", report.paths.table.display());
        println!("Wrote {}", report.paths.blob.display());
    }
}

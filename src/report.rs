use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use crate::mode::SampleMode;
use crate::rng::SeedOrigin;

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    #[serde(flatten)]
    pub mode: SampleMode,
    pub seed: u64,
    pub seed_origin: SeedOrigin,
    pub lines_read: usize,
    pub lines_written: usize,
}

/// Writes the report as a single line of JSON.
pub fn write_report<W: Write>(mut writer: W, report: &RunReport) -> Result<()> {
    serde_json::to_writer(&mut writer, report)?;
    writeln!(&mut writer)?;
    Ok(())
}

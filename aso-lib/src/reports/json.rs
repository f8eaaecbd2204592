use super::Report;
use crate::Result;
use core::fmt::Write;

pub fn generate<W: Write>(report: &Report<'_>, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", serde_json::to_string_pretty(report)?)?;
    Ok(())
}

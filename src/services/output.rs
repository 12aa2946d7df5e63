use serde::Serialize;
use std::io::Write;

/// Writes `data` as two-space indented JSON followed by a newline.
pub fn write_pretty<T: Serialize + ?Sized>(out: &mut dyn Write, data: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, data)?;
    writeln!(out)?;
    Ok(())
}

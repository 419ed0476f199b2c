//! JSON record sink

use crate::menu::MenuItem;
use crate::output::traits::SinkResult;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes `items` as a 4-space indented JSON array
///
/// Non-ASCII text (`®`, `é`) is written as UTF-8, not escaped. An empty
/// sequence is written as `[]`.
pub fn save_json(items: &[MenuItem], path: &Path) -> SinkResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        items.serialize(&mut serializer)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

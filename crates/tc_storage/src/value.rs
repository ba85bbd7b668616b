use std::{
    fs,
    io::{BufReader, BufWriter, Write as _},
    path::Path,
};

use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = fs::File::open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(Into::into)
}

/// Write `value` as pretty-printed JSON.
///
/// The data is written to a sibling temporary file first, and then renamed
/// into place.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp = path.with_extension("json.tmp");
    let file = fs::File::create(&tmp)?;
    let mut buf = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut buf, value)?;
    buf.write_all(b"\n")?;
    buf.flush()?;
    drop(buf);

    fs::rename(&tmp, path)?;

    Ok(())
}

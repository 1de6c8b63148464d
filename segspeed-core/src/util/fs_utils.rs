use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

/// true if the file extension marks this file as gzip-compressed.
pub fn is_gzip(filepath: &Path) -> bool {
    filepath
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or_default()
}

/// opens a file for reading, decompressing on the fly when the path ends in ".gz".
pub fn open_reader(filepath: &Path) -> std::io::Result<Box<dyn Read>> {
    let f = File::open(filepath)?;
    let r: Box<dyn Read> = if is_gzip(filepath) {
        Box::new(BufReader::new(GzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };
    Ok(r)
}

/// creates (or truncates) a file for writing, compressing when the path ends in ".gz".
/// parent directories are created as needed.
pub fn create_writer(filepath: &Path) -> std::io::Result<Box<dyn Write>> {
    if let Some(parent) = filepath.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let f = File::create(filepath)?;
    let w: Box<dyn Write> = if is_gzip(filepath) {
        Box::new(BufWriter::new(GzEncoder::new(f, Compression::default())))
    } else {
        Box::new(BufWriter::new(f))
    };
    Ok(w)
}

/// deserializes a JSON document from a (possibly gzipped) file.
pub fn read_json<T: DeserializeOwned>(filepath: &Path) -> Result<T, String> {
    let name = filepath.to_string_lossy();
    let reader = open_reader(filepath).map_err(|e| format!("failure reading {name}: {e}"))?;
    serde_json::from_reader(reader).map_err(|e| format!("failure decoding {name}: {e}"))
}

/// serializes a value as JSON to a (possibly gzipped) file.
pub fn write_json<T: Serialize>(value: &T, filepath: &Path) -> Result<(), String> {
    let name = filepath.to_string_lossy();
    let mut writer =
        create_writer(filepath).map_err(|e| format!("failure creating {name}: {e}"))?;
    serde_json::to_writer(&mut writer, value)
        .map_err(|e| format!("failure encoding {name}: {e}"))?;
    writer
        .flush()
        .map_err(|e| format!("failure writing {name}: {e}"))
}

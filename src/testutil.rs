//! Fixture helpers shared by the unit tests.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use bzip2::Compression;
use bzip2::write::BzEncoder;

use crate::domain::Year;
use crate::io::year_path;

/// Write `contents` bzip2-compressed to `dir/name`.
pub fn write_bz2(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    let mut encoder = BzEncoder::new(file, Compression::fast());
    encoder.write_all(contents.as_bytes()).unwrap();
    encoder.finish().unwrap();
    path
}

/// Write `contents` uncompressed to `dir/name`.
pub fn write_plain(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// One fixture row: `(state, month, latitude, longitude)`.
pub type Row = (i32, u32, f64, f64);

/// Write `accident_<year>.csv.bz2` with the given rows.
///
/// The embedded `YEAR` column is deliberately set to `year + 100` so tests
/// can tell whether the pipeline trusts the file name or the file content.
pub fn write_year(dir: &Path, year: Year, rows: &[Row]) -> PathBuf {
    let mut csv = String::from("STATE,ST_CASE,MONTH,YEAR,LATITUDE,LONGITUD\n");
    for (i, (state, month, lat, lon)) in rows.iter().enumerate() {
        csv.push_str(&format!(
            "{state},{case},{month},{embedded},{lat},{lon}\n",
            case = state * 10_000 + i as i32,
            embedded = year + 100,
        ));
    }
    let path = year_path(dir, year);
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    write_bz2(dir, &name, &csv)
}

/// `n` identical rows for `(state, month)` at a fixed point.
pub fn rows(state: i32, month: u32, n: usize) -> Vec<Row> {
    vec![(state, month, 33.0, -87.0); n]
}

/// Shared sink for formatted log output.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a thread-local subscriber and return its INFO-and-above lines.
///
/// Only events emitted on the calling thread are captured.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let out = tracing::subscriber::with_default(subscriber, f);
    let text = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    (out, text.lines().map(str::to_string).collect())
}

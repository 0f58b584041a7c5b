//! GNSS Logger (text) file reader
use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
    path::{Path, PathBuf},
};

use flate2::read::GzDecoder;

use crate::{error::Error, measurement::RawMeasurement};

mod header;

pub use header::{Header, HeaderLine, RecordKind};

/// Raw measurements sharing one receiver clock (`TimeNanos`) value
pub type Batch = Vec<RawMeasurement>;

/// Field that delimits consecutive [Batch]es
const BATCH_DELIMITER: &str = "TimeNanos";

/// GNSS Logger file, possibly gzip compressed
#[derive(Debug, Clone)]
pub struct GnssLog {
    path: PathBuf,
    pub header: Header,
}

fn open_reader(path: &Path) -> Result<Box<dyn BufRead>, Error> {
    let fd = File::open(path)?;

    let gzip = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    if gzip {
        Ok(Box::new(BufReader::new(GzDecoder::new(fd))))
    } else {
        Ok(Box::new(BufReader::new(fd)))
    }
}

/// Parses one data line, using the field names declared in [Header]
fn parse_record(header: &Header, line: &str) -> Result<RawMeasurement, Error> {
    let mut items = line.trim().split(',');

    let kind = RecordKind::from(items.next().unwrap_or_default());

    let names = header
        .field_names(&kind)
        .ok_or_else(|| Error::UndeclaredRecord(kind.to_string()))?;

    Ok(RawMeasurement::new(
        names.iter().map(|name| name.as_str()).zip(items),
    ))
}

impl GnssLog {
    /// Opens a GNSS Logger file and parses its [Header]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let header = Header::parse(open_reader(&path)?)?;
        Ok(Self { path, header })
    }

    /// Iterates over [Batch]es of raw measurements. Each call reads the file again.
    pub fn raw_batches(&self) -> Result<RawBatches<Box<dyn BufRead>>, Error> {
        Ok(RawBatches::new(open_reader(&self.path)?, self.header.clone()))
    }

    /// Iterates over position fixes
    pub fn fix_records(&self) -> Result<Records<Box<dyn BufRead>>, Error> {
        Ok(Records::new(
            open_reader(&self.path)?,
            self.header.clone(),
            RecordKind::Fix,
        ))
    }
}

/// Iterator over records of one [RecordKind]
pub struct Records<R: BufRead> {
    lines: Lines<R>,
    header: Header,
    kind: RecordKind,
}

impl<R: BufRead> Records<R> {
    pub fn new(reader: R, header: Header, kind: RecordKind) -> Self {
        Self {
            lines: reader.lines(),
            header,
            kind,
        }
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<RawMeasurement, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };

            if line.starts_with('#') {
                continue;
            }

            let first = line.split(',').next().unwrap_or_default();
            if RecordKind::from(first) != self.kind {
                continue;
            }

            return Some(parse_record(&self.header, &line));
        }
    }
}

/// Iterator over [Batch]es of raw measurements. A new [Batch]
/// starts each time `TimeNanos` changes.
pub struct RawBatches<R: BufRead> {
    records: Records<R>,
    batch: Batch,
}

impl<R: BufRead> RawBatches<R> {
    pub fn new(reader: R, header: Header) -> Self {
        Self {
            records: Records::new(reader, header, RecordKind::Raw),
            batch: Batch::new(),
        }
    }
}

impl<R: BufRead> Iterator for RawBatches<R> {
    type Item = Result<Batch, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.records.next() {
                Some(Ok(meas)) => {
                    let new_batch = match self.batch.first() {
                        Some(first) => meas.get(BATCH_DELIMITER) != first.get(BATCH_DELIMITER),
                        None => false,
                    };

                    if new_batch {
                        let batch = std::mem::replace(&mut self.batch, vec![meas]);
                        return Some(Ok(batch));
                    }

                    self.batch.push(meas);
                },
                Some(Err(e)) => return Some(Err(e)),
                None => {
                    if self.batch.is_empty() {
                        return None;
                    }
                    return Some(Ok(std::mem::take(&mut self.batch)));
                },
            }
        }
    }
}

use std::{fs::File, io::Write};

use flate2::{write::GzEncoder, Compression};

/// Output file, optionally gzip compressed
pub enum FileDescriptor {
    Plain(File),
    Gzip(GzEncoder<File>),
}

impl FileDescriptor {
    /// Creates a new [FileDescriptor]. Panics when the file cannot be created:
    /// nothing can be collected without it.
    pub fn new(gzip: bool, path: &str) -> Self {
        let fd = File::create(path)
            .unwrap_or_else(|e| panic!("Failed to create file \"{}\": {}", path, e));

        if gzip {
            Self::Gzip(GzEncoder::new(fd, Compression::new(5)))
        } else {
            Self::Plain(fd)
        }
    }

    /// Terminates the gzip stream, if any
    pub fn finish(self) -> std::io::Result<()> {
        match self {
            Self::Plain(mut fd) => fd.flush(),
            Self::Gzip(gz) => gz.finish().map(|_| ()),
        }
    }
}

impl Write for FileDescriptor {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Self::Plain(fd) => fd.write(buf),
            Self::Gzip(gz) => gz.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Self::Plain(fd) => fd.flush(),
            Self::Gzip(gz) => gz.flush(),
        }
    }
}

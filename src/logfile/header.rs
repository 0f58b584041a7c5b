use std::{
    collections::{BTreeMap, HashMap},
    io::BufRead,
};

use log::debug;

use crate::error::Error;

/// Kind of record (data line), identified by its first field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Raw measurements
    Raw,
    /// Position fix
    Fix,
    /// Navigation message
    Nav,
    /// Any other kind, not used here
    Other(String),
}

impl From<&str> for RecordKind {
    fn from(s: &str) -> Self {
        match s.trim() {
            "Raw" => Self::Raw,
            "Fix" => Self::Fix,
            "Nav" => Self::Nav,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Raw => write!(f, "Raw"),
            Self::Fix => write!(f, "Fix"),
            Self::Nav => write!(f, "Nav"),
            Self::Other(other) => write!(f, "{}", other),
        }
    }
}

/// Header (`#` prefixed) line
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderLine {
    /// `# Header Description:`
    Description,
    /// `# Version: v2.0.0.1 Platform: 7.0 Manufacturer: Google Model: Pixel`
    Version(BTreeMap<String, String>),
    /// `# Raw,ElapsedRealtimeMillis,TimeNanos,..`: field names of this record kind
    Fields { kind: RecordKind, names: Vec<String> },
    /// Free text
    Comment(String),
}

impl HeaderLine {
    /// Identifies a header line. Returns `None` for empty lines.
    pub fn parse(line: &str) -> Option<Self> {
        let content = line.trim().trim_start_matches('#').trim();
        if content.is_empty() {
            return None;
        }

        let keyword = content
            .split([':', ' ', ','])
            .next()
            .unwrap_or_default();

        match keyword.to_lowercase().as_str() {
            "header" => Some(Self::Description),
            "version" => Some(Self::Version(Self::parse_version(content))),
            _ => {
                if content.contains(',') {
                    let mut items = content.split(',').map(|item| item.trim());
                    let kind = RecordKind::from(items.next().unwrap_or_default());
                    let names = items.map(|name| name.to_string()).collect();
                    Some(Self::Fields { kind, names })
                } else {
                    Some(Self::Comment(content.to_string()))
                }
            },
        }
    }

    fn parse_version(content: &str) -> BTreeMap<String, String> {
        let mut parameters = BTreeMap::<String, String>::new();
        let mut key = Option::<String>::None;

        for item in content.split_whitespace() {
            if let Some(name) = item.strip_suffix(':') {
                parameters.insert(name.to_string(), String::new());
                key = Some(name.to_string());
            } else if let Some(value) = key.as_ref().and_then(|key| parameters.get_mut(key)) {
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(item);
            }
        }

        parameters
    }
}

/// GNSS Logger file header
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    /// Logger and platform description
    pub version: BTreeMap<String, String>,
    /// Field names, per record kind
    pub fields: HashMap<RecordKind, Vec<String>>,
}

impl Header {
    /// Parses the header section, up to the first data line
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut header = Self::default();

        for line in reader.lines() {
            let line = line?;

            if !line.starts_with('#') {
                break;
            }

            match HeaderLine::parse(&line) {
                Some(HeaderLine::Version(version)) => header.version = version,
                Some(HeaderLine::Fields { kind, names }) => {
                    debug!("{} record: {} fields", kind, names.len());
                    header.fields.insert(kind, names);
                },
                _ => {},
            }
        }

        Ok(header)
    }

    /// Returns field names of this record kind
    pub fn field_names(&self, kind: &RecordKind) -> Option<&[String]> {
        self.fields.get(kind).map(|names| names.as_slice())
    }
}

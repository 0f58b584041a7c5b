use rinex::prelude::Duration;

/// [Settings] shared by all output products
#[derive(Debug, Clone)]
pub struct Settings {
    /// GZIp compression
    pub gzip: bool,

    /// Prefer long file names
    pub long_filename: bool,

    /// Custom name (usually phone model, or marker name)
    pub name: String,

    /// RINEX revision major number
    pub major: u8,

    /// File prefix
    pub prefix: Option<String>,

    /// Agency name
    pub agency: Option<String>,

    /// Agency country code
    pub country_code: String,

    /// Observer
    pub observer: Option<String>,

    /// Period covered by one file
    pub snapshot_period: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prefix: None,
            agency: None,
            observer: None,
            name: "GNSS".to_string(),
            country_code: "XXX".to_string(),
            gzip: false,
            long_filename: false,
            major: 3,
            snapshot_period: Duration::from_days(1.0),
        }
    }
}

use std::str::FromStr;

use hifitime::{
    efmt::Format,
    prelude::{Duration, Epoch, Formatter},
};

use rinex::production::{FFU, PPU};

use crate::collecter::settings::Settings as SharedSettings;

/// Observation RINEX collection [Settings]
#[derive(Debug, Clone)]
pub struct Settings {
    pub crinex: bool,
    /// Sampling period, GNSS Logger reports at 1 Hz
    pub sampling: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            crinex: false,
            sampling: Duration::from_seconds(1.0),
        }
    }
}

impl Settings {
    pub fn filename(&self, t: Epoch, shared_opts: &SharedSettings) -> String {
        let mut filepath = if let Some(prefix) = &shared_opts.prefix {
            format!("{}/", prefix)
        } else {
            "".to_string()
        };

        let filename = if shared_opts.long_filename {
            self.v3_filename(t, shared_opts)
        } else {
            self.v2_filename(t, shared_opts)
        };

        filepath.push_str(&filename);
        filepath
    }

    fn v2_filename(&self, t: Epoch, shared_opts: &SharedSettings) -> String {
        let year = t.to_gregorian_utc().0;

        let fmt = Format::from_str("%j").unwrap();
        let formatter = Formatter::new(t, fmt);

        let mut formatted = shared_opts.name.to_string();

        formatted.push_str(&formatter.to_string());
        formatted.push_str("0.");
        formatted.push_str(&format!("{:02}", year - 2000));

        if self.crinex {
            formatted.push('D');
        } else {
            formatted.push('O');
        }

        if shared_opts.gzip {
            formatted.push_str(".gz")
        }

        formatted
    }

    fn v3_filename(&self, t: Epoch, shared_opts: &SharedSettings) -> String {
        let ppu: PPU = shared_opts.snapshot_period.into();
        let ffu: FFU = self.sampling.into();

        let mut formatted = format!("{}{}_R_", shared_opts.name, shared_opts.country_code);

        let fmt = Format::from_str("%Y%j").unwrap();
        let formatter = Formatter::new(t, fmt);

        formatted.push_str(&formatter.to_string());
        formatted.push_str("0000_");

        formatted.push_str(&ppu.to_string());
        formatted.push('_');

        formatted.push_str(&ffu.to_string());
        formatted.push_str("_MO");

        if self.crinex {
            formatted.push_str(".crx");
        } else {
            formatted.push_str(".rnx");
        }

        if shared_opts.gzip {
            formatted.push_str(".gz");
        }

        formatted
    }
}

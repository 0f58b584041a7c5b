use std::str::FromStr;

use gnss::prelude::{Constellation, SV};

use serde::Serialize;

use crate::error::Error;

/// Constellation as reported by the `ConstellationType` field
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ConstellationType {
    Unknown = 0,
    GPS = 1,
    SBAS = 2,
    Glonass = 3,
    QZSS = 4,
    BeiDou = 5,
    Galileo = 6,
}

impl ConstellationType {
    pub fn from_code(code: i64) -> Result<Self, Error> {
        match code {
            0 => Ok(Self::Unknown),
            1 => Ok(Self::GPS),
            2 => Ok(Self::SBAS),
            3 => Ok(Self::Glonass),
            4 => Ok(Self::QZSS),
            5 => Ok(Self::BeiDou),
            6 => Ok(Self::Galileo),
            _ => Err(Error::UnknownConstellation(code)),
        }
    }

    /// RINEX constellation letter
    pub fn letter(&self) -> char {
        match self {
            Self::GPS => 'G',
            Self::SBAS => 'S',
            Self::Glonass => 'R',
            Self::QZSS => 'J',
            Self::BeiDou => 'C',
            Self::Galileo => 'E',
            Self::Unknown => 'X',
        }
    }

    /// Converts to [Constellation], which does not describe [Self::Unknown]
    pub fn to_constellation(&self) -> Option<Constellation> {
        match self {
            Self::GPS => Some(Constellation::GPS),
            Self::SBAS => Some(Constellation::SBAS),
            Self::Glonass => Some(Constellation::Glonass),
            Self::QZSS => Some(Constellation::QZSS),
            Self::BeiDou => Some(Constellation::BeiDou),
            Self::Galileo => Some(Constellation::Galileo),
            Self::Unknown => None,
        }
    }
}

impl std::fmt::Display for ConstellationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Satellite identifier: constellation letter and 2 digit SVID, like `G05`
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SatelliteId {
    pub constellation: ConstellationType,
    pub svid: u16,
}

impl SatelliteId {
    /// Builds a new [SatelliteId].
    /// GLONASS reports its frequency channel number (offset by 100)
    /// when the orbital slot number is not known: such SVID (> 50) are rejected.
    pub fn new(constellation: ConstellationType, svid: i64) -> Result<Self, Error> {
        let raw = format!("{}{:02}", constellation.letter(), svid);

        if constellation == ConstellationType::Glonass && svid > 50 {
            return Err(Error::GlonassFrequencyChannel(raw));
        }

        let svid = u16::try_from(svid).map_err(|_| Error::InvalidField {
            field: "Svid",
            value: svid.to_string(),
        })?;

        Ok(Self { constellation, svid })
    }

    /// Converts to [SV], when both constellation and PRN fit
    pub fn to_sv(&self) -> Option<SV> {
        let constellation = self.constellation.to_constellation()?;
        let prn = u8::try_from(self.svid).ok()?;
        Some(SV::new(constellation, prn))
    }
}

impl std::fmt::Display for SatelliteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{:02}", self.constellation.letter(), self.svid)
    }
}

impl FromStr for SatelliteId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || Error::InvalidField {
            field: "Svid",
            value: s.to_string(),
        };

        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(invalid)?;

        let constellation = [
            ConstellationType::Unknown,
            ConstellationType::GPS,
            ConstellationType::SBAS,
            ConstellationType::Glonass,
            ConstellationType::QZSS,
            ConstellationType::BeiDou,
            ConstellationType::Galileo,
        ]
        .into_iter()
        .find(|c| c.letter() == letter)
        .ok_or_else(invalid)?;

        let svid = chars.as_str().parse::<i64>().map_err(|_| invalid())?;
        Self::new(constellation, svid)
    }
}

impl Serialize for SatelliteId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

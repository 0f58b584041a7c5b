use serde::Serialize;

use crate::{
    constants::CHIP_RATE_HZ, constellation::ConstellationType, error::Error, state::SyncState,
};

/// RINEX frequency band
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Band {
    /// GPS/QZSS L1, Galileo E1, GLONASS G1
    L1,
    /// BeiDou B1I
    L2,
    /// GPS/QZSS L5, Galileo E5a
    L5,
}

impl Band {
    /// Classifies a carrier frequency [Hz] using its
    /// integer multiple of the GNSS chip rate.
    pub fn from_frequency(frequency: f64) -> Result<Self, Error> {
        let multiplier = (frequency / CHIP_RATE_HZ).round() as i64;
        match multiplier {
            // BDS B1I (152.6)
            153 => Ok(Self::L2),
            // GPS/QZSS L1, GAL E1 (154), GLO L1 (156..157)
            m if m >= 152 => Ok(Self::L1),
            // GPS/QZSS L5, GAL E5a
            115 => Ok(Self::L5),
            _ => Err(Error::UnknownFrequencyBand {
                frequency,
                multiplier,
            }),
        }
    }

    /// RINEX band digit
    pub fn digit(&self) -> u8 {
        match self {
            Self::L1 => 1,
            Self::L2 => 2,
            Self::L5 => 5,
        }
    }
}

/// Returns RINEX band digit for this frequency [Hz]
pub fn band_of(frequency: f64) -> Result<u8, Error> {
    Ok(Band::from_frequency(frequency)?.digit())
}

/// RINEX signal attribute (tracking mode) letter.
/// L5/E5a is assumed to be tracked on its Q (pilot) component.
pub fn attribute_of(band: Band, constellation: ConstellationType, state: SyncState) -> char {
    match (band, constellation) {
        (Band::L1, ConstellationType::Galileo) if state.is_gal_e1b() => 'B',
        (Band::L5, _) => 'Q',
        (Band::L2, ConstellationType::BeiDou) => 'I',
        _ => 'C',
    }
}

/// Observable code: band digit and attribute letter, like `1C`
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObservableCode {
    pub band: Band,
    pub attribute: char,
}

impl ObservableCode {
    pub fn new(
        frequency: f64,
        constellation: ConstellationType,
        state: SyncState,
    ) -> Result<Self, Error> {
        let band = Band::from_frequency(frequency)?;
        Ok(Self {
            band,
            attribute: attribute_of(band, constellation, state),
        })
    }
}

impl std::fmt::Display for ObservableCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.band.digit(), self.attribute)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::GPS_L1_FREQUENCY_HZ;
    use rstest::rstest;

    #[rstest]
    #[case(1575420030.0, 1)]
    #[case(1600875010.0, 1)]
    #[case(1598062500.0, 1)]
    #[case(1605375000.0, 1)]
    #[case(GPS_L1_FREQUENCY_HZ, 1)]
    #[case(152.0 * CHIP_RATE_HZ, 1)]
    #[case(1176450050.0, 5)]
    #[case(1561097980.0, 2)]
    fn band_classification(#[case] frequency: f64, #[case] band: u8) {
        assert_eq!(band_of(frequency).unwrap(), band);
    }

    #[rstest]
    #[case(1227.60E6, 120)]
    #[case(1207.14E6, 118)]
    #[case(1278.75E6, 125)]
    #[case(0.0, 0)]
    fn unknown_bands(#[case] frequency: f64, #[case] multiplier: i64) {
        assert_eq!(
            band_of(frequency),
            Err(Error::UnknownFrequencyBand {
                frequency,
                multiplier
            })
        );
    }

    #[test]
    fn attributes() {
        let none = SyncState::empty();
        let e1b = SyncState::GAL_E1BC_CODE_LOCK | SyncState::GAL_E1B_PAGE_SYNC;
        let e1c = SyncState::GAL_E1BC_CODE_LOCK | SyncState::GAL_E1C_2ND_CODE_LOCK;

        assert_eq!(attribute_of(Band::L1, ConstellationType::GPS, none), 'C');
        assert_eq!(attribute_of(Band::L1, ConstellationType::GPS, e1b), 'C');
        assert_eq!(attribute_of(Band::L1, ConstellationType::Galileo, e1b), 'B');
        assert_eq!(attribute_of(Band::L1, ConstellationType::Galileo, e1c), 'C');
        assert_eq!(attribute_of(Band::L1, ConstellationType::Galileo, e1c | e1b), 'C');
        assert_eq!(attribute_of(Band::L5, ConstellationType::GPS, none), 'Q');
        assert_eq!(attribute_of(Band::L5, ConstellationType::Galileo, none), 'Q');
        assert_eq!(attribute_of(Band::L2, ConstellationType::BeiDou, none), 'I');
        assert_eq!(attribute_of(Band::L2, ConstellationType::GPS, none), 'C');
    }

    #[test]
    fn observable_codes() {
        let state = SyncState::empty();
        let code = ObservableCode::new(1575420030.0, ConstellationType::GPS, state).unwrap();
        assert_eq!(code.to_string(), "1C");

        let code = ObservableCode::new(1176450050.0, ConstellationType::BeiDou, state).unwrap();
        assert_eq!(code.to_string(), "5Q");

        let code = ObservableCode::new(1561097980.0, ConstellationType::BeiDou, state).unwrap();
        assert_eq!(code.to_string(), "2I");

        // lexicographic order
        let mut codes = vec![
            ObservableCode {
                band: Band::L5,
                attribute: 'Q',
            },
            ObservableCode {
                band: Band::L1,
                attribute: 'C',
            },
            ObservableCode {
                band: Band::L1,
                attribute: 'B',
            },
        ];
        codes.sort();
        let codes = codes.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        assert_eq!(codes, vec!["1B", "1C", "5Q"]);
    }
}

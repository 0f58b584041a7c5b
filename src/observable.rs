use std::str::FromStr;

use serde::Serialize;

use crate::{
    error::Error,
    frequency::{Band, ObservableCode},
};

/// Physical measurement type, in RINEX order
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObservationKind {
    /// Pseudo range [m]
    PseudoRange,
    /// Carrier phase [cycles]
    Phase,
    /// Doppler shift [Hz]
    Doppler,
    /// Carrier to noise density ratio [dB-Hz]
    SSI,
}

impl ObservationKind {
    pub const ALL: [Self; 4] = [Self::PseudoRange, Self::Phase, Self::Doppler, Self::SSI];

    /// RINEX prefix letter
    pub fn letter(&self) -> char {
        match self {
            Self::PseudoRange => 'C',
            Self::Phase => 'L',
            Self::Doppler => 'D',
            Self::SSI => 'S',
        }
    }
}

/// Observable: measurement kind and signal code, like `C1C`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Observable {
    pub kind: ObservationKind,
    pub code: ObservableCode,
}

impl Observable {
    pub fn new(kind: ObservationKind, code: ObservableCode) -> Self {
        Self { kind, code }
    }

    /// Expands one signal code to its four observables, in RINEX order
    pub fn expand(code: ObservableCode) -> [Self; 4] {
        ObservationKind::ALL.map(|kind| Self::new(kind, code))
    }
}

impl Ord for Observable {
    /// Sorted by signal first, then kind: `C1C L1C D1C S1C C5Q ..`
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.code
            .cmp(&other.code)
            .then_with(|| self.kind.cmp(&other.kind))
    }
}

impl PartialOrd for Observable {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Observable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.kind.letter(), self.code)
    }
}

impl FromStr for Observable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidField {
            field: "Observable",
            value: s.to_string(),
        };

        let chars = s.trim().chars().collect::<Vec<_>>();
        if chars.len() != 3 {
            return Err(invalid());
        }

        let kind = ObservationKind::ALL
            .into_iter()
            .find(|kind| kind.letter() == chars[0])
            .ok_or_else(invalid)?;

        let band = match chars[1] {
            '1' => Band::L1,
            '2' => Band::L2,
            '5' => Band::L5,
            _ => return Err(invalid()),
        };

        Ok(Self::new(
            kind,
            ObservableCode {
                band,
                attribute: chars[2],
            },
        ))
    }
}

impl Serialize for Observable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

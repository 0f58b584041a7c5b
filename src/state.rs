//! Tracking state validation.
//!
//! The receiver reports its signal tracking status as two bitmasks:
//! `State` (code lock and navigation message synchronization) and
//! `AccumulatedDeltaRangeState` (carrier phase tracking). Pseudo range
//! and carrier phase are only trusted when the relevant bits are set.
use bitflags::bitflags;

use crate::{constellation::ConstellationType, error::Error, frequency::Band};

bitflags! {
    /// Measurement `State` bits
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct SyncState: u32 {
        const CODE_LOCK = 0x0000_0001;
        const BIT_SYNC = 0x0000_0002;
        const SUBFRAME_SYNC = 0x0000_0004;
        const TOW_DECODED = 0x0000_0008;
        const MSEC_AMBIGUOUS = 0x0000_0010;
        const SYMBOL_SYNC = 0x0000_0020;
        const GLO_STRING_SYNC = 0x0000_0040;
        const GLO_TOD_DECODED = 0x0000_0080;
        const BDS_D2_BIT_SYNC = 0x0000_0100;
        const BDS_D2_SUBFRAME_SYNC = 0x0000_0200;
        const GAL_E1BC_CODE_LOCK = 0x0000_0400;
        const GAL_E1C_2ND_CODE_LOCK = 0x0000_0800;
        const GAL_E1B_PAGE_SYNC = 0x0000_1000;
        const SBAS_SYNC = 0x0000_2000;
        const TOW_KNOWN = 0x0000_4000;
        const GLO_TOD_KNOWN = 0x0000_8000;
        const SECOND_CODE_LOCK = 0x0001_0000;
    }
}

bitflags! {
    /// `AccumulatedDeltaRangeState` bits
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct AdrState: u32 {
        const VALID = 0x01;
        const RESET = 0x02;
        const CYCLE_SLIP = 0x04;
        const HALF_CYCLE_RESOLVED = 0x08;
        const HALF_CYCLE_REPORTED = 0x10;
    }
}

const GPS_REQUIREMENTS: &[(SyncState, &str)] = &[
    (SyncState::CODE_LOCK, "STATE_CODE_LOCK"),
    (SyncState::TOW_DECODED, "STATE_TOW_DECODED"),
    (SyncState::BIT_SYNC, "STATE_BIT_SYNC"),
    (SyncState::SUBFRAME_SYNC, "STATE_SUBFRAME_SYNC"),
];

const SBAS_REQUIREMENTS: &[(SyncState, &str)] = &[
    (SyncState::CODE_LOCK, "STATE_CODE_LOCK"),
    (SyncState::TOW_DECODED, "STATE_TOW_DECODED"),
    (SyncState::BIT_SYNC, "STATE_BIT_SYNC"),
    (SyncState::SYMBOL_SYNC, "STATE_SYMBOL_SYNC"),
    (SyncState::SBAS_SYNC, "STATE_SBAS_SYNC"),
];

const GLONASS_REQUIREMENTS: &[(SyncState, &str)] = &[
    (SyncState::CODE_LOCK, "STATE_CODE_LOCK"),
    (SyncState::SYMBOL_SYNC, "STATE_SYMBOL_SYNC"),
    (SyncState::BIT_SYNC, "STATE_BIT_SYNC"),
    (SyncState::GLO_TOD_DECODED, "STATE_GLO_TOD_DECODED"),
    (SyncState::GLO_STRING_SYNC, "STATE_GLO_STRING_SYNC"),
];

const GALILEO_E1_REQUIREMENTS: &[(SyncState, &str)] =
    &[(SyncState::GAL_E1BC_CODE_LOCK, "STATE_GAL_E1BC_CODE_LOCK")];

const GALILEO_E1B_REQUIREMENTS: &[(SyncState, &str)] = &[
    (SyncState::GAL_E1BC_CODE_LOCK, "STATE_GAL_E1BC_CODE_LOCK"),
    (SyncState::TOW_DECODED, "STATE_TOW_DECODED"),
    (SyncState::BIT_SYNC, "STATE_BIT_SYNC"),
    (SyncState::GAL_E1B_PAGE_SYNC, "STATE_GAL_E1B_PAGE_SYNC"),
];

const UNKNOWN_REQUIREMENTS: &[(SyncState, &str)] = &[
    (SyncState::CODE_LOCK, "STATE_CODE_LOCK"),
    (SyncState::TOW_DECODED, "STATE_TOW_DECODED"),
];

impl SyncState {
    /// E1B (data) is being tracked, rather than E1C (pilot)
    pub fn is_gal_e1b(&self) -> bool {
        !self.contains(Self::GAL_E1C_2ND_CODE_LOCK) && self.contains(Self::GAL_E1B_PAGE_SYNC)
    }

    /// Returns the list of bits that must be set, for this signal,
    /// in the order they are verified.
    fn requirements(
        &self,
        constellation: ConstellationType,
        band: Band,
    ) -> &'static [(SyncState, &'static str)] {
        match constellation {
            ConstellationType::GPS | ConstellationType::QZSS | ConstellationType::BeiDou => {
                GPS_REQUIREMENTS
            },
            ConstellationType::SBAS => SBAS_REQUIREMENTS,
            ConstellationType::Glonass => GLONASS_REQUIREMENTS,
            ConstellationType::Galileo => match band {
                Band::L1 => {
                    if self.contains(Self::GAL_E1C_2ND_CODE_LOCK) {
                        GALILEO_E1_REQUIREMENTS
                    } else {
                        GALILEO_E1B_REQUIREMENTS
                    }
                },
                Band::L5 => GPS_REQUIREMENTS,
                Band::L2 => &[],
            },
            ConstellationType::Unknown => UNKNOWN_REQUIREMENTS,
        }
    }
}

/// Verifies that `state` allows trusting the pseudo range of this signal.
/// Reports the first missing bit.
pub fn check_sync_state(
    state: SyncState,
    constellation: ConstellationType,
    band: Band,
) -> Result<(), Error> {
    for (flag, name) in state.requirements(constellation, band) {
        if !state.contains(*flag) {
            return Err(Error::SyncState {
                state: state.bits(),
                flag: *name,
            });
        }
    }
    Ok(())
}

/// Verifies that the accumulated delta range may be trusted.
pub fn check_adr_state(state: AdrState) -> Result<(), Error> {
    if state.contains(AdrState::VALID) {
        Ok(())
    } else {
        Err(Error::AdrState(state.bits()))
    }
}

//! Time systems: receiver clock to GPST, and per constellation
//! transmit time to GPS time of week.
use hifitime::{Epoch, TimeScale};

use crate::{
    constants::{
        BDT_TO_GPST_SECONDS, DAY_SECONDS, GLOT_TO_UTC_SECONDS, GPS_LEAP_SECONDS,
        MAX_PROPAGATION_RESIDUAL_SECONDS, NANOS_TO_SECONDS, WEEK_NANOS, WEEK_SECONDS,
    },
    constellation::ConstellationType,
    error::Error,
};

/// Receiver time, resolved in GPST from the receiver clock fields
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ReceiverTime {
    /// GPS week number
    pub week: u32,
    /// GPS time of week [s]
    pub tow_s: f64,
    /// Fractional part removed when rounding to the nearest integer second [s].
    /// Null when not integerized.
    pub frac_s: f64,
    /// Epoch of observation (GPST)
    pub epoch: Epoch,
}

impl ReceiverTime {
    /// Resolves GPST from `TimeNanos`, `FullBiasNanos` and `BiasNanos`.
    /// When `integerize` is set, the epoch is rounded to the nearest integer second.
    pub fn resolve(
        time_nanos: i64,
        full_bias_nanos: i64,
        bias_nanos: f64,
        integerize: bool,
    ) -> Result<Self, Error> {
        let week = full_bias_nanos
            .checked_neg()
            .ok_or(Error::InvalidReceiverClock)?
            .div_euclid(WEEK_NANOS);

        let gps_week = u32::try_from(week).map_err(|_| Error::InvalidReceiverClock)?;

        // integer part is exact, sub nanosecond bias applied last
        let tow_nanos = time_nanos as i128 - full_bias_nanos as i128 - (week * WEEK_NANOS) as i128;
        let tow_s = (tow_nanos as f64 - bias_nanos) * NANOS_TO_SECONDS;

        let frac_s = if integerize {
            tow_s - (tow_s + 0.5).trunc()
        } else {
            0.0
        };

        let total_nanos =
            (week as i128) * (WEEK_NANOS as i128) + ((tow_s - frac_s) * 1.0E9).round() as i128;

        if total_nanos < 0 {
            return Err(Error::InvalidReceiverClock);
        }

        let epoch_week =
            u32::try_from(total_nanos / WEEK_NANOS as i128).map_err(|_| Error::InvalidReceiverClock)?;
        let epoch_nanos = (total_nanos % WEEK_NANOS as i128) as u64;

        Ok(Self {
            week: gps_week,
            tow_s,
            frac_s,
            epoch: Epoch::from_time_of_week(epoch_week, epoch_nanos, TimeScale::GPST),
        })
    }

    /// Reception time of week [s] for ranging, compensated
    /// for this measurement's `TimeOffsetNanos`.
    pub fn reception_tow(&self, time_offset_nanos: f64) -> f64 {
        self.tow_s - time_offset_nanos * NANOS_TO_SECONDS
    }
}

/// Expresses satellite transmit time (`ReceivedSvTimeNanos`) as
/// a GPS time of week [s]. `epoch` is the current GPST epoch of observation,
/// required to resolve GLONASS time of day.
pub fn transmit_tow(
    constellation: ConstellationType,
    received_sv_time_nanos: f64,
    epoch: Epoch,
) -> f64 {
    let t_tx = received_sv_time_nanos * NANOS_TO_SECONDS;
    match constellation {
        ConstellationType::Glonass => glonass_tod_to_gps_tow(epoch, t_tx),
        ConstellationType::BeiDou => t_tx + BDT_TO_GPST_SECONDS,
        _ => t_tx,
    }
}

/// Converts GLONASS time of day [s] to GPS time of week [s].
/// The GLONASS calendar day is deduced from current GPST `epoch`.
pub fn glonass_tod_to_gps_tow(epoch: Epoch, tod_s: f64) -> f64 {
    let (_, nanos) = epoch.to_time_of_week();
    let gpst_seconds = (nanos / 1_000_000_000) as i64;

    // GLONASST = UTC + 3h
    let glot_seconds = gpst_seconds + GLOT_TO_UTC_SECONDS as i64 - GPS_LEAP_SECONDS;

    let day_seconds = DAY_SECONDS as i64;
    let day = glot_seconds.div_euclid(day_seconds) + (tod_s.trunc() as i64).div_euclid(day_seconds);

    // GPS weeks start on sunday: iso weekday is 1 (monday) ..= 7 (sunday)
    let iso_weekday = match day.rem_euclid(7) {
        0 => 7,
        d => d,
    };

    (iso_weekday as f64) * DAY_SECONDS + tod_s - GLOT_TO_UTC_SECONDS + GPS_LEAP_SECONDS as f64
}

fn crossover(tau: f64, period: f64) -> f64 {
    if tau.abs() <= period / 2.0 {
        return tau;
    }

    let residual = tau - (tau / period).round() * period;

    if residual.abs() > MAX_PROPAGATION_RESIDUAL_SECONDS {
        0.0
    } else {
        residual
    }
}

/// Propagation time [s] from reception and transmission times of week,
/// corrected for week rollover. Returns 0 when the rollover cannot be resolved.
pub fn week_crossover(t_rx: f64, t_tx: f64) -> f64 {
    crossover(t_rx - t_tx, WEEK_SECONDS)
}

/// Propagation time [s] from reception and transmission times of day,
/// corrected for day rollover. Returns 0 when the rollover cannot be resolved.
pub fn day_crossover(t_rx: f64, t_tx: f64) -> f64 {
    crossover(t_rx - t_tx, DAY_SECONDS)
}

/// Propagation time [s] of a signal received at `t_rx` and transmitted at `t_tx`
/// (both GPS time of week). GLONASS transmit time is only known modulo one day:
/// a signal transmitted before GLONASS midnight and received after it
/// is resolved by the day crossover.
pub fn propagation_time(constellation: ConstellationType, t_rx: f64, t_tx: f64) -> f64 {
    match constellation {
        ConstellationType::Glonass => day_crossover(t_rx, t_tx),
        _ => week_crossover(t_rx, t_tx),
    }
}

/// Number of leap seconds between GPST and UTC at `epoch`.
/// Not maintained: [GPS_LEAP_SECONDS] is used throughout.
pub fn leap_seconds(_epoch: Epoch) -> Option<u8> {
    None
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;

    // 2020-06-25 (thursday), GPS week 2111
    const FULL_BIAS_NANOS: i64 = -1_277_078_400_000_000_000;

    #[test]
    fn receiver_time() {
        let week = 2111;
        let full_bias = -(week * WEEK_NANOS) - 345_600_000_000_000;
        let time = ReceiverTime::resolve(10_500_000_000, full_bias, 0.25, false).unwrap();

        assert_eq!(time.week, 2111);
        assert!((time.tow_s - (345_610.5 - 0.25E-9)).abs() < 1.0E-9);
        assert_eq!(time.frac_s, 0.0);

        let (epoch_week, epoch_nanos) = time.epoch.to_time_of_week();
        assert_eq!(epoch_week, 2111);
        assert_eq!(epoch_nanos, 345_610_500_000_000);
    }

    #[test]
    fn integerized_receiver_time() {
        let full_bias = -(2111 * WEEK_NANOS);

        let time = ReceiverTime::resolve(100_700_000_000, full_bias, 0.0, true).unwrap();
        assert!((time.frac_s + 0.3).abs() < 1.0E-6);
        assert_eq!(time.epoch.to_time_of_week(), (2111, 101_000_000_000));

        let time = ReceiverTime::resolve(100_200_000_000, full_bias, 0.0, true).unwrap();
        assert!((time.frac_s - 0.2).abs() < 1.0E-6);
        assert_eq!(time.epoch.to_time_of_week(), (2111, 100_000_000_000));
    }

    #[test]
    fn gpst_epoch() {
        let time = ReceiverTime::resolve(0, FULL_BIAS_NANOS, 0.0, false).unwrap();
        assert_eq!(
            time.epoch,
            Epoch::from_str("2020-06-25T00:00:00 GPST").unwrap()
        );
    }

    #[test]
    fn invalid_receiver_clock() {
        assert_eq!(
            ReceiverTime::resolve(0, 1_000_000_000, 0.0, false),
            Err(Error::InvalidReceiverClock)
        );
    }

    #[test]
    fn invalid_full_bias() {
        assert_eq!(
            ReceiverTime::resolve(0, i64::MIN, 0.0, false),
            Err(Error::InvalidReceiverClock)
        );

        // positive, but smaller than TimeNanos
        assert_eq!(
            ReceiverTime::resolve(2_000_000_000, 1_000_000_000, 0.0, false),
            Err(Error::InvalidReceiverClock)
        );
    }

    #[test]
    fn reception_time() {
        let time = ReceiverTime::resolve(1_000_000_000, -(2000 * WEEK_NANOS), 0.0, false).unwrap();
        assert!((time.reception_tow(500_000_000.0) - 0.5).abs() < 1.0E-9);
    }

    #[test]
    fn beidou_transmit_time() {
        let epoch = Epoch::from_str("2020-06-25T00:00:00 GPST").unwrap();
        let tow = transmit_tow(ConstellationType::BeiDou, 100.0E9, epoch);
        assert!((tow - 114.0).abs() < 1.0E-9);

        let tow = transmit_tow(ConstellationType::Galileo, 100.0E9, epoch);
        assert!((tow - 100.0).abs() < 1.0E-9);
    }

    #[test]
    fn glonass_time_of_day() {
        // monday 00:00:30 GPST = 00:00:12 UTC = 03:00:12 GLONASST
        let epoch = Epoch::from_str("2020-06-22T00:00:30 GPST").unwrap();
        let tow = glonass_tod_to_gps_tow(epoch, 10_812.0);
        assert!((tow - 86_430.0).abs() < 1.0E-9);

        let tow = transmit_tow(ConstellationType::Glonass, 10_812.0E9, epoch);
        assert!((tow - 86_430.0).abs() < 1.0E-9);

        // sunday 22:00:00 GPST is already monday 00:59:42 in GLONASST
        let epoch = Epoch::from_str("2020-06-21T22:00:00 GPST").unwrap();
        let tow = glonass_tod_to_gps_tow(epoch, 3_582.0);
        assert!((tow - (86_400.0 + 3_582.0 - 10_800.0 + 18.0)).abs() < 1.0E-9);
        assert!((tow - 79_200.0).abs() < 1.0E-9);
    }

    #[test]
    fn glonass_on_sundays() {
        // sunday 00:00:30 GPST: iso weekday is 7, resolved by the week crossover
        let epoch = Epoch::from_str("2020-06-21T00:00:30 GPST").unwrap();
        let t_tx = glonass_tod_to_gps_tow(epoch, 10_811.93);
        assert!(t_tx > WEEK_SECONDS);

        let tau = week_crossover(30.0, t_tx);
        assert!((tau - 0.07).abs() < 1.0E-6);
    }

    #[test]
    fn week_crossovers() {
        // nominal
        assert!((week_crossover(100.075, 100.0) - 0.075).abs() < 1.0E-9);

        // transmitted at end of previous week
        let tau = week_crossover(0.05, WEEK_SECONDS - 0.02);
        assert!((tau - 0.07).abs() < 1.0E-9);

        let tau = week_crossover(WEEK_SECONDS - 0.02, -0.09);
        assert!((tau - 0.07).abs() < 1.0E-9);

        // just below and beyond half a week
        assert_eq!(week_crossover(WEEK_SECONDS / 2.0 - 0.5, 0.0), WEEK_SECONDS / 2.0 - 0.5);
        assert_eq!(week_crossover(WEEK_SECONDS / 2.0 + 0.5, 0.0), 0.0);
        assert_eq!(week_crossover(0.0, WEEK_SECONDS / 2.0 + 0.5), 0.0);

        // residual too large
        assert_eq!(week_crossover(WEEK_SECONDS + 11.0, 0.0), 0.0);
        assert!((week_crossover(WEEK_SECONDS + 9.0, 0.0) - 9.0).abs() < 1.0E-9);
    }

    #[test]
    fn day_crossovers() {
        let tau = day_crossover(0.05, DAY_SECONDS - 0.02);
        assert!((tau - 0.07).abs() < 1.0E-9);
        assert_eq!(day_crossover(DAY_SECONDS / 2.0 + 1.0, 0.0), 0.0);
        assert!((day_crossover(10.07, 10.0) - 0.07).abs() < 1.0E-9);
    }

    #[test]
    fn glonass_midnight() {
        // 2020-06-25T00:00:00.03 GLONASST, transmitted 0.07 s earlier (previous day)
        let epoch = Epoch::from_str("2020-06-24T21:00:18.03 GPST").unwrap();
        let t_rx = 345_600.0 - 10_781.97;
        let t_tx = transmit_tow(ConstellationType::Glonass, 86_399.96E9, epoch);

        assert!((week_crossover(t_rx, t_tx) + 86_399.93).abs() < 1.0E-6);

        let tau = propagation_time(ConstellationType::Glonass, t_rx, t_tx);
        assert!((tau - 0.07).abs() < 1.0E-6);

        let tau = propagation_time(ConstellationType::GPS, 100.075, 100.0);
        assert!((tau - 0.075).abs() < 1.0E-9);
    }

    #[test]
    fn leap_seconds_not_maintained() {
        let epoch = Epoch::from_str("2020-06-25T00:00:00 GPST").unwrap();
        assert!(leap_seconds(epoch).is_none());
    }
}

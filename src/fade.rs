//! Convergence engine: per-tick soft-dimming steps.
//!
//! Each tick narrows every unsettled channel's `actual` toward `desired` by
//! a bounded delta and writes the new duty to the output. The ramp is
//! asymmetric: brightening runs at two levels per tick, dimming at one.

use crate::DutyOutput;
use crate::channel::ChannelBank;

/// Per-tick delta for one channel, `0` when settled.
///
/// Rising channels advance by `+2`, except when exactly one level away,
/// where the step is `+1` so `actual` never crosses past `desired`. Falling
/// channels retreat by `-1`. With these deltas any `(actual, desired)` pair
/// in `0..=255` settles in at most 255 ticks.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn fade_delta(actual: u8, desired: u8) -> i8 {
    if desired == actual {
        0
    } else if desired as u16 == actual as u16 + 1 {
        1
    } else if desired > actual {
        2
    } else {
        -1
    }
}

/// Run one convergence tick over the bank.
///
/// Steps every unsettled channel and applies its new duty to `output` at
/// the channel's bank index. Settled channels are left untouched: no
/// `set_actual`, no duty write. Returns the number of channels stepped, so
/// the caller can disarm its tick source once a pass changes nothing.
pub fn converge<const N: usize>(
    bank: &mut ChannelBank<N>,
    output: &mut impl DutyOutput,
) -> usize {
    let mut changed = 0;

    for (index, channel) in bank.iter_mut().enumerate() {
        let delta = fade_delta(channel.actual(), channel.desired());
        if delta == 0 {
            continue;
        }

        channel.set_actual(i16::from(channel.actual()) + i16::from(delta));
        output.set_duty(index, channel.duty());
        changed += 1;
    }

    changed
}

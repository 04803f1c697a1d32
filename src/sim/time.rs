//! 仿真时间类型
//!
//! 定义虚拟时间及其单位转换。协议层的“时间单位”（例如 20 个单位的重传间隔）
//! 被细分为 `TICKS_PER_UNIT` 个 tick，以便用整数精确表示随机的小数时延。

use std::fmt;

/// 每个协议时间单位包含的 tick 数。
pub const TICKS_PER_UNIT: u64 = 1_000;

/// 虚拟时间（tick）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    pub fn from_units(units: u64) -> SimTime {
        SimTime(units.saturating_mul(TICKS_PER_UNIT))
    }

    /// 小数时间单位，向下取整到 tick；负数与 NaN 视为 0。
    pub fn from_units_f64(units: f64) -> SimTime {
        if !(units > 0.0) {
            return SimTime::ZERO;
        }
        let ticks = units * TICKS_PER_UNIT as f64;
        if ticks >= u64::MAX as f64 {
            SimTime(u64::MAX)
        } else {
            SimTime(ticks as u64)
        }
    }

    pub fn as_units(self) -> f64 {
        self.0 as f64 / TICKS_PER_UNIT as f64
    }

    pub fn saturating_add(self, other: SimTime) -> SimTime {
        SimTime(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.as_units())
    }
}

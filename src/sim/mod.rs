//! 仿真核心模块
//!
//! 虚拟时间、事件与世界、以及按时间顺序逐个执行事件的仿真器。

mod event;
mod simulator;
mod time;

pub use event::{Event, World};
pub use simulator::Simulator;
pub use time::{SimTime, TICKS_PER_UNIT};

//! 仿真配置
//!
//! 可以从 JSON 文件加载（缺省字段取默认值），再由命令行参数覆盖。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::proto::go_back_n::{DEFAULT_BUFFER_CAPACITY, DEFAULT_WINDOW};
use crate::proto::{DEFAULT_TIMEOUT_UNITS, Protocol};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    pub protocol: Protocol,
    /// 应用层生成的消息数
    pub num_messages: u64,
    /// 每个包丢失的概率
    pub loss_prob: f64,
    /// 每个未丢失的包被损坏的概率
    pub corrupt_prob: f64,
    /// 应用层消息的平均间隔（单位）
    pub avg_delay: f64,
    pub seed: u64,
    /// 重传定时器间隔（单位）
    pub timeout_units: u64,
    /// Go-Back-N 窗口大小
    pub window: usize,
    /// Go-Back-N 发送缓冲容量
    pub buffer_capacity: usize,
    /// 仿真时间上限（单位）；信道全丢时重传永不停止，需要这个上限
    pub max_time_units: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            protocol: Protocol::AlternatingBit,
            num_messages: 10,
            loss_prob: 0.0,
            corrupt_prob: 0.0,
            avg_delay: 100.0,
            seed: 1,
            timeout_units: DEFAULT_TIMEOUT_UNITS,
            window: DEFAULT_WINDOW,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            max_time_units: 1_000_000,
        }
    }
}

impl SimConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("loss_prob", self.loss_prob), ("corrupt_prob", self.corrupt_prob)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { field, value });
            }
        }
        if !(self.avg_delay > 0.0) {
            return Err(ConfigError::NotPositive {
                field: "avg_delay",
                value: self.avg_delay,
            });
        }
        if self.timeout_units == 0 {
            return Err(ConfigError::NotPositive {
                field: "timeout_units",
                value: 0.0,
            });
        }
        if self.max_time_units == 0 {
            return Err(ConfigError::NotPositive {
                field: "max_time_units",
                value: 0.0,
            });
        }
        if self.num_messages == 0 {
            return Err(ConfigError::NoMessages);
        }
        if self.window == 0 || self.window > self.buffer_capacity {
            return Err(ConfigError::InvalidWindow {
                window: self.window,
                buffer_capacity: self.buffer_capacity,
            });
        }
        Ok(())
    }
}

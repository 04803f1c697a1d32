//! 数据包与应用层消息
//!
//! 线路格式只有四个字段：序号、确认号、校验和、有界载荷。

use serde::Serialize;

use crate::error::PacketError;
use crate::proto::checksum;

/// 消息数据与报文载荷的最大长度（字节）
pub const MAX_DATA_SIZE: usize = 20;

/// 网络数据包。构造时填好校验和；之后只有信道的损坏步骤会改动字段。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Packet {
    pub(crate) sequence_number: u32,
    pub(crate) ack_number: u32,
    pub(crate) checksum: u32,
    pub(crate) payload: Vec<u8>,
}

impl Packet {
    /// 构造带载荷的数据包并计算校验和。
    pub fn new(sequence_number: u32, ack_number: u32, payload: Vec<u8>) -> Result<Self, PacketError> {
        if payload.len() > MAX_DATA_SIZE {
            return Err(PacketError::PayloadTooLong {
                len: payload.len(),
                max: MAX_DATA_SIZE,
            });
        }
        Ok(Self::sealed(sequence_number, ack_number, payload))
    }

    /// 由消息成帧；`Message` 已保证长度有界。
    pub fn from_message(sequence_number: u32, ack_number: u32, msg: Message) -> Self {
        Self::sealed(sequence_number, ack_number, msg.into_bytes())
    }

    /// 无载荷的 ACK 包。
    pub fn ack(sequence_number: u32, ack_number: u32) -> Self {
        Self::sealed(sequence_number, ack_number, Vec::new())
    }

    /// 按线路上收到的原样字段构造（不重新计算校验和）。
    pub fn from_wire(
        sequence_number: u32,
        ack_number: u32,
        checksum: u32,
        payload: Vec<u8>,
    ) -> Result<Self, PacketError> {
        if payload.len() > MAX_DATA_SIZE {
            return Err(PacketError::PayloadTooLong {
                len: payload.len(),
                max: MAX_DATA_SIZE,
            });
        }
        Ok(Self {
            sequence_number,
            ack_number,
            checksum,
            payload,
        })
    }

    fn sealed(sequence_number: u32, ack_number: u32, payload: Vec<u8>) -> Self {
        let checksum = checksum::compute(sequence_number, ack_number, &payload);
        Self {
            sequence_number,
            ack_number,
            checksum,
            payload,
        }
    }

    pub fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    pub fn ack_number(&self) -> u32 {
        self.ack_number
    }

    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// 重新计算校验和并与携带的值比较
    pub fn is_valid(&self) -> bool {
        checksum::verify(self)
    }
}

/// 应用层（第 5 层）消息：有界文本。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    data: String,
}

impl Message {
    pub fn new(data: impl Into<String>) -> Result<Self, PacketError> {
        let data = data.into();
        if data.len() > MAX_DATA_SIZE {
            return Err(PacketError::PayloadTooLong {
                len: data.len(),
                max: MAX_DATA_SIZE,
            });
        }
        Ok(Self { data })
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data.into_bytes()
    }
}

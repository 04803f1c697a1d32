//! 校验和
//!
//! 序号 + 确认号 + 载荷各字节（无符号）之和，按 u32 回绕。
//! 生成与校验使用同一个算式，收发双方因此一致。这只用于检测信道损坏，
//! 不是密码学保证。

use crate::net::Packet;

pub fn compute(sequence_number: u32, ack_number: u32, payload: &[u8]) -> u32 {
    payload
        .iter()
        .fold(sequence_number.wrapping_add(ack_number), |sum, &b| {
            sum.wrapping_add(u32::from(b))
        })
}

pub fn verify(pkt: &Packet) -> bool {
    compute(pkt.sequence_number(), pkt.ack_number(), pkt.payload()) == pkt.checksum()
}

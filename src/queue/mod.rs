//! 有界发送队列
//!
//! 发送端的未确认报文缓冲：满了就拒绝新元素（尾丢弃），由调用方决定如何报告。

mod bounded;

pub use bounded::BoundedQueue;

//! BoundedQueue（容量固定的 FIFO）
//!
//! 容量不足时直接拒绝新到达的元素，并把它原样交还给调用方。

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct BoundedQueue<T> {
    capacity: usize,
    q: VecDeque<T>,
}

impl<T> BoundedQueue<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            q: VecDeque::with_capacity(capacity),
        }
    }

    /// 入队：成功返回 Ok；队列已满则返回 Err(item)
    pub fn offer(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }
        self.q.push_back(item);
        Ok(())
    }

    pub fn pop_front(&mut self) -> Option<T> {
        self.q.pop_front()
    }

    pub fn front(&self) -> Option<&T> {
        self.q.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.q.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.q.iter_mut()
    }

    pub fn clear(&mut self) {
        self.q.clear();
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.q.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

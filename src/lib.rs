pub mod config;
pub mod error;
pub mod net;
pub mod proto;
pub mod queue;
pub mod scenario;
pub mod sim;
pub mod timeline;

#[cfg(test)]
mod test;

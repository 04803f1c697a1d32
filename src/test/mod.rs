mod config;
mod receiver;
mod recording;
mod simulator;
mod timer;

use crate::net::{EntityId, NetApi, Packet};
use crate::sim::SimTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TimerCall {
    Start(EntityId, SimTime),
    Stop(EntityId),
}

/// `NetApi` double: records every call, never delivers anything.
#[derive(Debug, Default)]
pub(crate) struct RecordingApi {
    pub sent: Vec<(EntityId, Packet)>,
    pub delivered: Vec<(EntityId, Vec<u8>)>,
    pub timer_calls: Vec<TimerCall>,
    pub timer_running: bool,
    pub now: SimTime,
}

impl RecordingApi {
    pub fn sent_by(&self, from: EntityId) -> Vec<&Packet> {
        self.sent
            .iter()
            .filter(|(e, _)| *e == from)
            .map(|(_, p)| p)
            .collect()
    }

    pub fn sent_seqs(&self, from: EntityId) -> Vec<u32> {
        self.sent_by(from)
            .into_iter()
            .map(|p| p.sequence_number())
            .collect()
    }

    pub fn delivered_strings(&self) -> Vec<String> {
        self.delivered
            .iter()
            .map(|(_, p)| String::from_utf8_lossy(p).into_owned())
            .collect()
    }

    pub fn clear_sent(&mut self) {
        self.sent.clear();
    }
}

impl NetApi for RecordingApi {
    fn send_to_network(&mut self, from: EntityId, pkt: Packet) {
        self.sent.push((from, pkt));
    }

    fn deliver_to_application(&mut self, at: EntityId, payload: &[u8]) {
        self.delivered.push((at, payload.to_vec()));
    }

    fn start_timer(&mut self, entity: EntityId, duration: SimTime) {
        self.timer_running = true;
        self.timer_calls.push(TimerCall::Start(entity, duration));
    }

    fn stop_timer(&mut self, entity: EntityId) {
        self.timer_running = false;
        self.timer_calls.push(TimerCall::Stop(entity));
    }

    fn now(&self) -> SimTime {
        self.now
    }
}

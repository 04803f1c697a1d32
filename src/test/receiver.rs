use super::recording::RecordingApi;
use crate::net::{EntityId, Packet, ReceiverStats};
use crate::proto::{Receiver, ReceiverMode};

fn data(seq: u32, ack: u32, payload: &str) -> Packet {
    Packet::new(seq, ack, payload.as_bytes().to_vec()).expect("packet")
}

fn corrupted(seq: u32, payload: &str) -> Packet {
    let mut p = data(seq, seq, payload);
    p.payload[0] ^= 0x20;
    p
}

#[test]
fn corrupt_arrival_with_no_ack_on_record_sends_nothing() {
    for mode in [ReceiverMode::AlternatingBit, ReceiverMode::GoBackN] {
        let mut rx = Receiver::new(mode);
        let mut api = RecordingApi::default();
        let mut stats = ReceiverStats::default();

        rx.on_arrival(corrupted(0, "hello"), &mut api, &mut stats);

        assert!(api.sent.is_empty(), "{mode:?}");
        assert!(api.delivered.is_empty(), "{mode:?}");
        assert_eq!(stats.corrupt, 1);
    }
}

#[test]
fn corrupt_arrival_after_an_ack_resends_that_ack() {
    let mut rx = Receiver::new(ReceiverMode::GoBackN);
    let mut api = RecordingApi::default();
    let mut stats = ReceiverStats::default();

    rx.on_arrival(data(0, 0, "a"), &mut api, &mut stats);
    let first_ack = api.sent[0].1.clone();
    api.clear_sent();

    rx.on_arrival(corrupted(1, "b"), &mut api, &mut stats);
    assert_eq!(api.sent, vec![(EntityId::B, first_ack)]);
    assert_eq!(api.delivered.len(), 1);
    assert_eq!(stats.acks_resent, 1);
}

#[test]
fn ack_echoes_sequence_and_ack_fields_with_empty_payload() {
    let mut rx = Receiver::new(ReceiverMode::AlternatingBit);
    let mut api = RecordingApi::default();
    let mut stats = ReceiverStats::default();

    rx.on_arrival(data(0, 5, "hello"), &mut api, &mut stats);

    let (from, ack) = &api.sent[0];
    assert_eq!(*from, EntityId::B);
    assert_eq!(ack.sequence_number(), 0);
    assert_eq!(ack.ack_number(), 5);
    assert!(ack.payload().is_empty());
    assert!(ack.is_valid());
    assert_eq!(rx.last_ack(), Some(ack));
}

#[test]
fn duplicate_is_acked_again_but_not_redelivered() {
    for mode in [ReceiverMode::AlternatingBit, ReceiverMode::GoBackN] {
        let mut rx = Receiver::new(mode);
        let mut api = RecordingApi::default();
        let mut stats = ReceiverStats::default();

        rx.on_arrival(data(0, 0, "once"), &mut api, &mut stats);
        rx.on_arrival(data(0, 0, "once"), &mut api, &mut stats);

        assert_eq!(api.delivered_strings(), vec!["once"], "{mode:?}");
        assert_eq!(api.sent.len(), 2);
        assert_eq!(api.sent[0], api.sent[1]);
        assert_eq!(stats.duplicates, 1);
    }
}

#[test]
fn alternating_bit_accepts_any_new_sequence_number() {
    let mut rx = Receiver::new(ReceiverMode::AlternatingBit);
    let mut api = RecordingApi::default();
    let mut stats = ReceiverStats::default();

    rx.on_arrival(data(0, 3, "abc"), &mut api, &mut stats);
    rx.on_arrival(data(3, 5, "de"), &mut api, &mut stats);
    assert_eq!(api.delivered_strings(), vec!["abc", "de"]);
}

#[test]
fn go_back_n_gap_resends_last_ack_and_discards_data() {
    let mut rx = Receiver::new(ReceiverMode::GoBackN);
    let mut api = RecordingApi::default();
    let mut stats = ReceiverStats::default();

    rx.on_arrival(data(0, 0, "a"), &mut api, &mut stats);
    rx.on_arrival(data(2, 2, "c"), &mut api, &mut stats);

    assert_eq!(api.delivered_strings(), vec!["a"]);
    assert_eq!(api.sent_seqs(EntityId::B), vec![0, 0]);
    assert_eq!(stats.gaps, 1);

    rx.on_arrival(data(1, 1, "b"), &mut api, &mut stats);
    assert_eq!(api.delivered_strings(), vec!["a", "b"]);
}

#[test]
fn go_back_n_expects_the_initial_sequence_number_first() {
    let mut rx = Receiver::new(ReceiverMode::GoBackN);
    let mut api = RecordingApi::default();
    let mut stats = ReceiverStats::default();

    rx.on_arrival(data(1, 1, "b"), &mut api, &mut stats);
    assert!(api.delivered.is_empty());
    assert!(api.sent.is_empty());

    rx.on_arrival(data(0, 0, "a"), &mut api, &mut stats);
    assert_eq!(api.delivered_strings(), vec!["a"]);
}

#[test]
fn init_forgets_the_remembered_ack() {
    let mut rx = Receiver::new(ReceiverMode::AlternatingBit);
    let mut api = RecordingApi::default();
    let mut stats = ReceiverStats::default();

    rx.on_arrival(data(0, 1, "x"), &mut api, &mut stats);
    rx.init();
    assert!(rx.last_ack().is_none());
}

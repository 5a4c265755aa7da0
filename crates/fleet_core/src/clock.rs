//! Discrete-event clock: a min-heap of timestamped events.
//!
//! All timestamps are simulation milliseconds; one simulated minute is
//! [ONE_MIN_MS]. Events at the same timestamp run in the order they were
//! scheduled (insertion sequence breaks ties).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy_ecs::prelude::{Entity, Resource};

/// One simulated second in clock milliseconds.
pub const ONE_SEC_MS: u64 = 1000;
/// One simulated minute in clock milliseconds.
pub const ONE_MIN_MS: u64 = 60 * ONE_SEC_MS;

/// Convert a duration in simulated minutes to clock milliseconds.
pub fn minutes_to_ms(minutes: f64) -> u64 {
    (minutes * ONE_MIN_MS as f64).round().max(0.0) as u64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    SimulationStarted,
    SpawnVehicle,
    VehicleTick,
    ChargeComplete,
}

/// The entity an event concerns, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSubject {
    Vehicle(Entity),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub timestamp: u64,
    pub kind: EventKind,
    pub subject: Option<EventSubject>,
    /// Insertion sequence; ties on `timestamp` pop in scheduling order.
    seq: u64,
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by (timestamp, seq).
        other
            .timestamp
            .cmp(&self.timestamp)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The event being dispatched right now; the runner inserts it before each
/// schedule pass so systems can inspect kind and subject.
#[derive(Debug, Clone, Copy, Resource)]
pub struct CurrentEvent(pub Event);

#[derive(Debug, Default, Resource)]
pub struct SimulationClock {
    now: u64,
    next_seq: u64,
    events: BinaryHeap<Event>,
}

impl SimulationClock {
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn now_minutes(&self) -> f64 {
        self.now as f64 / ONE_MIN_MS as f64
    }

    pub fn schedule_at(&mut self, timestamp: u64, kind: EventKind, subject: Option<EventSubject>) {
        debug_assert!(
            timestamp >= self.now,
            "event timestamp must be >= current time"
        );
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(Event {
            timestamp,
            kind,
            subject,
            seq,
        });
    }

    pub fn schedule_in(&mut self, delta_ms: u64, kind: EventKind, subject: Option<EventSubject>) {
        self.schedule_at(self.now + delta_ms, kind, subject);
    }

    pub fn pop_next(&mut self) -> Option<Event> {
        let event = self.events.pop()?;
        self.now = event.timestamp;
        Some(event)
    }

    pub fn next_event_time(&self) -> Option<u64> {
        self.events.peek().map(|e| e.timestamp)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_pops_events_in_time_order() {
        let mut clock = SimulationClock::default();
        clock.schedule_at(10 * ONE_MIN_MS, EventKind::VehicleTick, None);
        clock.schedule_at(5 * ONE_MIN_MS, EventKind::SpawnVehicle, None);
        clock.schedule_at(20 * ONE_MIN_MS, EventKind::ChargeComplete, None);

        let first = clock.pop_next().expect("first event");
        assert_eq!(first.timestamp, 5 * ONE_MIN_MS);
        assert_eq!(clock.now(), 5 * ONE_MIN_MS);

        let second = clock.pop_next().expect("second event");
        assert_eq!(second.timestamp, 10 * ONE_MIN_MS);

        let third = clock.pop_next().expect("third event");
        assert_eq!(third.timestamp, 20 * ONE_MIN_MS);

        assert!(clock.pop_next().is_none());
        assert!(clock.is_empty());
    }

    #[test]
    fn ties_pop_in_insertion_order() {
        let mut clock = SimulationClock::default();
        clock.schedule_at(7, EventKind::ChargeComplete, None);
        clock.schedule_at(7, EventKind::SpawnVehicle, None);
        clock.schedule_at(7, EventKind::VehicleTick, None);

        assert_eq!(clock.pop_next().expect("e1").kind, EventKind::ChargeComplete);
        assert_eq!(clock.pop_next().expect("e2").kind, EventKind::SpawnVehicle);
        assert_eq!(clock.pop_next().expect("e3").kind, EventKind::VehicleTick);
    }

    #[test]
    fn schedule_in_is_relative_to_now() {
        let mut clock = SimulationClock::default();
        clock.schedule_at(ONE_MIN_MS, EventKind::VehicleTick, None);
        clock.pop_next().expect("event");
        clock.schedule_in(2 * ONE_MIN_MS, EventKind::VehicleTick, None);
        assert_eq!(clock.next_event_time(), Some(3 * ONE_MIN_MS));
    }

    #[test]
    fn minutes_convert_and_round() {
        assert_eq!(minutes_to_ms(2.0), 120_000);
        assert_eq!(minutes_to_ms(0.5), 30_000);
        assert_eq!(minutes_to_ms(18.42), 1_105_200);
        assert_eq!(minutes_to_ms(-1.0), 0);
    }

    #[test]
    fn now_minutes_tracks_popped_time() {
        let mut clock = SimulationClock::default();
        clock.schedule_at(minutes_to_ms(2.5), EventKind::VehicleTick, None);
        clock.pop_next().expect("event");
        assert!((clock.now_minutes() - 2.5).abs() < 1e-9);
    }
}

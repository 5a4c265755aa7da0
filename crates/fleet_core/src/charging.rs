//! Shared fast-charger pool: bounded concurrency with strict FCFS queueing.
//!
//! At most `capacity` sessions run at once; excess requests wait in arrival
//! order with no priority, no preemption and no abandonment. The pool is pure
//! bookkeeping; session completion is an event the caller schedules.

use std::collections::VecDeque;

use bevy_ecs::prelude::{Entity, Resource};

use crate::clock::minutes_to_ms;

/// A pending request for one charging session. Owned by the pool's queue
/// while waiting, consumed when the session starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargingRequest {
    pub vehicle: Entity,
    pub vehicle_id: u32,
    /// Clock time the request was issued; queue position follows from it.
    pub requested_at: u64,
    pub energy_needed_kwh: f64,
}

/// Bank of identical fast chargers.
#[derive(Debug, Resource)]
pub struct ChargerPool {
    capacity: usize,
    power_kw: f64,
    in_service: usize,
    queue: VecDeque<ChargingRequest>,
}

impl ChargerPool {
    pub fn new(capacity: usize, power_kw: f64) -> Self {
        Self {
            capacity,
            power_kw,
            in_service: 0,
            queue: VecDeque::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn power_kw(&self) -> f64 {
        self.power_kw
    }

    /// Sessions currently drawing power. Never exceeds `capacity`.
    pub fn in_service(&self) -> usize {
        self.in_service
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Enqueue a request and start the front of the queue if a charger is
    /// free. Returns the request that begins service now, if any; that is the
    /// submitted one exactly when the queue was empty and a charger was idle.
    pub fn submit(&mut self, request: ChargingRequest) -> Option<ChargingRequest> {
        self.queue.push_back(request);
        self.try_start()
    }

    /// Release one charger and hand it to the next queued request, if any.
    pub fn release(&mut self) -> Option<ChargingRequest> {
        debug_assert!(self.in_service > 0, "release without an active session");
        self.in_service = self.in_service.saturating_sub(1);
        self.try_start()
    }

    fn try_start(&mut self) -> Option<ChargingRequest> {
        if self.in_service < self.capacity {
            let request = self.queue.pop_front()?;
            self.in_service += 1;
            Some(request)
        } else {
            None
        }
    }

    /// Session length in clock milliseconds for the requested energy at full
    /// charger power.
    pub fn session_ms(&self, energy_needed_kwh: f64) -> u64 {
        minutes_to_ms(energy_needed_kwh / self.power_kw * 60.0)
    }
}

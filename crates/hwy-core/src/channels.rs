//! Per-station channel counters
//!
//! Each station starts with `base_channel` free channels. New calls may only
//! take a channel while more than `reserved_channel` remain free; the rest
//! form a guard band that only handovers can use.

use tracing::trace;

use crate::error::{Result, SimError};

/// Free-channel counters for every station on the highway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPool {
    free: Vec<u32>,
    base_channel: u32,
    reserved_channel: u32,
}

impl ChannelPool {
    /// Create a pool with every channel free
    pub fn new(base_count: usize, base_channel: u32, reserved_channel: u32) -> Self {
        Self {
            free: vec![base_channel; base_count],
            base_channel,
            reserved_channel,
        }
    }

    /// Number of stations
    pub fn station_count(&self) -> usize {
        self.free.len()
    }

    /// Channels per station
    pub fn capacity(&self) -> u32 {
        self.base_channel
    }

    /// Free channels at `station`
    pub fn available(&self, station: usize) -> u32 {
        self.free[station]
    }

    /// Channels in use at `station`
    pub fn occupied(&self, station: usize) -> u32 {
        self.base_channel - self.free[station]
    }

    /// Take a channel for a new call, respecting the guard band
    pub fn try_acquire_for_initiation(&mut self, station: usize) -> bool {
        let free = &mut self.free[station];
        if *free > self.reserved_channel {
            *free -= 1;
            trace!(station, free = *free, "Channel acquired for initiation");
            true
        } else {
            false
        }
    }

    /// Take a channel for a handed-over call, guard band included
    pub fn try_acquire_for_handover(&mut self, station: usize) -> bool {
        let free = &mut self.free[station];
        if *free > 0 {
            *free -= 1;
            trace!(station, free = *free, "Channel acquired for handover");
            true
        } else {
            false
        }
    }

    /// Return a channel to `station`
    pub fn release(&mut self, station: usize) -> Result<()> {
        let free = &mut self.free[station];
        if *free >= self.base_channel {
            return Err(SimError::ChannelOverflow { station });
        }
        *free += 1;
        trace!(station, free = *free, "Channel released");
        Ok(())
    }
}

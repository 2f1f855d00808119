//! In-memory seat lock manager.
//!
//! The seat table, the lock table, and the seat→lock index live together
//! behind one `std::sync::Mutex`. Each public operation takes the mutex once
//! and finishes all of its checks and writes before releasing it, so an
//! acquire is all-or-nothing and a confirm is never observed half-applied.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info};

use seathold_core::types::{LockToken, SeatId};

use crate::error::LockError;
use crate::model::{
    ConflictReason, Lock, LockGrant, LockView, PoolState, Seat, SeatConflict, SeatView,
};

/// Tables guarded by the manager mutex.
#[derive(Debug)]
struct LockTables {
    /// Fixed seat set, keyed and iterated by seat id.
    seats: BTreeMap<SeatId, Seat>,
    /// Outstanding locks, including expired ones not yet swept.
    locks: HashMap<LockToken, Lock>,
    /// Seat → token of the lock that most recently claimed it.
    ///
    /// Every token in here has an entry in `locks`. Entries may point at an
    /// expired lock until the next sweep.
    index: HashMap<SeatId, LockToken>,
}

impl LockTables {
    /// The unexpired lock currently covering `seat_id`, if any.
    fn live_lock(&self, seat_id: SeatId, now: DateTime<Utc>) -> Option<&Lock> {
        self.index
            .get(&seat_id)
            .and_then(|token| self.locks.get(token))
            .filter(|lock| !lock.is_expired_at(now))
    }

    /// Returns the conflict preventing `owner_id` from locking `seat_id`.
    fn classify(&self, seat_id: SeatId, owner_id: &str, now: DateTime<Utc>) -> Option<SeatConflict> {
        let seat = self.seats.get(&seat_id)?;
        if let Some(holder) = &seat.holder_id {
            return Some(SeatConflict {
                seat_id,
                reason: ConflictReason::AlreadyReserved,
                held_by: holder.clone(),
            });
        }

        let lock = self.live_lock(seat_id, now)?;
        if lock.owner_id == owner_id {
            return None;
        }
        Some(SeatConflict {
            seat_id,
            reason: ConflictReason::Locked,
            held_by: lock.owner_id.clone(),
        })
    }

    /// Deletes a lock and the index entries that still point at it.
    ///
    /// Entries re-pointed at a newer lock are left alone.
    fn remove_lock(&mut self, token: &LockToken) -> Option<Lock> {
        let lock = self.locks.remove(token)?;
        for seat_id in &lock.seat_ids {
            if self.index.get(seat_id) == Some(token) {
                self.index.remove(seat_id);
            }
        }
        Some(lock)
    }
}

/// Grants and confirms seat locks.
///
/// Construct once and share as `Arc<SeatLockManager>`.
#[derive(Debug)]
pub struct SeatLockManager {
    /// Protected tables.
    tables: Mutex<LockTables>,
    /// Number of seats, `1..=total_seats`.
    total_seats: u32,
}

impl SeatLockManager {
    /// Creates a manager with seats `1..=total_seats`, all free.
    pub fn new(total_seats: u32) -> Self {
        let seats = (1..=total_seats)
            .map(|id| (SeatId(id), Seat::new(SeatId(id))))
            .collect();

        info!(total_seats = total_seats, "Seat lock manager initialized");

        Self {
            tables: Mutex::new(LockTables {
                seats,
                locks: HashMap::new(),
                index: HashMap::new(),
            }),
            total_seats,
        }
    }

    /// Number of seats managed.
    pub fn total_seats(&self) -> u32 {
        self.total_seats
    }

    fn tables(&self) -> MutexGuard<'_, LockTables> {
        // Every critical section validates before it writes, so a panic
        // cannot leave the tables half-updated.
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Locks every seat in `seat_ids` for `owner_id`, or none of them.
    ///
    /// Seats covered by the owner's own live lock are eligible; the old
    /// lock is not extended, a new token takes over those seats.
    pub fn acquire(
        &self,
        owner_id: &str,
        seat_ids: &[SeatId],
        ttl: Duration,
    ) -> Result<LockGrant, LockError> {
        self.acquire_at(owner_id, seat_ids, ttl, Utc::now())
    }

    fn acquire_at(
        &self,
        owner_id: &str,
        seat_ids: &[SeatId],
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<LockGrant, LockError> {
        let requested: BTreeSet<SeatId> = seat_ids.iter().copied().collect();
        if requested.is_empty() {
            return Err(LockError::EmptySelection);
        }

        let mut tables = self.tables();

        let unknown: Vec<SeatId> = requested
            .iter()
            .filter(|id| !tables.seats.contains_key(*id))
            .copied()
            .collect();
        if !unknown.is_empty() {
            debug!(owner_id = %owner_id, unknown = ?unknown, "Lock request names unknown seats");
            return Err(LockError::UnknownResource(unknown));
        }

        let conflicts: Vec<SeatConflict> = requested
            .iter()
            .filter_map(|id| tables.classify(*id, owner_id, now))
            .collect();
        if !conflicts.is_empty() {
            debug!(
                owner_id = %owner_id,
                conflicts = conflicts.len(),
                "Lock request rejected"
            );
            return Err(LockError::Conflict(conflicts));
        }

        let token = LockToken::new();
        let expires_at = expiry_after(now, ttl);
        let seat_ids: Vec<SeatId> = requested.into_iter().collect();

        for seat_id in &seat_ids {
            tables.index.insert(*seat_id, token);
        }
        tables.locks.insert(
            token,
            Lock {
                token,
                owner_id: owner_id.to_string(),
                seat_ids: seat_ids.clone(),
                expires_at,
            },
        );

        info!(
            owner_id = %owner_id,
            token = %token,
            seat_ids = ?seat_ids,
            expires_at = %expires_at,
            "Lock granted"
        );

        Ok(LockGrant {
            token,
            seat_ids,
            expires_at,
        })
    }

    /// Converts a live lock into permanent reservations for all of its seats.
    ///
    /// An expired lock is released as a side effect and reported as
    /// [`LockError::Expired`].
    pub fn confirm(&self, token: &LockToken) -> Result<Vec<SeatId>, LockError> {
        self.confirm_at(token, Utc::now())
    }

    fn confirm_at(&self, token: &LockToken, now: DateTime<Utc>) -> Result<Vec<SeatId>, LockError> {
        let mut guard = self.tables();
        let tables = &mut *guard;

        let Some(lock) = tables.locks.get(token) else {
            debug!(token = %token, "Confirm with unknown token");
            return Err(LockError::InvalidToken);
        };

        if lock.is_expired_at(now) {
            tables.remove_lock(token);
            info!(token = %token, "Confirm on expired lock, lock released");
            return Err(LockError::Expired);
        }

        let still_held = lock.seat_ids.iter().all(|seat_id| {
            let reserved = tables
                .seats
                .get(seat_id)
                .map_or(true, Seat::is_reserved);
            !reserved && tables.index.get(seat_id) == Some(token)
        });
        if !still_held {
            debug!(token = %token, "Confirm rejected, seat state changed");
            return Err(LockError::ResourceStateChanged);
        }

        let Some(lock) = tables.locks.remove(token) else {
            return Err(LockError::InvalidToken);
        };
        for seat_id in &lock.seat_ids {
            if let Some(seat) = tables.seats.get_mut(seat_id) {
                seat.holder_id = Some(lock.owner_id.clone());
                seat.reserved_at = Some(now);
            }
            tables.index.remove(seat_id);
        }

        info!(
            owner_id = %lock.owner_id,
            token = %token,
            seat_ids = ?lock.seat_ids,
            "Seats confirmed"
        );

        Ok(lock.seat_ids)
    }

    /// Voluntarily cancels a lock. Returns whether a lock was removed.
    pub fn release(&self, token: &LockToken) -> bool {
        match self.tables().remove_lock(token) {
            Some(lock) => {
                info!(
                    owner_id = %lock.owner_id,
                    token = %token,
                    seat_ids = ?lock.seat_ids,
                    "Lock released"
                );
                true
            }
            None => {
                debug!(token = %token, "Release of unknown token");
                false
            }
        }
    }

    /// Releases every expired lock. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Utc::now())
    }

    fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let mut tables = self.tables();

        let expired: Vec<LockToken> = tables
            .locks
            .values()
            .filter(|lock| lock.is_expired_at(now))
            .map(|lock| lock.token)
            .collect();

        for token in &expired {
            if let Some(lock) = tables.remove_lock(token) {
                debug!(
                    owner_id = %lock.owner_id,
                    token = %token,
                    seat_ids = ?lock.seat_ids,
                    "Expired lock swept"
                );
            }
        }

        expired.len()
    }

    /// Snapshot of every seat, ascending by id.
    ///
    /// Lock details are included only when `include_locks` is set and the
    /// covering lock is still live.
    pub fn list_state(&self, include_locks: bool) -> Vec<SeatView> {
        self.list_state_at(include_locks, Utc::now())
    }

    fn list_state_at(&self, include_locks: bool, now: DateTime<Utc>) -> Vec<SeatView> {
        let tables = self.tables();

        tables
            .seats
            .values()
            .map(|seat| {
                let lock = if include_locks {
                    tables.live_lock(seat.id, now)
                } else {
                    None
                };
                SeatView {
                    id: seat.id,
                    holder_id: seat.holder_id.clone(),
                    reserved_at: seat.reserved_at,
                    lock_holder_id: lock.map(|l| l.owner_id.clone()),
                    lock_expires_at: lock.map(|l| l.expires_at),
                    lock_token: lock.map(|l| l.token),
                }
            })
            .collect()
    }

    /// Looks up a lock that has not yet been confirmed, released, or swept.
    pub fn lock_info(&self, token: &LockToken) -> Option<LockView> {
        self.lock_info_at(token, Utc::now())
    }

    fn lock_info_at(&self, token: &LockToken, now: DateTime<Utc>) -> Option<LockView> {
        let tables = self.tables();
        tables.locks.get(token).map(|lock| LockView {
            token: lock.token,
            owner_id: lock.owner_id.clone(),
            seat_ids: lock.seat_ids.clone(),
            expires_at: lock.expires_at,
            expired: lock.is_expired_at(now),
        })
    }

    /// Occupancy counts for the seat pool.
    pub fn pool_state(&self) -> PoolState {
        self.pool_state_at(Utc::now())
    }

    fn pool_state_at(&self, now: DateTime<Utc>) -> PoolState {
        let tables = self.tables();

        let mut reserved = 0u32;
        let mut locked = 0u32;
        for seat in tables.seats.values() {
            if seat.is_reserved() {
                reserved += 1;
            } else if tables.live_lock(seat.id, now).is_some() {
                locked += 1;
            }
        }

        PoolState {
            total: self.total_seats,
            reserved,
            locked,
            available: self.total_seats - reserved - locked,
            active_locks: u32::try_from(tables.locks.len()).unwrap_or(u32::MAX),
        }
    }
}

/// `now + ttl`, saturating at the latest representable instant.
fn expiry_after(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    TimeDelta::from_std(ttl)
        .ok()
        .and_then(|ttl| now.checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

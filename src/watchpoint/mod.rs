//! Watchpoint registry
//!
//! A fixed pool of watchpoint records managed as an arena: records live in one
//! `Vec` and the free and active lists are singly linked through slot indices.
//! Every record is on exactly one of the two lists at all times.
//!
//! - Slot `i` always carries id `i`, so ids are stable for the pool's lifetime
//!   even when slots are recycled.
//! - The active list keeps insertion order; freed slots go to the head of the
//!   free list.
//! - Creating a watchpoint evaluates it immediately. If evaluation fails the
//!   slot goes straight back to the free list and nothing becomes active.

use crate::config::SdbConfig;
use crate::interpreter::engine::Expression;
use crate::interpreter::errors::ExprError;
use crate::memory::{MemoryRead, RegisterAccess, Word};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Watchpoint number, bound to its pool slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatchpointId(pub usize);

impl fmt::Display for WatchpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WatchpointError {
    #[error("all {capacity} watchpoints are in use")]
    PoolExhausted { capacity: usize },

    #[error("no active watchpoint {id}")]
    NotFound { id: WatchpointId },

    #[error(transparent)]
    Expr(#[from] ExprError),
}

/// A value change observed by [`WatchpointPool::check_all`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEvent {
    pub id: WatchpointId,
    pub old: Word,
    pub new: Word,
}

/// One pool slot
#[derive(Debug, Clone)]
pub struct Watchpoint {
    id: WatchpointId,
    expr: Option<Expression>, // Some while active
    value: Word,
    next: Option<usize>,
}

impl Watchpoint {
    pub fn id(&self) -> WatchpointId {
        self.id
    }

    /// Expression text as given at creation
    pub fn expr(&self) -> &str {
        self.expr.as_ref().map_or("", Expression::text)
    }

    /// Value seen at creation or at the last check that changed it
    pub fn value(&self) -> Word {
        self.value
    }
}

/// Fixed-capacity watchpoint pool
#[derive(Debug, Clone)]
pub struct WatchpointPool {
    slots: Vec<Watchpoint>,
    free: Option<usize>,
    active: Option<usize>,
    max_tokens: usize,
}

impl WatchpointPool {
    /// Pool with the default capacity and token bound.
    pub fn new() -> Self {
        Self::with_config(&SdbConfig::default())
    }

    pub fn with_config(config: &SdbConfig) -> Self {
        let capacity = config.pool_capacity;
        let slots = (0..capacity)
            .map(|i| Watchpoint {
                id: WatchpointId(i),
                expr: None,
                value: 0,
                next: (i + 1 < capacity).then_some(i + 1),
            })
            .collect();

        WatchpointPool {
            slots,
            free: (capacity > 0).then_some(0),
            active: None,
            max_tokens: config.max_tokens,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.chain(self.active).count()
    }

    pub fn free_count(&self) -> usize {
        self.chain(self.free).count()
    }

    /// Create a watchpoint on `text`, evaluating it against the current state.
    pub fn create<R, M>(
        &mut self,
        text: &str,
        regs: &R,
        mem: &M,
    ) -> Result<WatchpointId, WatchpointError>
    where
        R: RegisterAccess + ?Sized,
        M: MemoryRead + ?Sized,
    {
        let slot = self.pop_free().ok_or(WatchpointError::PoolExhausted {
            capacity: self.capacity(),
        })?;

        let evaluated = Expression::parse_with_limit(text, regs, self.max_tokens)
            .and_then(|expr| expr.evaluate(regs, mem).map(|value| (expr, value)));

        let (expr, value) = match evaluated {
            Ok(pair) => pair,
            Err(err) => {
                self.push_free(slot);
                return Err(err.into());
            }
        };

        let wp = &mut self.slots[slot];
        wp.expr = Some(expr);
        wp.value = value;
        let id = wp.id;
        self.append_active(slot);

        info!(%id, expr = text, value, "watchpoint created");
        Ok(id)
    }

    /// Delete an active watchpoint and return its slot to the free list.
    pub fn remove(&mut self, id: WatchpointId) -> Result<(), WatchpointError> {
        let slot = id.0;
        if slot >= self.slots.len() || !self.unlink_active(slot) {
            return Err(WatchpointError::NotFound { id });
        }

        self.slots[slot].expr = None;
        self.slots[slot].value = 0;
        self.push_free(slot);

        info!(%id, "watchpoint removed");
        Ok(())
    }

    /// Re-evaluate every active watchpoint and report those whose value changed.
    ///
    /// A watchpoint whose expression currently fails to evaluate keeps its
    /// previous value and produces no event.
    pub fn check_all<R, M>(&mut self, regs: &R, mem: &M) -> Vec<TriggerEvent>
    where
        R: RegisterAccess + ?Sized,
        M: MemoryRead + ?Sized,
    {
        let active: Vec<usize> = self.chain(self.active).collect();
        let mut events = Vec::new();

        for slot in active {
            let wp = &self.slots[slot];
            let Some(expr) = &wp.expr else {
                continue;
            };

            match expr.evaluate(regs, mem) {
                Ok(new) => {
                    debug!(id = %wp.id, value = new, "watchpoint checked");
                    if new != wp.value {
                        events.push(TriggerEvent {
                            id: wp.id,
                            old: wp.value,
                            new,
                        });
                        self.slots[slot].value = new;
                    }
                }
                Err(err) => {
                    warn!(
                        id = %wp.id,
                        expr = expr.text(),
                        error = %err,
                        "watchpoint evaluation failed"
                    );
                }
            }
        }

        events
    }

    /// The active watchpoint with this id
    pub fn get(&self, id: WatchpointId) -> Option<&Watchpoint> {
        self.slots.get(id.0).filter(|wp| wp.expr.is_some())
    }

    /// Active watchpoints in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Watchpoint> + '_ {
        self.chain(self.active).map(move |i| &self.slots[i])
    }

    /// Slot indices along a list starting at `head`
    fn chain(&self, head: Option<usize>) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(head, move |&i| self.slots[i].next)
    }

    fn pop_free(&mut self) -> Option<usize> {
        let slot = self.free?;
        self.free = self.slots[slot].next.take();
        Some(slot)
    }

    fn push_free(&mut self, slot: usize) {
        self.slots[slot].next = self.free;
        self.free = Some(slot);
    }

    fn append_active(&mut self, slot: usize) {
        self.slots[slot].next = None;
        let tail = self.chain(self.active).last();
        match tail {
            Some(tail) => self.slots[tail].next = Some(slot),
            None => self.active = Some(slot),
        }
    }

    /// Remove `slot` from the active list; `false` if it was not there.
    fn unlink_active(&mut self, slot: usize) -> bool {
        let mut prev: Option<usize> = None;
        let mut cur = self.active;

        while let Some(i) = cur {
            if i == slot {
                let next = self.slots[i].next.take();
                match prev {
                    Some(p) => self.slots[p].next = next,
                    None => self.active = next,
                }
                return true;
            }
            prev = cur;
            cur = self.slots[i].next;
        }
        false
    }
}

impl Default for WatchpointPool {
    fn default() -> Self {
        Self::new()
    }
}

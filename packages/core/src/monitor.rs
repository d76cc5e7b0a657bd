//! Bounded, priority-aware queue shared by the pipeline stages.

use std::sync::Mutex;

use tokio::sync::Semaphore;

use crate::Priority;

/// Extraction urgency for items stored in a [`Monitor`].
pub trait Prioritized {
    fn priority(&self) -> Priority;
}

/// Error returned by monitor operations after [`Monitor::close`] has been
/// called. Actors treat it as the shutdown signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("monitor is closed")]
pub struct MonitorClosed;

/// A bounded concurrent queue with priority-max extraction.
///
/// `push` suspends while the queue is full, `pop` and `peek` suspend while
/// it is empty; extraction always removes an item of maximum priority, ties
/// broken by earliest insertion. Capacity and item availability are tracked
/// by two counting semaphores whose FIFO wait queues provide the wake
/// discipline: a `push` consumes a slot permit and releases an item permit,
/// a `pop` does the inverse, so no waiter can be woken past its guard and
/// no wakeup is lost.
///
/// The queue is shared by reference-counted handle; its lifetime spans the
/// whole run. Closing it wakes every suspended waiter with [`MonitorClosed`].
pub struct Monitor<T> {
    buffer: Mutex<Vec<T>>,
    /// Free slots; starts at `capacity`.
    slots: Semaphore,
    /// Available items; starts at zero.
    items: Semaphore,
    capacity: usize,
}

impl<T: Prioritized + Clone> Monitor<T> {
    /// Create an empty monitor holding at most `capacity` items.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: Mutex::new(Vec::with_capacity(capacity)),
            slots: Semaphore::new(capacity),
            items: Semaphore::new(0),
            capacity,
        }
    }

    /// Insert an item, suspending while the queue is at capacity.
    pub async fn push(&self, item: T) -> Result<(), MonitorClosed> {
        let permit = self.slots.acquire().await.map_err(|_| MonitorClosed)?;
        permit.forget();
        {
            let mut buffer = self.buffer.lock().unwrap();
            buffer.push(item);
        }
        self.items.add_permits(1);
        Ok(())
    }

    /// Remove and return an item of maximum priority, suspending while the
    /// queue is empty. Ties are broken by earliest insertion.
    pub async fn pop(&self) -> Result<T, MonitorClosed> {
        let permit = self.items.acquire().await.map_err(|_| MonitorClosed)?;
        permit.forget();
        let item = {
            let mut buffer = self.buffer.lock().unwrap();
            let index = max_priority_index(&buffer);
            buffer.remove(index)
        };
        self.slots.add_permits(1);
        Ok(item)
    }

    /// Return a copy of the current maximum-priority item without removing
    /// it, suspending while the queue is empty.
    ///
    /// The item permit is held across the read (guaranteeing the buffer is
    /// non-empty) and released afterwards, so peeking never consumes
    /// capacity and cannot wedge the push/pop protocol.
    pub async fn peek(&self) -> Result<T, MonitorClosed> {
        let _permit = self.items.acquire().await.map_err(|_| MonitorClosed)?;
        let buffer = self.buffer.lock().unwrap();
        Ok(buffer[max_priority_index(&buffer)].clone())
    }

    /// Point-in-time copy of the contents in insertion order. A single
    /// short critical section; never suspends.
    pub fn snapshot(&self) -> Vec<T> {
        self.buffer.lock().unwrap().clone()
    }

    /// Number of items currently queued.
    pub fn len(&self) -> usize {
        self.buffer.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of items the monitor can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Close the monitor, waking every suspended waiter with
    /// [`MonitorClosed`] and failing all subsequent operations except
    /// [`Monitor::snapshot`].
    pub fn close(&self) {
        self.slots.close();
        self.items.close();
    }

    pub fn is_closed(&self) -> bool {
        self.items.is_closed()
    }
}

/// Index of the first item with maximum priority.
///
/// Callers must guarantee the buffer is non-empty (they hold an item
/// permit).
fn max_priority_index<T: Prioritized>(buffer: &[T]) -> usize {
    let mut best = 0;
    for (index, item) in buffer.iter().enumerate().skip(1) {
        if item.priority() > buffer[best].priority() {
            best = index;
        }
    }
    best
}

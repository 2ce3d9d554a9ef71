//! Bookkeeping for the delayed callbacks that drive the chat.
//!
//! Every handle put into a [`TimerSet`] is cancelled either explicitly or
//! when the set is dropped, so no callback can outlive the page that
//! scheduled it.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

use super::sequencer::PendingAdvance;

/// A scheduled callback that can be called off.
pub trait Cancel {
    fn cancel(self);
}

impl Cancel for Timeout {
    fn cancel(self) {
        // Returns the closure that would have run; dropping it is enough.
        let _ = Timeout::cancel(self);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

pub struct TimerSet<H: Cancel> {
    handles: Vec<(TimerId, H)>,
    next_id: u64,
}

impl<H: Cancel> TimerSet<H> {
    pub fn new() -> Self {
        TimerSet {
            handles: Vec::new(),
            next_id: 0,
        }
    }

    pub fn insert(&mut self, handle: H) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.handles.push((id, handle));
        id
    }

    /// Cancels one timer. Returns false if it was already gone.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.handles.iter().position(|(i, _)| *i == id) {
            Some(pos) => {
                let (_, handle) = self.handles.remove(pos);
                handle.cancel();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        if !self.is_empty() {
            log::debug!("cancelling {} pending timer(s)", self.len());
        }
        for (_, handle) in self.handles.drain(..) {
            handle.cancel();
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl<H: Cancel> Default for TimerSet<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Cancel> Drop for TimerSet<H> {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Arms one timer for `pending`, if any. The returned closure cancels it and
/// is meant to run when `pending` changes or the owner goes away.
pub fn arm_pending<H, F>(
    timers: Rc<RefCell<TimerSet<H>>>,
    pending: Option<PendingAdvance>,
    schedule: F,
) -> impl FnOnce() + 'static
where
    H: Cancel + 'static,
    F: FnOnce(PendingAdvance) -> H + 'static,
{
    let armed = pending.map(|p| {
        let handle = schedule(p);
        timers.borrow_mut().insert(handle)
    });
    move || {
        if let Some(id) = armed {
            timers.borrow_mut().cancel(id);
        }
    }
}

/// Teardown for the whole set.
pub fn disarm_all<H: Cancel + 'static>(timers: Rc<RefCell<TimerSet<H>>>) -> impl FnOnce() + 'static {
    move || timers.borrow_mut().cancel_all()
}

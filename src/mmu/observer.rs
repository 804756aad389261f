//! Trace points emitted by the access path.
//!
//! An [`Mmu`](crate::mmu::Mmu) reports what it does to an
//! [`AccessObserver`] while its debug toggle is on. Observers never feed
//! back into replacement decisions or counters.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::common::{AccessKind, FrameId, PageId};

/// Something observable that happened during one access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessEvent {
    /// The page was already resident.
    Hit {
        kind: AccessKind,
        page: PageId,
        frame: FrameId,
    },
    /// The page was not resident.
    Fault { kind: AccessKind, page: PageId },
    /// A faulting page was installed in a frame.
    Load {
        page: PageId,
        frame: FrameId,
        dirty: bool,
    },
    /// A resident page was removed to make room.
    Evict {
        page: PageId,
        frame: FrameId,
        dirty: bool,
    },
    /// An evicted dirty page was written back to disk.
    WriteBack { page: PageId, frame: FrameId },
}

impl fmt::Display for AccessEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessEvent::Hit { kind, page, frame } => {
                write!(f, "{} hit: {} in {}", kind, page, frame)
            }
            AccessEvent::Fault { kind, page } => write!(f, "{} fault: {}", kind, page),
            AccessEvent::Load { page, frame, dirty } => {
                write!(f, "loaded {} into {} (dirty: {})", page, frame, dirty)
            }
            AccessEvent::Evict { page, frame, dirty } => {
                write!(f, "evicted {} from {} (dirty: {})", page, frame, dirty)
            }
            AccessEvent::WriteBack { page, frame } => {
                write!(f, "writing dirty {} to disk from {}", page, frame)
            }
        }
    }
}

/// Receives trace events from an engine.
pub trait AccessObserver {
    fn observe(&mut self, event: &AccessEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl AccessObserver for NoopObserver {
    fn observe(&mut self, _event: &AccessEvent) {}
}

/// Logs every event at `debug` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl AccessObserver for LogObserver {
    fn observe(&mut self, event: &AccessEvent) {
        debug!("{}", event);
    }
}

/// Collects events into a list shared with the caller.
///
/// # Example
/// ```
/// use vmsim::mmu::{AccessEvent, RecordingObserver};
/// use vmsim::{Algorithm, Mmu, PageId};
///
/// let recorder = RecordingObserver::new();
/// let mut mmu = Mmu::with_algorithm(Algorithm::Clock, 1)
///     .unwrap()
///     .with_observer(Box::new(recorder.clone()));
/// mmu.set_debug();
/// mmu.read_memory(PageId::new(3));
///
/// assert!(matches!(recorder.events()[0], AccessEvent::Fault { .. }));
/// ```
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    events: Rc<RefCell<Vec<AccessEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every event seen so far.
    pub fn events(&self) -> Vec<AccessEvent> {
        self.events.borrow().clone()
    }

    /// Pages evicted so far, in order.
    pub fn evicted(&self) -> Vec<PageId> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                AccessEvent::Evict { page, .. } => Some(*page),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl AccessObserver for RecordingObserver {
    fn observe(&mut self, event: &AccessEvent) {
        self.events.borrow_mut().push(*event);
    }
}

//! Data-set change notifications.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// What happened to an adapter's data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataSetEvent {
    /// Row content changed; positions and grouping are still valid.
    Changed,
    /// The data may have changed shape; anything derived from it is stale.
    Invalidated,
}

/// Handle returned by [`DataSetObservable::register`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

pub type DataSetCallback = Rc<dyn Fn(DataSetEvent)>;

/// A list of change callbacks. Adapters embed one and expose it through
/// their `register_observer` / `unregister_observer` methods.
pub struct DataSetObservable {
    callbacks: RefCell<Vec<(ObserverId, DataSetCallback)>>,
    next_callback_id: Cell<u64>,
}

impl DataSetObservable {
    pub fn new() -> Self {
        Self {
            callbacks: RefCell::new(Vec::new()),
            next_callback_id: Cell::new(1),
        }
    }

    /// Adds a callback.
    pub fn register(&self, callback: DataSetCallback) -> ObserverId {
        let id = ObserverId(self.next_callback_id.get());
        self.next_callback_id.set(id.0 + 1);
        self.callbacks.borrow_mut().push((id, callback));
        id
    }

    /// Removes a callback. Unknown ids are ignored.
    pub fn unregister(&self, id: ObserverId) {
        self.callbacks.borrow_mut().retain(|(cb_id, _)| *cb_id != id);
    }

    pub fn observer_count(&self) -> usize {
        self.callbacks.borrow().len()
    }

    pub fn notify_changed(&self) {
        self.notify(DataSetEvent::Changed);
    }

    pub fn notify_invalidated(&self) {
        self.notify(DataSetEvent::Invalidated);
    }

    pub fn notify(&self, event: DataSetEvent) {
        // Snapshot so callbacks may register or unregister while we iterate.
        let callbacks: Vec<DataSetCallback> = self
            .callbacks
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in callbacks {
            callback(event);
        }
    }
}

impl Default for DataSetObservable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DataSetObservable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSetObservable")
            .field("observers", &self.observer_count())
            .finish()
    }
}

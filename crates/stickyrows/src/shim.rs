//! Grouped adapter shim.
//!
//! Wraps a [`GroupedAdapter`] and serves [`RowCompositor`]s to the hosting
//! list. Per row it decides whether the row opens a group, moves headers in
//! and out of a [`HeaderCache`] independently of the list's row recycling,
//! and keeps the row shell's variant in line with the item it hosts.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use stickyrows_ui_layout::Visibility;

use crate::adapter::{GroupedAdapter, HeaderSource, ListAdapter, OnHeaderClick};
use crate::compositor::{Divider, RowCompositor, RowVariant};
use crate::error::RowError;
use crate::header_cache::{HeaderCache, HeaderCachePolicy};
use crate::observer::{DataSetCallback, DataSetEvent, DataSetObservable, ObserverId};
use crate::view::{ClickHandler, ViewHandle, ViewParent};

#[derive(Default)]
struct HeaderClickSlot {
    listener: RefCell<Option<Box<dyn OnHeaderClick>>>,
    /// Bumped on every replace, clears included.
    generation: Cell<u64>,
}

/// Counters describing how rows were bound.
///
/// Used for testing and debugging header reuse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShimStats {
    /// Headers the delegate built instead of rebinding the offered one.
    pub headers_created: usize,

    /// Headers that stayed on the row they were already attached to.
    pub headers_reused_in_place: usize,

    /// Headers taken from the free-list and accepted by the delegate.
    pub headers_reused_from_cache: usize,

    /// Headers detached from rows and parked in the free-list.
    pub headers_recycled: usize,

    /// Row shells built because the list offered none.
    pub compositors_created: usize,

    /// Row shells rebuilt because the item's checkable capability changed.
    pub compositors_rebuilt: usize,
}

/// Turns a [`GroupedAdapter`] into a [`ListAdapter`] of composite rows with
/// sticky-header support.
pub struct GroupedAdapterShim<A: GroupedAdapter + 'static> {
    delegate: Rc<A>,
    header_cache: Rc<RefCell<HeaderCache>>,
    observable: Rc<DataSetObservable>,
    delegate_observer: ObserverId,
    divider: Option<Divider>,
    header_click: Rc<HeaderClickSlot>,
    stats: Cell<ShimStats>,
}

impl<A: GroupedAdapter + 'static> GroupedAdapterShim<A> {
    /// Wraps `delegate` with an unbounded header free-list.
    pub fn new(delegate: Rc<A>) -> Self {
        Self::with_policy(delegate, HeaderCachePolicy::default())
    }

    /// Wraps `delegate`, parking detached headers according to `policy`.
    pub fn with_policy(delegate: Rc<A>, policy: HeaderCachePolicy) -> Self {
        let header_cache = Rc::new(RefCell::new(HeaderCache::with_policy(policy)));
        let observable = Rc::new(DataSetObservable::new());
        let delegate_observer = delegate.register_observer(forward_changes(
            Rc::downgrade(&header_cache),
            Rc::downgrade(&observable),
        ));
        Self {
            delegate,
            header_cache,
            observable,
            delegate_observer,
            divider: None,
            header_click: Rc::new(HeaderClickSlot::default()),
            stats: Cell::new(ShimStats::default()),
        }
    }

    pub fn delegate(&self) -> &Rc<A> {
        &self.delegate
    }

    /// True when the row at `position` opens a group: it is the first row,
    /// or its group key differs from the row above.
    pub fn needs_header(&self, position: usize) -> bool {
        position == 0
            || self.delegate.header_id(position) != self.delegate.header_id(position - 1)
    }

    /// Sets the divider painted above rows without a header and asks
    /// observers to re-measure everything.
    pub fn set_divider(&mut self, divider: Option<Divider>) {
        self.divider = divider;
        self.observable.notify_changed();
    }

    pub fn divider(&self) -> Option<&Divider> {
        self.divider.as_ref()
    }

    /// Replaces the header click listener. `None` clears it; clicks with no
    /// listener do nothing. A replace made from inside the running listener
    /// wins over that listener.
    pub fn set_on_header_click_listener(&self, listener: Option<Box<dyn OnHeaderClick>>) {
        let slot = &self.header_click;
        slot.generation.set(slot.generation.get().wrapping_add(1));
        let previous = slot.listener.replace(listener);
        drop(previous);
    }

    /// Closure form of [`set_on_header_click_listener`](Self::set_on_header_click_listener).
    pub fn on_header_click<F>(&self, listener: F)
    where
        F: FnMut(&ViewHandle, usize, u64) + 'static,
    {
        self.set_on_header_click_listener(Some(Box::new(listener)));
    }

    /// Number of headers waiting in the free-list.
    pub fn cached_header_count(&self) -> usize {
        self.header_cache.borrow().len()
    }

    /// Snapshot of the free-list, oldest first.
    pub fn cached_headers(&self) -> Vec<ViewHandle> {
        self.header_cache.borrow().iter().cloned().collect()
    }

    pub fn stats(&self) -> ShimStats {
        self.stats.get()
    }

    pub fn reset_stats(&self) {
        self.stats.set(ShimStats::default());
    }

    fn record(&self, update: impl FnOnce(&mut ShimStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        self.stats.set(stats);
    }

    /// Parks the row's header, if it has one. A parked header may have been
    /// hidden by the overlay, so it goes back visible.
    fn recycle_header_if_exists(&self, row: &mut RowCompositor) {
        let Some(header) = row.detach_header() else {
            return;
        };
        header.set_visibility(Visibility::Visible);
        let mut cache = self.header_cache.borrow_mut();
        if cache.push(header) {
            self.record(|stats| stats.headers_recycled += 1);
        }
        log::debug!("cache header: size={}", cache.len());
    }

    fn pop_header(&self) -> Option<ViewHandle> {
        let header = self.header_cache.borrow_mut().pop();
        log::debug!("pop header: hit={}", header.is_some());
        header
    }

    /// Header for a row that opens a group: the row's own header, else the
    /// oldest parked one, rebound by the delegate.
    fn configure_header(&self, row: &RowCompositor, position: usize) -> Result<ViewHandle, RowError> {
        let (candidate, in_place) = match row.header() {
            Some(own) => (Some(own.clone()), true),
            None => (self.pop_header(), false),
        };

        let Some(header) = self
            .delegate
            .header_view(position, candidate.clone(), ViewParent::Row(row))
        else {
            if let Some(parked) = candidate.filter(|_| !in_place) {
                self.header_cache.borrow_mut().restore(parked);
            }
            return Err(RowError::MissingHeaderView { position });
        };

        match candidate {
            Some(candidate) if candidate.ptr_eq(&header) => {
                if in_place {
                    self.record(|stats| stats.headers_reused_in_place += 1);
                } else {
                    self.record(|stats| stats.headers_reused_from_cache += 1);
                }
            }
            _ => self.record(|stats| stats.headers_created += 1),
        }

        header.set_click_handler(Some(self.header_click_handler(position)));
        Ok(header)
    }

    /// The group key is looked up when the click lands, not at bind time:
    /// the data may have changed since.
    fn header_click_handler(&self, position: usize) -> ClickHandler {
        let delegate = Rc::downgrade(&self.delegate);
        let slot = Rc::downgrade(&self.header_click);
        Rc::new(move |header: &ViewHandle| {
            let (Some(delegate), Some(slot)) = (delegate.upgrade(), slot.upgrade()) else {
                return;
            };
            if position >= delegate.count() {
                return;
            }
            // while it runs the listener is out of its slot, so a click
            // raised from inside the callback is not delivered
            let Some(mut listener) = slot.listener.take() else {
                return;
            };
            let generation = slot.generation.get();
            let header_id = delegate.header_id(position);
            listener.on_header_click(header, position, header_id);
            if slot.generation.get() == generation {
                slot.listener.replace(Some(listener));
            }
        })
    }
}

/// Observer installed on the delegate: invalidation drops parked headers,
/// every event is passed on to our own observers.
fn forward_changes(
    header_cache: Weak<RefCell<HeaderCache>>,
    observable: Weak<DataSetObservable>,
) -> DataSetCallback {
    Rc::new(move |event| {
        if event == DataSetEvent::Invalidated {
            if let Some(cache) = header_cache.upgrade() {
                let mut cache = cache.borrow_mut();
                log::debug!("data set invalidated: dropping {} cached headers", cache.len());
                cache.clear();
            }
        }
        if let Some(observable) = observable.upgrade() {
            observable.notify(event);
        }
    })
}

impl<A: GroupedAdapter + 'static> ListAdapter for GroupedAdapterShim<A> {
    type Item = A::Item;

    fn count(&self) -> usize {
        self.delegate.count()
    }

    fn item(&self, position: usize) -> Option<Self::Item> {
        self.delegate.item(position)
    }

    fn item_id(&self, position: usize) -> u64 {
        self.delegate.item_id(position)
    }

    fn has_stable_ids(&self) -> bool {
        self.delegate.has_stable_ids()
    }

    fn is_enabled(&self, position: usize) -> bool {
        self.delegate.is_enabled(position)
    }

    fn are_all_items_enabled(&self) -> bool {
        self.delegate.are_all_items_enabled()
    }

    fn item_view_type(&self, position: usize) -> usize {
        self.delegate.item_view_type(position)
    }

    fn view_type_count(&self) -> usize {
        self.delegate.view_type_count()
    }

    fn is_empty(&self) -> bool {
        self.delegate.is_empty()
    }

    fn row_view(
        &self,
        position: usize,
        recycled: Option<RowCompositor>,
        parent: ViewParent<'_>,
    ) -> Result<RowCompositor, RowError> {
        let previous_item = recycled.as_ref().and_then(|row| row.item().cloned());
        let item = self
            .delegate
            .row_view(position, previous_item, parent)
            .ok_or(RowError::MissingItemView { position })?;
        let variant = RowVariant::of(&item);

        let mut row = match recycled {
            Some(row) => row,
            None => {
                self.record(|stats| stats.compositors_created += 1);
                RowCompositor::new(variant)
            }
        };

        let header = if self.needs_header(position) {
            Some(self.configure_header(&row, position)?)
        } else {
            self.recycle_header_if_exists(&mut row);
            None
        };

        if row.variant() != variant {
            row.clear();
            row = RowCompositor::new(variant);
            self.record(|stats| stats.compositors_rebuilt += 1);
        }

        log::trace!(
            "bind row {position}: header={} variant={variant:?} cached_headers={}",
            header.is_some(),
            self.cached_header_count()
        );
        row.update(item, header, self.divider.clone());
        Ok(row)
    }

    fn register_observer(&self, callback: DataSetCallback) -> ObserverId {
        self.observable.register(callback)
    }

    fn unregister_observer(&self, id: ObserverId) {
        self.observable.unregister(id);
    }
}

impl<A: GroupedAdapter + 'static> HeaderSource for GroupedAdapterShim<A> {
    fn header_id(&self, position: usize) -> u64 {
        self.delegate.header_id(position)
    }

    fn header_view(
        &self,
        position: usize,
        recycled: Option<ViewHandle>,
        parent: ViewParent<'_>,
    ) -> Option<ViewHandle> {
        self.delegate.header_view(position, recycled, parent)
    }
}

impl<A: GroupedAdapter + 'static> Drop for GroupedAdapterShim<A> {
    fn drop(&mut self) {
        self.delegate.unregister_observer(self.delegate_observer);
    }
}

impl<A: GroupedAdapter + 'static> fmt::Debug for GroupedAdapterShim<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupedAdapterShim")
            .field("count", &self.delegate.count())
            .field("cached_headers", &self.cached_header_count())
            .field("divider", &self.divider)
            .field("has_header_click_listener", &self.header_click.listener.borrow().is_some())
            .field("stats", &self.stats.get())
            .finish()
    }
}

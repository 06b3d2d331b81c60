use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use stickyrows::{DataSetEvent, ListAdapter, ObserverId, RowCompositor, RowError, ViewHandle, ViewParent};
use stickyrows_ui_layout::Constraints;

/// A row currently on screen.
#[derive(Debug)]
pub struct BoundRow {
    pub position: usize,
    pub view_type: usize,
    /// Offset of the row's top edge from the top of the viewport.
    pub top: f32,
    pub row: RowCompositor,
}

/// Minimal hosting list: fills a viewport with rows from a [`ListAdapter`],
/// scrapping and reusing rows per view type the way a recycling list does.
pub struct ListHarness<L: ListAdapter> {
    adapter: L,
    width: f32,
    viewport_height: f32,
    first_position: usize,
    first_offset: f32,
    rows: Vec<BoundRow>,
    scrap: FxHashMap<usize, Vec<RowCompositor>>,
    events: Rc<RefCell<Vec<DataSetEvent>>>,
    observer: ObserverId,
}

impl<L: ListAdapter> ListHarness<L> {
    pub fn new(adapter: L, width: f32, viewport_height: f32) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let observer = adapter.register_observer(Rc::new(move |event| sink.borrow_mut().push(event)));
        Self {
            adapter,
            width,
            viewport_height,
            first_position: 0,
            first_offset: 0.0,
            rows: Vec::new(),
            scrap: FxHashMap::default(),
            events,
            observer,
        }
    }

    pub fn adapter(&self) -> &L {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut L {
        &mut self.adapter
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn first_position(&self) -> usize {
        self.first_position
    }

    /// Scraps every visible row, then binds rows from `first_position` down
    /// until the viewport is full or the data runs out.
    pub fn layout_from(&mut self, first_position: usize) -> Result<(), RowError> {
        self.layout_at(first_position, 0.0)
    }

    /// Like [`layout_from`](Self::layout_from), with the first row scrolled
    /// `offset` pixels above the viewport's top edge.
    pub fn layout_at(&mut self, first_position: usize, offset: f32) -> Result<(), RowError> {
        self.scrap_all();
        self.first_position = first_position;
        self.first_offset = offset;

        let count = self.adapter.count();
        let row_constraints = Constraints::fixed_width(self.width);
        let mut position = first_position;
        let mut top = -offset;
        while position < count && top < self.viewport_height {
            let view_type = self.adapter.item_view_type(position);
            let recycled = self.scrap.get_mut(&view_type).and_then(Vec::pop);
            let mut row = self
                .adapter
                .row_view(position, recycled, ViewParent::list(self.width))?;
            let size = row.measure(row_constraints);
            row.layout(size);
            row.take_dirty();
            self.rows.push(BoundRow {
                position,
                view_type,
                top,
                row,
            });
            top += size.height;
            position += 1;
        }
        log::trace!(
            "laid out rows {first_position}..{position}, scrap={}",
            self.scrap_count()
        );
        Ok(())
    }

    /// Rebinds the current window, as a list does after a change event.
    pub fn relayout(&mut self) -> Result<(), RowError> {
        self.layout_at(self.first_position, self.first_offset)
    }

    pub fn rows(&self) -> &[BoundRow] {
        &self.rows
    }

    pub fn row_at(&self, position: usize) -> Option<&RowCompositor> {
        self.bound(position).map(|bound| &bound.row)
    }

    pub fn row_at_mut(&mut self, position: usize) -> Option<&mut RowCompositor> {
        self.rows
            .iter_mut()
            .find(|bound| bound.position == position)
            .map(|bound| &mut bound.row)
    }

    pub fn bound(&self, position: usize) -> Option<&BoundRow> {
        self.rows.iter().find(|bound| bound.position == position)
    }

    pub fn visible_positions(&self) -> Vec<usize> {
        self.rows.iter().map(|bound| bound.position).collect()
    }

    pub fn scrap_count(&self) -> usize {
        self.scrap.values().map(Vec::len).sum()
    }

    /// Headers held by any row the harness owns, on screen or scrapped.
    pub fn attached_headers(&self) -> Vec<ViewHandle> {
        self.rows
            .iter()
            .map(|bound| &bound.row)
            .chain(self.scrap.values().flatten())
            .filter_map(|row| row.header().cloned())
            .collect()
    }

    /// Events received from the adapter since the last call.
    pub fn take_events(&self) -> Vec<DataSetEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// How far the floating header is pushed up by the next group's header
    /// row. Zero while no header row overlaps it, negative once one does.
    ///
    /// The floating copy is as tall as the incoming row's header band, which
    /// ends where that row's item starts.
    pub fn floating_header_offset(&self) -> f32 {
        self.rows
            .iter()
            .skip(1)
            .find(|bound| bound.row.has_header())
            .map_or(0.0, |next| {
                let band = next.row.item_top();
                (next.top - band).min(0.0)
            })
    }

    fn scrap_all(&mut self) {
        for bound in self.rows.drain(..) {
            self.scrap.entry(bound.view_type).or_default().push(bound.row);
        }
    }
}

impl<L: ListAdapter> Drop for ListHarness<L> {
    fn drop(&mut self) {
        self.adapter.unregister_observer(self.observer);
    }
}

//! A pixel-scrolled window over a [`ListAdapter`] with a pinned header.

use std::cell::Cell;
use std::rc::Rc;

use stickyrows::prelude::*;

pub struct VisibleRow {
    pub position: usize,
    pub top: f32,
    pub row: RowCompositor,
}

/// The header pinned at the top of the viewport.
pub struct PinnedHeader {
    pub position: usize,
    pub view: ViewHandle,
    /// Zero, or negative while the next group's header pushes it out.
    pub offset: f32,
}

pub struct Viewport<L: ListAdapter + HeaderSource> {
    adapter: L,
    width: f32,
    height: f32,
    first_position: usize,
    /// How far the first row is scrolled above the top edge.
    first_offset: f32,
    rows: Vec<VisibleRow>,
    scrap: Vec<RowCompositor>,
    pinned: Option<PinnedHeader>,
    data_dirty: Rc<Cell<bool>>,
    observer: ObserverId,
}

impl<L: ListAdapter + HeaderSource> Viewport<L> {
    pub fn new(adapter: L, width: f32, height: f32) -> Self {
        let data_dirty = Rc::new(Cell::new(false));
        let flag = Rc::clone(&data_dirty);
        let observer = adapter.register_observer(Rc::new(move |event| {
            log::debug!("viewport saw {event:?}");
            flag.set(true);
        }));
        Self {
            adapter,
            width,
            height,
            first_position: 0,
            first_offset: 0.0,
            rows: Vec::new(),
            scrap: Vec::new(),
            pinned: None,
            data_dirty,
            observer,
        }
    }

    pub fn adapter(&self) -> &L {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut L {
        &mut self.adapter
    }

    pub fn rows(&self) -> &[VisibleRow] {
        &self.rows
    }

    pub fn pinned(&self) -> Option<&PinnedHeader> {
        self.pinned.as_ref()
    }

    /// True once since the adapter last reported a change.
    pub fn take_data_dirty(&self) -> bool {
        self.data_dirty.replace(false)
    }

    pub fn scroll_by(&mut self, dy: f32) -> Result<(), RowError> {
        self.first_offset = (self.first_offset + dy).max(0.0);
        self.fill()
    }

    /// Rebinds every visible row from the current scroll position.
    pub fn fill(&mut self) -> Result<(), RowError> {
        self.scrap.extend(self.rows.drain(..).map(|visible| visible.row));
        let count = self.adapter.count();
        if count == 0 {
            self.pinned = None;
            return Ok(());
        }
        self.first_position = self.first_position.min(count - 1);

        let mut position = self.first_position;
        let mut top = -self.first_offset;
        while position < count && top < self.height {
            let row = self.bind(position)?;
            let height = row.size().height;
            if top + height <= 0.0 && position + 1 < count {
                // scrolled past; the next row becomes the first
                self.first_position += 1;
                self.first_offset -= height;
                self.scrap.push(row);
            } else {
                self.rows.push(VisibleRow { position, top, row });
            }
            top += height;
            position += 1;
        }

        self.pin_header()
    }

    pub fn click_first_header(&self) -> bool {
        self.rows
            .iter()
            .find_map(|visible| visible.row.header())
            .is_some_and(ViewHandle::perform_click)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        for visible in &self.rows {
            visible.row.draw(canvas);
        }
        if let Some(pinned) = &self.pinned {
            pinned.view.draw(canvas);
        }
    }

    fn bind(&mut self, position: usize) -> Result<RowCompositor, RowError> {
        let recycled = self.scrap.pop();
        let mut row = self
            .adapter
            .row_view(position, recycled, ViewParent::list(self.width))?;
        let size = row.measure(Constraints::fixed_width(self.width));
        row.layout(size);
        row.take_dirty();
        Ok(row)
    }

    /// Pins the first row's group header. The in-list copy of a header that
    /// sits under the pinned one is hidden.
    fn pin_header(&mut self) -> Result<(), RowError> {
        for visible in &self.rows {
            if let Some(header) = visible.row.header() {
                header.set_visibility(Visibility::Visible);
            }
        }
        let Some(first) = self.rows.first() else {
            self.pinned = None;
            return Ok(());
        };
        let position = first.position;

        let recycled = self.pinned.take().map(|pinned| pinned.view);
        let view = self
            .adapter
            .header_view(position, recycled, ViewParent::list(self.width))
            .ok_or(RowError::MissingHeaderView { position })?;
        let size = view.measure(Constraints::fixed_width(self.width));

        // headers share one band height: the incoming header's band ends
        // where its row's item starts
        let offset = self
            .rows
            .iter()
            .skip(1)
            .find(|visible| visible.row.has_header())
            .map_or(0.0, |next| (next.top - next.row.item_top()).min(0.0));
        view.layout(Rect::new(0.0, offset, size.width, size.height));

        if let Some(header) = first.row.header() {
            header.set_visibility(Visibility::Invisible);
        }
        self.pinned = Some(PinnedHeader {
            position,
            view,
            offset,
        });
        Ok(())
    }
}

impl<L: ListAdapter + HeaderSource> Drop for Viewport<L> {
    fn drop(&mut self) {
        self.adapter.unregister_observer(self.observer);
    }
}

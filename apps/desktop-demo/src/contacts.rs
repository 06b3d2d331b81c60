//! Contact book grouped by initial.

use std::cell::RefCell;

use stickyrows::prelude::*;

pub const HEADER_HEIGHT: f32 = 28.0;
pub const ROW_HEIGHT: f32 = 44.0;

const HEADER_COLOR: Color = Color::from_rgb_u8(0x3f, 0x51, 0xb5);

#[derive(Clone, Debug)]
pub struct Contact {
    pub name: String,
    /// Starred contacts render as selectable rows.
    pub starred: bool,
}

impl Contact {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            starred: false,
        }
    }

    pub fn starred(mut self) -> Self {
        self.starred = true;
        self
    }

    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .map_or('#', |initial| initial.to_ascii_uppercase())
    }
}

pub struct ContactsAdapter {
    contacts: RefCell<Vec<Contact>>,
    observable: DataSetObservable,
}

impl ContactsAdapter {
    pub fn new(mut contacts: Vec<Contact>) -> Self {
        contacts.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            contacts: RefCell::new(contacts),
            observable: DataSetObservable::new(),
        }
    }

    /// Inserts in name order. Grouping may shift, so observers are told the
    /// data is invalid rather than merely changed.
    pub fn add(&self, contact: Contact) {
        {
            let mut contacts = self.contacts.borrow_mut();
            let index = contacts.partition_point(|existing| existing.name < contact.name);
            contacts.insert(index, contact);
        }
        self.observable.notify_invalidated();
    }

    pub fn toggle_star(&self, position: usize) {
        if let Some(contact) = self.contacts.borrow_mut().get_mut(position) {
            contact.starred = !contact.starred;
        }
        self.observable.notify_changed();
    }

    fn initial_at(&self, position: usize) -> char {
        self.contacts
            .borrow()
            .get(position)
            .map_or('#', Contact::initial)
    }
}

impl HeaderSource for ContactsAdapter {
    fn header_id(&self, position: usize) -> u64 {
        u64::from(self.initial_at(position))
    }

    fn header_view(
        &self,
        position: usize,
        recycled: Option<ViewHandle>,
        _parent: ViewParent<'_>,
    ) -> Option<ViewHandle> {
        let title = self.initial_at(position).to_string();
        if let Some(header) = recycled {
            if header
                .with_view(|leaf: &mut LeafView| leaf.set_text(title.as_str()))
                .is_some()
            {
                return Some(header);
            }
        }
        Some(ViewHandle::new(
            LeafView::with_height(HEADER_HEIGHT)
                .background(HEADER_COLOR)
                .label(title),
        ))
    }
}

impl GroupedAdapter for ContactsAdapter {
    type Item = Contact;

    fn count(&self) -> usize {
        self.contacts.borrow().len()
    }

    fn item(&self, position: usize) -> Option<Contact> {
        self.contacts.borrow().get(position).cloned()
    }

    fn item_id(&self, position: usize) -> u64 {
        position as u64
    }

    fn row_view(
        &self,
        position: usize,
        recycled: Option<ViewHandle>,
        _parent: ViewParent<'_>,
    ) -> Option<ViewHandle> {
        let contact = self.item(position)?;

        // a leaf can't drop its checkable state, so only same-kind views
        // are rebound
        if let Some(view) = recycled.filter(|view| view.is_checkable() == contact.starred) {
            if view
                .with_view(|existing: &mut LeafView| existing.set_text(contact.name.as_str()))
                .is_some()
            {
                return Some(view);
            }
        }

        let mut leaf = LeafView::with_height(ROW_HEIGHT).label(contact.name);
        if contact.starred {
            leaf = leaf.checkable(false);
        }
        Some(ViewHandle::new(leaf))
    }

    fn register_observer(&self, callback: DataSetCallback) -> ObserverId {
        self.observable.register(callback)
    }

    fn unregister_observer(&self, id: ObserverId) {
        self.observable.unregister(id);
    }
}

pub fn sample_contacts() -> Vec<Contact> {
    [
        "Ada", "Alan", "Alonzo", "Barbara", "Bjarne", "Brian", "Claude", "Dennis", "Donald",
        "Edsger", "Frances", "Grace", "Guido", "Hedy", "John", "Ken", "Linus", "Margaret",
        "Niklaus", "Radia",
    ]
    .into_iter()
    .enumerate()
    .map(|(index, name)| {
        let contact = Contact::new(name);
        if index % 4 == 1 {
            contact.starred()
        } else {
            contact
        }
    })
    .collect()
}

//! Free-list of detached header views.
//!
//! The list's own recycling is keyed to whole rows, so a header that drops off
//! a row would otherwise be thrown away while another row is about to build
//! an identical one. Headers parked here are handed out oldest first.

use std::collections::VecDeque;

use crate::view::ViewHandle;

/// Policy for parking detached headers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderCachePolicy {
    /// Maximum number of parked headers. `None` means unbounded.
    pub max_cached: Option<usize>,

    /// Whether headers are parked at all.
    pub enabled: bool,
}

impl Default for HeaderCachePolicy {
    fn default() -> Self {
        Self {
            max_cached: None,
            enabled: true,
        }
    }
}

impl HeaderCachePolicy {
    /// Creates a policy that parks at most `max_cached` headers.
    pub fn new(max_cached: usize) -> Self {
        Self {
            max_cached: Some(max_cached),
            enabled: true,
        }
    }

    /// Disables parking; every detached header is dropped.
    pub fn disabled() -> Self {
        Self {
            max_cached: Some(0),
            enabled: false,
        }
    }

    fn admits(&self, len: usize) -> bool {
        self.enabled && self.max_cached.map_or(true, |max| len < max)
    }
}

/// FIFO pool of headers that are not attached to any row.
#[derive(Debug, Default)]
pub struct HeaderCache {
    headers: VecDeque<ViewHandle>,
    policy: HeaderCachePolicy,
}

impl HeaderCache {
    /// Creates an unbounded cache.
    pub fn new() -> Self {
        Self::with_policy(HeaderCachePolicy::default())
    }

    pub fn with_policy(policy: HeaderCachePolicy) -> Self {
        Self {
            headers: VecDeque::new(),
            policy,
        }
    }

    pub fn policy(&self) -> &HeaderCachePolicy {
        &self.policy
    }

    /// Parks a header at the back. Returns false if the policy refused it,
    /// in which case the header is dropped. Parking a header that is already
    /// parked is refused as well.
    pub fn push(&mut self, header: ViewHandle) -> bool {
        if !self.policy.admits(self.headers.len()) || self.contains(&header) {
            return false;
        }
        self.headers.push_back(header);
        true
    }

    /// Takes the oldest parked header.
    pub fn pop(&mut self) -> Option<ViewHandle> {
        self.headers.pop_front()
    }

    /// Puts a header taken by [`pop`](Self::pop) back at the front, so it is
    /// the next one handed out.
    pub fn restore(&mut self, header: ViewHandle) {
        if !self.contains(&header) {
            self.headers.push_front(header);
        }
    }

    pub fn contains(&self, header: &ViewHandle) -> bool {
        self.headers.iter().any(|parked| parked.ptr_eq(header))
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ViewHandle> {
        self.headers.iter()
    }

    /// Drops every parked header.
    pub fn clear(&mut self) {
        self.headers.clear();
    }
}

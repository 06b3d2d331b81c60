/// Integration tests for moving headers between rows and the free-list.
use std::cell::RefCell;
use std::rc::Rc;

use stickyrows::prelude::*;
use stickyrows::{HeaderCachePolicy, ShimStats};
use stickyrows_testing::prelude::*;

const WIDTH: f32 = 320.0;

fn shim_over(header_ids: &[u64]) -> GroupedAdapterShim<VecGroupedAdapter> {
    GroupedAdapterShim::new(Rc::new(VecGroupedAdapter::with_header_ids(header_ids)))
}

fn list() -> ViewParent<'static> {
    ViewParent::list(WIDTH)
}

#[test]
fn test_header_is_parked_when_row_stops_opening_a_group() {
    let shim = shim_over(&[1, 1, 1, 2, 2, 2]);

    let row = shim.row_view(0, None, list()).unwrap();
    let header = row.header().cloned().unwrap();

    let row = shim.row_view(2, Some(row), list()).unwrap();

    assert!(!row.has_header());
    assert!(!header.is_attached());
    assert_eq!(shim.cached_headers(), vec![header.clone()]);
    assert_eq!(inspect(&header, |view| view.detach_count()), 1);
    assert_eq!(shim.stats().headers_recycled, 1);
}

#[test]
fn test_parked_header_is_reused_by_next_group() {
    let shim = shim_over(&[1, 1, 1, 2, 2, 2]);

    let row = shim.row_view(0, None, list()).unwrap();
    let header = row.header().cloned().unwrap();
    let row = shim.row_view(1, Some(row), list()).unwrap();
    let row = shim.row_view(3, Some(row), list()).unwrap();

    assert_eq!(row.header(), Some(&header));
    assert!(header.is_attached());
    assert_eq!(label_of(&header), "group 2");
    assert_eq!(shim.cached_header_count(), 0);
    assert_eq!(shim.delegate().created_headers().len(), 1);
    assert_eq!(shim.stats().headers_reused_from_cache, 1);
}

#[test]
fn test_row_keeps_its_own_header_across_groups() {
    let shim = shim_over(&[1, 1, 2]);

    let row = shim.row_view(0, None, list()).unwrap();
    let header = row.header().cloned().unwrap();
    let row = shim.row_view(2, Some(row), list()).unwrap();

    assert_eq!(row.header(), Some(&header));
    assert_eq!(label_of(&header), "group 2");
    assert_eq!(inspect(&header, |view| view.attach_count()), 1);
    assert_eq!(shim.stats().headers_reused_in_place, 1);

    let last = shim.delegate().header_requests().pop().unwrap();
    assert_eq!(last.recycled, Some(header));
}

#[test]
fn test_parked_headers_are_handed_out_oldest_first() {
    let shim = shim_over(&[1, 1, 2, 2, 3, 3]);

    let first = shim.row_view(0, None, list()).unwrap();
    let second = shim.row_view(2, None, list()).unwrap();
    let h1 = first.header().cloned().unwrap();
    let h2 = second.header().cloned().unwrap();

    let _first = shim.row_view(1, Some(first), list()).unwrap();
    let _second = shim.row_view(3, Some(second), list()).unwrap();
    assert_eq!(shim.cached_headers(), vec![h1.clone(), h2.clone()]);

    let a = shim.row_view(0, None, list()).unwrap();
    let b = shim.row_view(4, None, list()).unwrap();
    assert_eq!(a.header(), Some(&h1));
    assert_eq!(b.header(), Some(&h2));
    assert_eq!(shim.cached_header_count(), 0);
}

#[test]
fn test_offered_header_declined_by_delegate_is_dropped() {
    let shim = shim_over(&[1, 1, 2]);

    let row = shim.row_view(0, None, list()).unwrap();
    let parked = row.header().cloned().unwrap();
    let _row = shim.row_view(1, Some(row), list()).unwrap();

    shim.delegate().set_reuse_views(false);
    let fresh = shim.row_view(2, None, list()).unwrap();

    assert_ne!(fresh.header(), Some(&parked));
    assert_eq!(shim.cached_header_count(), 0);
    assert_eq!(shim.stats().headers_created, 2);
}

#[test]
fn test_parked_header_survives_missing_header_view() {
    let shim = shim_over(&[1, 1, 2]);

    let row = shim.row_view(0, None, list()).unwrap();
    let parked = row.header().cloned().unwrap();
    let _row = shim.row_view(1, Some(row), list()).unwrap();
    assert_eq!(shim.cached_headers(), vec![parked.clone()]);

    shim.delegate().set_missing_header_at(Some(2));
    let err = shim.row_view(2, None, list()).unwrap_err();
    assert_eq!(err, RowError::MissingHeaderView { position: 2 });
    assert_eq!(shim.cached_headers(), vec![parked.clone()]);

    shim.delegate().set_missing_header_at(None);
    let row = shim.row_view(2, None, list()).unwrap();
    assert_eq!(row.header(), Some(&parked));
    assert_eq!(shim.cached_header_count(), 0);
}

#[test]
fn test_parked_header_comes_back_visible() {
    let shim = shim_over(&[1, 1]);

    let row = shim.row_view(0, None, list()).unwrap();
    let header = row.header().cloned().unwrap();
    // the floating overlay hides the in-list copy of the pinned header
    header.set_visibility(Visibility::Invisible);

    let _row = shim.row_view(1, Some(row), list()).unwrap();
    assert_eq!(header.visibility(), Visibility::Visible);
}

#[test]
fn test_invalidation_drops_parked_headers() {
    let shim = shim_over(&[1, 1]);
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    shim.register_observer(Rc::new(move |event| sink.borrow_mut().push(event)));

    let row = shim.row_view(0, None, list()).unwrap();
    let _row = shim.row_view(1, Some(row), list()).unwrap();
    assert_eq!(shim.cached_header_count(), 1);

    shim.delegate().notify_changed();
    assert_eq!(shim.cached_header_count(), 1);

    shim.delegate().notify_invalidated();
    assert_eq!(shim.cached_header_count(), 0);

    assert_eq!(
        *events.borrow(),
        vec![DataSetEvent::Changed, DataSetEvent::Invalidated]
    );
}

#[test]
fn test_unregistered_observer_hears_nothing() {
    let shim = shim_over(&[1]);
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let id = shim.register_observer(Rc::new(move |event| sink.borrow_mut().push(event)));

    shim.unregister_observer(id);
    shim.delegate().notify_changed();
    assert!(events.borrow().is_empty());
}

#[test]
fn test_disabled_policy_parks_nothing() {
    let adapter = Rc::new(VecGroupedAdapter::with_header_ids(&[1, 1, 2]));
    let shim = GroupedAdapterShim::with_policy(adapter, HeaderCachePolicy::disabled());

    let row = shim.row_view(0, None, list()).unwrap();
    let header = row.header().cloned().unwrap();
    let row = shim.row_view(1, Some(row), list()).unwrap();

    assert!(!row.has_header());
    assert!(!header.is_attached());
    assert_eq!(shim.cached_header_count(), 0);
    assert_eq!(shim.stats().headers_recycled, 0);
}

#[test]
fn test_bounded_policy_keeps_oldest_headers() {
    let adapter = Rc::new(VecGroupedAdapter::with_header_ids(&[1, 1, 2, 2]));
    let shim = GroupedAdapterShim::with_policy(adapter, HeaderCachePolicy::new(1));

    let first = shim.row_view(0, None, list()).unwrap();
    let second = shim.row_view(2, None, list()).unwrap();
    let h1 = first.header().cloned().unwrap();

    let _first = shim.row_view(1, Some(first), list()).unwrap();
    let _second = shim.row_view(3, Some(second), list()).unwrap();

    assert_eq!(shim.cached_headers(), vec![h1]);
    assert_eq!(shim.stats().headers_recycled, 1);
}

#[test]
fn test_scrolling_keeps_cache_and_rows_disjoint() {
    let ids: [u64; 16] = [1, 1, 1, 2, 2, 3, 4, 4, 4, 4, 5, 6, 6, 7, 7, 7];
    let adapter = VecGroupedAdapter::with_header_ids(&ids);
    let shim = GroupedAdapterShim::new(Rc::new(adapter));
    let mut harness = ListHarness::new(shim, WIDTH, 200.0);

    let scroll: Vec<usize> = (0..ids.len()).chain((0..ids.len()).rev()).collect();
    for first in scroll {
        harness.layout_from(first).unwrap();

        let shim = harness.adapter();
        let cached = shim.cached_headers();
        let attached = harness.attached_headers();

        for header in &cached {
            assert!(!header.is_attached());
            assert!(!attached.contains(header));
        }
        for (index, header) in attached.iter().enumerate() {
            assert!(header.is_attached());
            assert!(!attached[index + 1..].contains(header));
        }
        for bound in harness.rows() {
            assert_eq!(bound.row.has_header(), shim.needs_header(bound.position));
            if let Some(header) = bound.row.header() {
                let expected = format!("group {}", shim.header_id(bound.position));
                assert_eq!(label_of(header), expected);
            }
        }
    }

    // a handful of headers covers the whole scroll
    let created = harness.adapter().delegate().created_headers().len();
    assert!(created <= 8, "created {created} headers");
}

#[test]
fn test_stats_after_scroll_account_for_every_header_bind() {
    let adapter = VecGroupedAdapter::with_header_ids(&[1, 1, 2, 2, 3, 3]);
    let shim = GroupedAdapterShim::new(Rc::new(adapter));
    let mut harness = ListHarness::new(shim, WIDTH, 1000.0);

    harness.layout_from(0).unwrap();
    harness.relayout().unwrap();

    let ShimStats {
        headers_created,
        headers_reused_in_place,
        headers_reused_from_cache,
        ..
    } = harness.adapter().stats();
    // three group starts bound twice
    assert_eq!(
        headers_created + headers_reused_in_place + headers_reused_from_cache,
        6
    );
    assert_eq!(
        headers_created,
        harness.adapter().delegate().created_headers().len()
    );
}

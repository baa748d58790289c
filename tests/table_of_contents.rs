//! End-to-end behavior of a mounted table of contents.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::signal;
use spark_toc::dom::arrays::{peek_link_state, peek_sidebar_height, peek_sidebar_lock};
use spark_toc::{
    AnchorList, ElementProps, LinkState, Main, Sidebar, Source, TableOfContentsState, TocConfig,
    Viewport, create_element, mount_table_of_contents, mount_table_of_contents_with,
};

use common::{CountingBackend, Inputs, link, page, record, toc_page};

fn above(state: &TableOfContentsState) -> (Sidebar, AnchorList) {
    match state {
        TableOfContentsState::AboveTablet { sidebar, anchors } => (*sidebar, anchors.clone()),
        TableOfContentsState::BelowTablet => panic!("expected AboveTablet, got BelowTablet"),
    }
}

#[test]
fn above_tablet_emits_one_combined_state() {
    let page = page();
    let inputs = Inputs::new(true);
    let (backend, calls) = CountingBackend::new();
    let toc = mount_table_of_contents_with(signal(Some(page.toc)), inputs.options(), backend);

    let (seen, _seen_sub) = record(&toc);
    assert_eq!(seen.borrow().len(), 1);

    let (sidebar, anchors) = above(&seen.borrow()[0]);
    assert_eq!(sidebar, Sidebar { height: 776.0, lock: false });
    assert!(anchors.prev.is_empty());
    assert_eq!(anchors.next.len(), 3);

    assert_eq!(calls.get_elements.get(), 1);
    assert_eq!(calls.watch_sidebar.get(), 1);
    assert_eq!(calls.watch_anchor_list.get(), 1);
    assert_eq!(calls.painted_links.borrow()[0], page.links);

    assert_eq!(peek_sidebar_height(page.toc), Some(776.0));
}

#[test]
fn below_tablet_emits_once_and_derives_nothing() {
    let page = page();
    let inputs = Inputs::new(false);
    let (backend, calls) = CountingBackend::new();
    let toc = mount_table_of_contents_with(signal(Some(page.toc)), inputs.options(), backend);

    let (seen, _seen_sub) = record(&toc);
    assert_eq!(*seen.borrow(), vec![TableOfContentsState::BelowTablet]);

    inputs.scroll_to(1300.0);
    assert_eq!(seen.borrow().len(), 1);

    assert_eq!(calls.get_elements.get(), 0);
    assert_eq!(calls.watch_sidebar.get(), 0);
    assert_eq!(calls.watch_anchor_list.get(), 0);
    assert_eq!(peek_sidebar_height(page.toc), None);
}

#[test]
fn breakpoint_round_trip_builds_a_fresh_pipeline() {
    let page = page();
    let inputs = Inputs::new(true);
    let (backend, calls) = CountingBackend::new();
    let toc = mount_table_of_contents_with(signal(Some(page.toc)), inputs.options(), backend);
    let (seen, _seen_sub) = record(&toc);

    inputs.tablet.set(false);
    assert_eq!(seen.borrow().len(), 2);
    assert_eq!(seen.borrow()[1], TableOfContentsState::BelowTablet);

    // Geometry changes below the breakpoint are not observed
    inputs.main.set(Main { offset: 200.0, height: 600.0, active: false });
    inputs.scroll_to(1300.0);
    assert_eq!(seen.borrow().len(), 2);

    inputs.tablet.set(true);
    assert_eq!(seen.borrow().len(), 3);

    let (sidebar, anchors) = above(&seen.borrow()[2]);
    assert_eq!(sidebar, Sidebar { height: 600.0, lock: true });
    assert_eq!(anchors.prev, vec![vec![page.links[0]], vec![page.links[1]]]);
    assert!(anchors.next.is_empty());
    assert_eq!(anchors.active(), Some(page.links[1]));

    assert_eq!(calls.get_elements.get(), 2);
    assert_eq!(calls.watch_sidebar.get(), 2);
    assert_eq!(calls.watch_anchor_list.get(), 2);
}

#[test]
fn repeated_breakpoint_value_does_not_reemit() {
    let page = page();
    let inputs = Inputs::new(false);
    let toc =
        mount_table_of_contents(signal(Some(page.toc)), inputs.options(), &TocConfig::default())
            .unwrap();
    let (seen, _seen_sub) = record(&toc);

    inputs.tablet.set(false);
    inputs.tablet.set(false);
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn scrolling_paints_links_and_sidebar() {
    let page = page();
    let inputs = Inputs::new(true);
    let toc =
        mount_table_of_contents(signal(Some(page.toc)), inputs.options(), &TocConfig::default())
            .unwrap();
    let (_seen, _sub) = record(&toc);

    inputs.scroll_to(1300.0);

    assert_eq!(peek_link_state(page.links[0]), LinkState::BLUR);
    assert_eq!(peek_link_state(page.links[1]), LinkState::ACTIVE | LinkState::BLUR);
    assert_eq!(peek_link_state(page.links[2]), LinkState::NONE);
    assert_eq!(peek_sidebar_height(page.toc), Some(800.0));
    assert!(peek_sidebar_lock(page.toc));

    let (sidebar, anchors) = above(&toc.latest().unwrap());
    assert_eq!(sidebar, Sidebar { height: 800.0, lock: true });
    assert_eq!(anchors.active(), Some(page.links[1]));

    inputs.scroll_to(0.0);
    assert_eq!(peek_link_state(page.links[0]), LinkState::NONE);
    assert_eq!(peek_link_state(page.links[1]), LinkState::NONE);
    assert!(!peek_sidebar_lock(page.toc));
}

#[test]
fn never_emits_until_both_halves_have_a_value() {
    let page = page();
    let inputs = Inputs::new(true);
    let (backend, calls) = CountingBackend::silent_anchors();
    let toc = mount_table_of_contents_with(signal(Some(page.toc)), inputs.options(), backend);
    let (seen, _seen_sub) = record(&toc);

    inputs.scroll_to(500.0);
    assert!(seen.borrow().is_empty());
    assert_eq!(calls.watch_anchor_list.get(), 1);
    assert!(peek_sidebar_height(page.toc).is_some());

    inputs.tablet.set(false);
    assert_eq!(*seen.borrow(), vec![TableOfContentsState::BelowTablet]);
    assert_eq!(peek_sidebar_height(page.toc), None);
}

#[test]
fn late_subscriber_replays_latest_without_recomputing() {
    let page = page();
    let inputs = Inputs::new(true);
    let (backend, calls) = CountingBackend::new();
    let toc = mount_table_of_contents_with(signal(Some(page.toc)), inputs.options(), backend);
    let (first, _first_sub) = record(&toc);

    inputs.scroll_to(500.0);
    inputs.scroll_to(1300.0);

    let (late, _late_sub) = record(&toc);
    assert_eq!(late.borrow().len(), 1);
    assert_eq!(late.borrow().last(), first.borrow().last());
    assert_eq!(calls.watch_sidebar.get(), 1);
    assert_eq!(calls.watch_anchor_list.get(), 1);

    inputs.scroll_to(1700.0);
    assert_eq!(late.borrow().last(), first.borrow().last());
    assert_eq!(above(late.borrow().last().unwrap()).1.active(), Some(page.links[2]));
}

#[test]
fn links_added_after_activation_are_not_queried() {
    let page = page();
    let inputs = Inputs::new(true);
    let (backend, calls) = CountingBackend::new();
    let toc = mount_table_of_contents_with(signal(Some(page.toc)), inputs.options(), backend);
    let (seen, _seen_sub) = record(&toc);

    create_element(ElementProps {
        tag: "h2".into(),
        id: Some("extra".into()),
        offset_top: 500.0,
        ..Default::default()
    });
    let extra = link(page.toc, "#extra");

    inputs.scroll_to(1300.0);

    assert_eq!(calls.get_elements.get(), 1);
    assert_eq!(calls.painted_links.borrow().len(), 1);
    assert_eq!(peek_link_state(extra), LinkState::NONE);
    for state in seen.borrow().iter() {
        let (_, anchors) = above(state);
        assert!(anchors.prev.iter().chain(&anchors.next).all(|path| !path.contains(&extra)));
    }
}

#[test]
fn remount_tears_down_the_previous_element() {
    let first = page();
    let second = toc_page("b-");
    let inputs = Inputs::new(true);
    let element = signal(Some(first.toc));
    let (backend, calls) = CountingBackend::new();
    let toc = mount_table_of_contents_with(element.clone(), inputs.options(), backend);
    let (seen, _seen_sub) = record(&toc);

    inputs.scroll_to(1300.0);
    assert_eq!(peek_link_state(first.links[1]), LinkState::ACTIVE | LinkState::BLUR);

    let before = seen.borrow().len();
    element.set(Some(second.toc));
    assert_eq!(seen.borrow().len(), before + 1);

    for &link in &first.links {
        assert_eq!(peek_link_state(link), LinkState::NONE);
    }
    assert_eq!(peek_sidebar_height(first.toc), None);

    let (sidebar, anchors) = above(seen.borrow().last().unwrap());
    assert_eq!(sidebar, Sidebar { height: 800.0, lock: true });
    assert_eq!(anchors.active(), Some(second.links[1]));
    assert_eq!(peek_link_state(second.links[1]), LinkState::ACTIVE | LinkState::BLUR);
    assert_eq!(calls.painted_links.borrow().last(), Some(&second.links));
}

#[test]
fn teardown_completes_before_below_tablet_is_observed() {
    let page = page();
    let inputs = Inputs::new(true);
    let toc =
        mount_table_of_contents(signal(Some(page.toc)), inputs.options(), &TocConfig::default())
            .unwrap();

    let painted_at_switch: Rc<RefCell<Vec<(Option<f32>, Vec<LinkState>)>>> =
        Rc::new(RefCell::new(Vec::new()));
    let painted = painted_at_switch.clone();
    let links = page.links.clone();
    let toc_el = page.toc;
    let _sub = toc.subscribe(move |state| {
        if *state == TableOfContentsState::BelowTablet {
            let states = links.iter().map(|&l| peek_link_state(l)).collect();
            painted.borrow_mut().push((peek_sidebar_height(toc_el), states));
        }
    });

    inputs.scroll_to(1300.0);
    inputs.tablet.set(false);

    let painted = painted_at_switch.borrow();
    assert_eq!(painted.len(), 1);
    assert_eq!(painted[0].0, None);
    assert!(painted[0].1.iter().all(|s| *s == LinkState::NONE));
}

#[test]
fn unmount_stops_all_derivations() {
    let page = page();
    let inputs = Inputs::new(true);
    let (backend, calls) = CountingBackend::new();
    let toc = mount_table_of_contents_with(signal(Some(page.toc)), inputs.options(), backend);
    let (seen, _seen_sub) = record(&toc);
    inputs.scroll_to(1300.0);

    let count = seen.borrow().len();
    toc.unmount();

    inputs.scroll_to(0.0);
    inputs.tablet.set(false);
    assert_eq!(seen.borrow().len(), count);
    assert_eq!(calls.watch_sidebar.get(), 1);
    assert_eq!(peek_sidebar_height(page.toc), None);
    assert!(page.links.iter().all(|&l| peek_link_state(l) == LinkState::NONE));
}

#[test]
fn getter_breakpoint_keeps_pipeline_alive_while_scrolling() {
    let page = page();
    let inputs = Inputs::new(true);
    let mut options = inputs.options();
    let viewport = inputs.viewport.clone();
    options.tablet = Source::Getter(Rc::new(move || viewport.get().size.width >= 960.0));

    let (backend, calls) = CountingBackend::new();
    let toc = mount_table_of_contents_with(signal(Some(page.toc)), options, backend);
    let (seen, _seen_sub) = record(&toc);
    assert_eq!(seen.borrow().len(), 1);

    inputs.scroll_to(1300.0);
    assert!(seen.borrow().len() > 1);
    assert_eq!(peek_link_state(page.links[1]), LinkState::ACTIVE | LinkState::BLUR);
    assert_eq!(peek_sidebar_height(page.toc), Some(800.0));

    inputs.scroll_to(1700.0);
    let (_, anchors) = above(seen.borrow().last().unwrap());
    assert_eq!(anchors.active(), Some(page.links[2]));
    assert_eq!(calls.watch_sidebar.get(), 1);

    // Narrowing the window flips the getter
    inputs.viewport.set(Viewport::at(1700.0, 800.0, 800.0));
    assert_eq!(seen.borrow().last(), Some(&TableOfContentsState::BelowTablet));
    assert_eq!(peek_sidebar_height(page.toc), None);
}

#[test]
fn logs_through_tracing_subscriber() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("spark_toc=trace"))
        .with_test_writer()
        .try_init();

    let page = page();
    let inputs = Inputs::new(true);
    let toc =
        mount_table_of_contents(signal(Some(page.toc)), inputs.options(), &TocConfig::default())
            .unwrap();
    let (seen, _seen_sub) = record(&toc);
    inputs.tablet.set(false);
    assert_eq!(seen.borrow().len(), 2);
}

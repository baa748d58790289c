//! Shared fixtures: a small documentation page and a call-counting backend.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::{Signal, signal};
use spark_toc::{
    AnchorList, DomBackend, ElementId, ElementProps, Header, Main, MountOptions, Painter, Sidebar,
    Sink, Source, Subscription, TableOfContents, TableOfContentsState, TocBackend, TocConfig, Viewport,
    create_element, reset_document,
};

pub struct Page {
    pub toc: ElementId,
    pub links: Vec<ElementId>,
}

fn heading(tag: &str, id: &str, offset: f32) -> ElementId {
    create_element(ElementProps {
        tag: tag.into(),
        id: Some(id.into()),
        offset_top: offset,
        ..Default::default()
    })
}

pub fn link(toc: ElementId, href: &str) -> ElementId {
    create_element(ElementProps {
        tag: "a".into(),
        classes: vec!["md-nav__link".into()],
        href: Some(href.into()),
        parent: Some(toc),
        ..Default::default()
    })
}

/// Sidebar container (100) > inner (124) > toc with links to
/// `h2#intro` (400), `h2#usage` (1200) and `h3#advanced` (1600).
pub fn page() -> Page {
    reset_document();
    toc_page("")
}

/// Another toc on the same document. Heading ids are prefixed.
pub fn toc_page(prefix: &str) -> Page {
    let container = create_element(ElementProps {
        tag: "div".into(),
        offset_top: 100.0,
        ..Default::default()
    });
    let inner = create_element(ElementProps {
        tag: "div".into(),
        parent: Some(container),
        offset_top: 124.0,
        ..Default::default()
    });
    let toc = create_element(ElementProps {
        tag: "nav".into(),
        parent: Some(inner),
        ..Default::default()
    });

    heading("h2", &format!("{prefix}intro"), 400.0);
    heading("h2", &format!("{prefix}usage"), 1200.0);
    heading("h3", &format!("{prefix}advanced"), 1600.0);

    let links = ["intro", "usage", "advanced"]
        .iter()
        .map(|id| link(toc, &format!("#{prefix}{id}")))
        .collect();

    Page { toc, links }
}

pub struct Inputs {
    pub header: Signal<Header>,
    pub main: Signal<Main>,
    pub viewport: Signal<Viewport>,
    pub tablet: Signal<bool>,
}

impl Inputs {
    pub fn new(tablet: bool) -> Self {
        Self {
            header: signal(Header { sticky: true, height: 48.0 }),
            main: signal(Main { offset: 200.0, height: 800.0, active: false }),
            viewport: signal(Viewport::at(0.0, 1280.0, 800.0)),
            tablet: signal(tablet),
        }
    }

    pub fn options(&self) -> MountOptions {
        MountOptions {
            header: Source::Signal(self.header.clone()),
            main: Source::Signal(self.main.clone()),
            viewport: Source::Signal(self.viewport.clone()),
            tablet: Source::Signal(self.tablet.clone()),
        }
    }

    pub fn scroll_to(&self, y: f32) {
        self.viewport.set(Viewport::at(y, 1280.0, 800.0));
    }
}

pub type States = Rc<RefCell<Vec<TableOfContentsState>>>;

/// Subscribe and collect every state. Keep the subscription alive.
pub fn record(toc: &TableOfContents) -> (States, Subscription<TableOfContentsState>) {
    let seen: States = Rc::new(RefCell::new(Vec::new()));
    let seen_clone = seen.clone();
    let sub = toc.subscribe(move |state| seen_clone.borrow_mut().push(state.clone()));
    (seen, sub)
}

#[derive(Default)]
pub struct Calls {
    pub get_elements: Cell<usize>,
    pub watch_sidebar: Cell<usize>,
    pub watch_anchor_list: Cell<usize>,
    /// Link snapshot handed to every anchor list painter.
    pub painted_links: RefCell<Vec<Vec<ElementId>>>,
}

/// Delegates to [`DomBackend`] and counts invocations.
pub struct CountingBackend {
    inner: DomBackend,
    pub calls: Rc<Calls>,
    silent_anchors: bool,
}

impl CountingBackend {
    pub fn new() -> (Self, Rc<Calls>) {
        Self::build(false)
    }

    /// Anchor list watcher that never emits.
    pub fn silent_anchors() -> (Self, Rc<Calls>) {
        Self::build(true)
    }

    fn build(silent_anchors: bool) -> (Self, Rc<Calls>) {
        let calls = Rc::new(Calls::default());
        let backend = Self {
            inner: DomBackend::new(&TocConfig::default()).expect("default selector parses"),
            calls: calls.clone(),
            silent_anchors,
        };
        (backend, calls)
    }
}

impl TocBackend for CountingBackend {
    fn get_elements(&self, root: ElementId) -> Vec<ElementId> {
        self.calls.get_elements.set(self.calls.get_elements.get() + 1);
        self.inner.get_elements(root)
    }

    fn watch_sidebar(
        &self,
        el: ElementId,
        main: &Source<Main>,
        viewport: &Source<Viewport>,
        sink: Sink<Sidebar>,
    ) {
        self.calls.watch_sidebar.set(self.calls.watch_sidebar.get() + 1);
        self.inner.watch_sidebar(el, main, viewport, sink);
    }

    fn paint_sidebar(&self, el: ElementId) -> Painter<Sidebar> {
        self.inner.paint_sidebar(el)
    }

    fn watch_anchor_list(
        &self,
        els: &[ElementId],
        header: &Source<Header>,
        viewport: &Source<Viewport>,
        sink: Sink<AnchorList>,
    ) {
        self.calls.watch_anchor_list.set(self.calls.watch_anchor_list.get() + 1);
        if !self.silent_anchors {
            self.inner.watch_anchor_list(els, header, viewport, sink);
        }
    }

    fn paint_anchor_list(&self, els: &[ElementId]) -> Painter<AnchorList> {
        self.calls.painted_links.borrow_mut().push(els.to_vec());
        self.inner.paint_anchor_list(els)
    }
}

//! Latest-value join of two independently updating derivations.
//!
//! A two-slot cache with one ready flag per slot (`Option`). Every update
//! re-emits once both slots have been filled at least once. Closing the join
//! drops both slots and ignores anything that arrives afterwards.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub struct LatestPair<A, B> {
    left: RefCell<Option<A>>,
    right: RefCell<Option<B>>,
    open: Cell<bool>,
    emit: Box<dyn Fn(A, B)>,
}

impl<A: Clone + 'static, B: Clone + 'static> LatestPair<A, B> {
    pub fn new(emit: impl Fn(A, B) + 'static) -> Rc<Self> {
        Rc::new(Self {
            left: RefCell::new(None),
            right: RefCell::new(None),
            open: Cell::new(true),
            emit: Box::new(emit),
        })
    }

    pub fn set_left(&self, value: A) {
        if !self.open.get() {
            return;
        }
        *self.left.borrow_mut() = Some(value);
        self.flush();
    }

    pub fn set_right(&self, value: B) {
        if !self.open.get() {
            return;
        }
        *self.right.borrow_mut() = Some(value);
        self.flush();
    }

    /// Both slots have been filled.
    pub fn is_ready(&self) -> bool {
        self.left.borrow().is_some() && self.right.borrow().is_some()
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Stop emitting. Values set after this are dropped.
    pub fn close(&self) {
        self.open.set(false);
        self.left.borrow_mut().take();
        self.right.borrow_mut().take();
    }

    fn flush(&self) {
        // Clone out so the observer may update the join again.
        let left = self.left.borrow().clone();
        let right = self.right.borrow().clone();
        if let (Some(left), Some(right)) = (left, right) {
            (self.emit)(left, right);
        }
    }
}

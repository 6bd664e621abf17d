//! Elements and their mutual peer relation
//!
//! An element is always held through an `Rc`; the peer relation is a
//! `Weak` and never keeps its target alive. Nothing in this module
//! destroys an element: that happens when the last owner lets go.

use std::cell::RefCell;
use std::fmt;
use std::ptr;
use std::rc::{Rc, Weak};

/// Records the payload of every element it is attached to when that
/// element is destroyed.
#[derive(Debug, Clone, Default)]
pub struct DropProbe(Rc<RefCell<Vec<i32>>>);

impl DropProbe {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, data: i32) {
        self.0.borrow_mut().push(data);
    }

    /// Payloads destroyed so far, in destruction order
    pub fn destroyed(&self) -> Vec<i32> {
        self.0.borrow().clone()
    }

    /// How many times an element carrying `data` was destroyed
    pub fn times_destroyed(&self, data: i32) -> usize {
        self.0.borrow().iter().filter(|&&d| d == data).count()
    }
}

/// A node holding an integer payload and a non-owning peer link
pub struct Element {
    data: i32,
    peer: RefCell<Weak<Element>>,
    probe: Option<DropProbe>,
}

impl Element {
    pub fn new(data: i32) -> Rc<Self> {
        Rc::new(Self {
            data,
            peer: RefCell::new(Weak::new()),
            probe: None,
        })
    }

    /// Create an element whose destruction is recorded by `probe`
    pub fn with_probe(data: i32, probe: &DropProbe) -> Rc<Self> {
        Rc::new(Self {
            data,
            peer: RefCell::new(Weak::new()),
            probe: Some(probe.clone()),
        })
    }

    pub fn data(&self) -> i32 {
        self.data
    }

    /// The current peer, if one is linked and still alive
    pub fn peer(&self) -> Option<Rc<Element>> {
        self.peer.borrow().upgrade()
    }

    /// Whether this element's peer link points at `other`
    pub fn is_linked_to(&self, other: &Element) -> bool {
        let target: *const Element = other;
        ptr::eq(self.peer.borrow().as_ptr(), target)
    }

    /// Link `this` and `other` as mutual peers.
    ///
    /// Former partners of either side lose their back-link first, so the
    /// relation stays symmetric.
    pub fn set_peer(this: &Rc<Element>, other: &Rc<Element>) {
        this.reset_peer();
        other.reset_peer();
        *this.peer.borrow_mut() = Rc::downgrade(other);
        *other.peer.borrow_mut() = Rc::downgrade(this);
        tracing::trace!(a = this.data, b = other.data, "peers linked");
    }

    /// Clear the peer link on both ends
    pub fn reset_peer(&self) {
        let old = self.peer.replace(Weak::new());
        if let Some(old) = old.upgrade() {
            let points_back = old.is_linked_to(self);
            if points_back {
                old.peer.replace(Weak::new());
            }
        }
    }

    /// Detach the peer and hand it to the caller.
    ///
    /// The peer is not destroyed here; it lives on for as long as anyone
    /// else owns it.
    pub fn release_peer(&self) -> Option<Rc<Element>> {
        let peer = self.peer();
        self.reset_peer();
        if let Some(peer) = &peer {
            tracing::debug!(data = self.data, peer = peer.data, "peer released");
        }
        peer
    }
}

impl Drop for Element {
    fn drop(&mut self) {
        if let Some(peer) = self.peer.get_mut().upgrade() {
            // don't let the peer pin our allocation through a dead link
            let points_back = peer.is_linked_to(self);
            if points_back {
                peer.peer.replace(Weak::new());
            }
        }
        tracing::trace!(data = self.data, "element destroyed");
        if let Some(probe) = &self.probe {
            probe.record(self.data);
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("data", &self.data)
            .field("peer", &self.peer().map(|p| p.data))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_mutual(a: &Element, b: &Element) {
        assert!(a.is_linked_to(b));
        assert!(b.is_linked_to(a));
    }

    #[test]
    fn test_set_peer_is_mutual() {
        let a = Element::new(1);
        let b = Element::new(2);
        Element::set_peer(&a, &b);
        assert_mutual(&a, &b);
        assert_eq!(a.peer().map(|p| p.data()), Some(2));
        assert_eq!(b.peer().map(|p| p.data()), Some(1));
    }

    #[test]
    fn test_relink_clears_former_partners() {
        let a = Element::new(1);
        let b = Element::new(2);
        let c = Element::new(3);
        let d = Element::new(4);
        Element::set_peer(&a, &b);
        Element::set_peer(&c, &d);

        Element::set_peer(&a, &c);

        assert_mutual(&a, &c);
        assert!(b.peer().is_none());
        assert!(d.peer().is_none());
    }

    #[test]
    fn test_reset_peer_clears_both_ends() {
        let a = Element::new(1);
        let b = Element::new(2);
        Element::set_peer(&a, &b);
        b.reset_peer();
        assert!(a.peer().is_none());
        assert!(b.peer().is_none());
    }

    #[test]
    fn test_release_peer_does_not_destroy() {
        let probe = DropProbe::new();
        let a = Element::with_probe(1, &probe);
        let b = Element::with_probe(2, &probe);
        Element::set_peer(&a, &b);

        let released = a.release_peer().expect("peer was linked");
        assert_eq!(released.data(), 2);
        drop(released);

        assert!(probe.destroyed().is_empty());
        assert_eq!(b.data(), 2);
        assert!(a.peer().is_none());
        assert!(b.peer().is_none());
    }

    #[test]
    fn test_release_without_peer() {
        let a = Element::new(1);
        assert!(a.release_peer().is_none());
    }

    #[test]
    fn test_drop_clears_back_link() {
        let probe = DropProbe::new();
        let a = Element::with_probe(1, &probe);
        let b = Element::with_probe(2, &probe);
        Element::set_peer(&a, &b);

        drop(b);

        assert!(a.peer().is_none());
        assert_eq!(probe.destroyed(), vec![2]);
        assert!(a.release_peer().is_none());
    }

    #[test]
    fn test_self_peer() {
        let a = Element::new(7);
        Element::set_peer(&a, &a);
        assert!(a.is_linked_to(&a));
        a.reset_peer();
        assert!(a.peer().is_none());
    }

    #[test]
    fn test_debug_shows_peer_payload() {
        let a = Element::new(1);
        let b = Element::new(2);
        Element::set_peer(&a, &b);
        assert_eq!(format!("{:?}", a), "Element { data: 1, peer: Some(2) }");
    }
}

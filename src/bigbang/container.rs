//! Fixed-capacity element containers
//!
//! Whether a container owns its elements is part of its type:
//! `Container<Owning>` keeps strong handles, `Container<Viewing>` keeps
//! weak ones. Neither ever destroys an element directly; an owned
//! element goes away once its last strong handle is dropped, so no
//! teardown order can destroy it twice.

use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use crate::common::{Error, Result};

use super::element::Element;

/// How a container holds on to the elements stored in its slots
pub trait Ownership {
    /// What a slot stores
    type Handle;

    /// Name used in logs and reports
    const NAME: &'static str;

    fn adopt(element: &Rc<Element>) -> Self::Handle;

    fn resolve(handle: &Self::Handle) -> Option<Rc<Element>>;
}

/// Slots share ownership of their elements
#[derive(Debug)]
pub enum Owning {}

/// Slots observe elements owned elsewhere
#[derive(Debug)]
pub enum Viewing {}

impl Ownership for Owning {
    type Handle = Rc<Element>;
    const NAME: &'static str = "owning";

    fn adopt(element: &Rc<Element>) -> Self::Handle {
        Rc::clone(element)
    }

    fn resolve(handle: &Self::Handle) -> Option<Rc<Element>> {
        Some(Rc::clone(handle))
    }
}

impl Ownership for Viewing {
    type Handle = Weak<Element>;
    const NAME: &'static str = "viewing";

    fn adopt(element: &Rc<Element>) -> Self::Handle {
        Rc::downgrade(element)
    }

    fn resolve(handle: &Self::Handle) -> Option<Rc<Element>> {
        handle.upgrade()
    }
}

/// A fixed-size sequence of element slots
pub struct Container<O: Ownership> {
    slots: Vec<Option<O::Handle>>,
    _ownership: PhantomData<O>,
}

impl<O: Ownership> Container<O> {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            _ownership: PhantomData,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots. A view whose element is gone is empty.
    pub fn len(&self) -> usize {
        self.elements().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Store `element` in the first empty slot; false when full
    pub fn add(&mut self, element: &Rc<Element>) -> bool {
        self.insert(element).is_ok()
    }

    /// Store `element` in the first empty slot and report its index
    pub fn insert(&mut self, element: &Rc<Element>) -> Result<usize> {
        let vacant = self
            .slots
            .iter()
            .position(|slot| slot.as_ref().and_then(O::resolve).is_none());

        match vacant {
            Some(index) => {
                self.slots[index] = Some(O::adopt(element));
                tracing::trace!(
                    ownership = O::NAME,
                    index,
                    data = element.data(),
                    "element stored"
                );
                Ok(index)
            }
            None => Err(Error::ContainerFull {
                capacity: self.capacity(),
            }),
        }
    }

    /// Empty a slot, handing its handle back to the caller
    pub fn remove(&mut self, index: usize) -> Result<Option<O::Handle>> {
        let capacity = self.capacity();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(Error::SlotOutOfRange { index, capacity })?;
        Ok(slot.take())
    }

    /// Element in slot `index`, if present
    pub fn get(&self, index: usize) -> Option<Rc<Element>> {
        self.slots.get(index)?.as_ref().and_then(O::resolve)
    }

    /// Present elements in slot order
    pub fn elements(&self) -> impl Iterator<Item = Rc<Element>> + '_ {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_ref().and_then(O::resolve))
    }

    /// Sum of the payload of every present element
    pub fn process_elements(&self) -> i64 {
        self.elements().map(|e| i64::from(e.data())).sum()
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigbang::element::DropProbe;

    #[test]
    fn test_add_until_full() {
        for capacity in 0..6 {
            let mut container = Container::<Owning>::new(capacity);
            let elements: Vec<_> = (0..=capacity as i32).map(Element::new).collect();
            for (i, e) in elements.iter().enumerate() {
                assert_eq!(container.add(e), i < capacity, "capacity {capacity}, add #{i}");
            }
            assert!(container.is_full());
        }
    }

    #[test]
    fn test_insert_reports_full() {
        let mut container = Container::<Owning>::new(1);
        assert_eq!(container.insert(&Element::new(1)).unwrap(), 0);
        let err = container.insert(&Element::new(2)).unwrap_err();
        assert!(matches!(err, Error::ContainerFull { capacity: 1 }));
    }

    #[test]
    fn test_add_fills_first_empty_slot() {
        let mut container = Container::<Owning>::new(3);
        let (a, b, c) = (Element::new(1), Element::new(2), Element::new(3));
        container.add(&a);
        container.add(&b);
        container.add(&c);
        container.remove(1).unwrap();

        assert_eq!(container.insert(&Element::new(9)).unwrap(), 1);
        assert_eq!(container.get(1).map(|e| e.data()), Some(9));
    }

    /// Small deterministic generator for operation sequences
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self, bound: u64) -> u64 {
            self.0 = self
                .0
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (self.0 >> 33) % bound
        }
    }

    #[test]
    fn test_process_elements_tracks_insert_and_remove() {
        for seed in 0..32 {
            let mut rng = Lcg(seed);
            let capacity = 1 + rng.next(6) as usize;
            let mut container = Container::<Owning>::new(capacity);
            let mut model: Vec<Option<i32>> = vec![None; capacity];

            for step in 0..64 {
                if rng.next(3) == 0 {
                    let index = rng.next(capacity as u64 + 1) as usize;
                    let removed = container.remove(index);
                    if index < capacity {
                        let removed = removed.unwrap().map(|e| e.data());
                        assert_eq!(removed, model[index].take());
                    } else {
                        assert!(removed.is_err());
                    }
                } else {
                    let data = rng.next(200) as i32 - 100;
                    let stored = container.add(&Element::new(data));
                    match model.iter().position(Option::is_none) {
                        Some(slot) => {
                            assert!(stored);
                            model[slot] = Some(data);
                        }
                        None => assert!(!stored),
                    }
                }

                let expected: i64 = model.iter().flatten().map(|&d| i64::from(d)).sum();
                assert_eq!(
                    container.process_elements(),
                    expected,
                    "seed {seed}, step {step}"
                );
                assert_eq!(container.len(), model.iter().flatten().count());
            }
        }
    }

    #[test]
    fn test_duplicates_count_twice() {
        let mut container = Container::<Owning>::new(2);
        let a = Element::new(21);
        container.add(&a);
        container.add(&a);
        assert_eq!(container.process_elements(), 42);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut container = Container::<Viewing>::new(2);
        let err = container.remove(2).err().expect("index 2 is out of range");
        assert!(matches!(err, Error::SlotOutOfRange { index: 2, capacity: 2 }));
    }

    #[test]
    fn test_owning_container_keeps_elements_alive() {
        let probe = DropProbe::new();
        let mut container = Container::<Owning>::new(2);
        {
            let a = Element::with_probe(1, &probe);
            container.add(&a);
        }
        assert!(probe.destroyed().is_empty());
        assert_eq!(container.process_elements(), 1);

        drop(container);
        assert_eq!(probe.destroyed(), vec![1]);
    }

    #[test]
    fn test_viewing_container_sees_expired_slots_as_empty() {
        let probe = DropProbe::new();
        let mut container = Container::<Viewing>::new(1);
        let a = Element::with_probe(1, &probe);
        container.add(&a);
        assert!(container.is_full());

        drop(a);
        assert_eq!(probe.times_destroyed(1), 1);
        assert!(container.is_empty());
        assert_eq!(container.process_elements(), 0);
        assert!(container.add(&Element::new(2)));
    }

    #[test]
    fn test_each_element_destroyed_once_whatever_teardown_order() {
        for container_first in [true, false] {
            let probe = DropProbe::new();
            let a = Element::with_probe(1, &probe);
            let b = Element::with_probe(2, &probe);
            Element::set_peer(&a, &b);
            let _ = a.release_peer();

            let mut container = Container::<Owning>::new(10);
            container.add(&a);
            container.add(&b);
            container.add(&b);

            if container_first {
                drop(container);
                drop(a);
                drop(b);
            } else {
                drop(b);
                drop(a);
                drop(container);
            }

            assert_eq!(probe.times_destroyed(1), 1);
            assert_eq!(probe.times_destroyed(2), 1);
        }
    }

    #[test]
    fn test_clear_releases_owned_elements() {
        let probe = DropProbe::new();
        let mut container = Container::<Owning>::new(2);
        container.add(&Element::with_probe(3, &probe));
        container.clear();
        assert_eq!(probe.destroyed(), vec![3]);
        assert!(container.is_empty());
    }
}

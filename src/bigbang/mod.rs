//! Container/Element ownership example
//!
//! Two elements are linked as peers, one of them releases its peer, and
//! both are then stored in a container. With raw pointers this sequence
//! frees the peer twice; here every element has a single destruction
//! point no matter which holder goes away first.

mod container;
mod element;

pub use container::{Container, Ownership, Owning, Viewing};
pub use element::{DropProbe, Element};

use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Largest container the driver will allocate
pub const MAX_CAPACITY: usize = 4096;

/// Runtime selection between the two container ownership types
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipMode {
    /// The container shares ownership of its elements
    #[default]
    Owning,
    /// The container only observes elements owned by the driver
    Viewing,
}

/// Settings for one run of the driver
#[derive(Debug, Clone)]
pub struct BigbangOptions {
    pub capacity: usize,
    pub ownership: OwnershipMode,
    /// Insert the released peer before the element that released it
    pub peer_first: bool,
}

/// Outcome of one run of the driver
#[derive(Debug, Clone, Serialize)]
pub struct BigbangReport {
    pub ownership: OwnershipMode,
    pub capacity: usize,
    /// Sum of the payloads present in the container
    pub result: i64,
    /// Elements the container had no room for
    pub rejected: Vec<i32>,
    /// Payloads destroyed during the run, sorted
    pub destroyed: Vec<i32>,
}

/// Run the peer-release-then-store sequence
pub fn run(options: &BigbangOptions) -> BigbangReport {
    let probe = DropProbe::new();

    let (result, rejected) = {
        let a = Element::with_probe(1, &probe);
        let b = Element::with_probe(2, &probe);
        Element::set_peer(&a, &b);
        drop(a.release_peer());

        let order = if options.peer_first { [b, a] } else { [a, b] };
        match options.ownership {
            OwnershipMode::Owning => fill::<Owning>(options.capacity, order),
            OwnershipMode::Viewing => fill::<Viewing>(options.capacity, order),
        }
    };

    let mut destroyed = probe.destroyed();
    destroyed.sort_unstable();
    tracing::info!(
        ownership = ?options.ownership,
        result,
        ?destroyed,
        "bigbang run complete"
    );

    BigbangReport {
        ownership: options.ownership,
        capacity: options.capacity,
        result,
        rejected,
        destroyed,
    }
}

fn fill<O: Ownership>(capacity: usize, elements: [Rc<Element>; 2]) -> (i64, Vec<i32>) {
    let mut container = Container::<O>::new(capacity);
    let mut rejected = Vec::new();
    for element in &elements {
        if !container.add(element) {
            tracing::warn!(
                ownership = O::NAME,
                data = element.data(),
                capacity,
                "container full, element not stored"
            );
            rejected.push(element.data());
        }
    }
    (container.process_elements(), rejected)
}

//! Node Batching
//!
//! Groups a flat sequence of top-level nodes into render batches. A batch is
//! a maximal contiguous run of nodes with the same shape; mapping runs are
//! split further wherever the key set changes, since one table needs one
//! fixed column set.

use crate::output::node::{Node, Scalar, Shape};

/// A run of same-shape nodes rendered as one table
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub shape: Shape,
    pub nodes: Vec<Node>,
}

impl Batch {
    fn new(first: Node) -> Self {
        Self {
            shape: first.shape(),
            nodes: vec![first],
        }
    }
}

fn same_keys(a: &[Scalar], b: &[Scalar]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}

/// Split top-level nodes into batches, preserving order.
pub fn into_batches(nodes: Vec<Node>) -> Vec<Batch> {
    let mut batches: Vec<Batch> = Vec::new();
    let mut current_keys: Vec<Scalar> = Vec::new();

    for node in nodes {
        let keys = node.sorted_keys();
        let extends_current = match batches.last() {
            Some(batch) if batch.shape == node.shape() => {
                batch.shape != Shape::Mapping || same_keys(&current_keys, &keys)
            }
            _ => false,
        };

        if extends_current {
            if let Some(batch) = batches.last_mut() {
                batch.nodes.push(node);
            }
        } else {
            current_keys = keys;
            batches.push(Batch::new(node));
        }
    }

    batches
}

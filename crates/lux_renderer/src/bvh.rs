//! Bounding volume hierarchy over a triangle collection.
//!
//! The tree is stored as an arena of nodes with integer child indices
//! rather than individually boxed nodes, which keeps traversal local in
//! memory. It is built once per mesh and discarded wholesale whenever
//! the triangle collection mutates; there is no incremental update.

use crate::entity::RayHit;
use crate::Triangle;
use lux_core::{Material, SplitPolicy};
use lux_math::{Aabb, Ray};
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
enum NodeKind {
    /// Index of the single triangle this leaf holds
    Leaf(u32),
    Interior { left: u32, right: u32 },
}

#[derive(Debug, Clone, Copy)]
struct Node {
    bounds: Aabb,
    kind: NodeKind,
}

/// A binary BVH over triangles it does not own; the owning mesh passes
/// its triangle slice back in for traversal.
pub struct Bvh {
    nodes: Vec<Node>,
}

impl Bvh {
    /// Build a tree over `triangles` using the given split policy.
    /// An empty input produces an empty tree that never reports a hit.
    pub fn build(triangles: &[Triangle], policy: SplitPolicy) -> Self {
        let mut nodes = Vec::new();
        if !triangles.is_empty() {
            nodes.reserve(2 * triangles.len() - 1);
            let mut order: Vec<u32> = (0..triangles.len() as u32).collect();
            Self::build_range(&mut nodes, triangles, &mut order, policy);
        }

        log::debug!(
            "BVH built: {} nodes over {} triangles",
            nodes.len(),
            triangles.len()
        );

        Self { nodes }
    }

    /// Recursive construction over a sub-range of the triangle index
    /// scratch buffer. Returns the arena index of the node built.
    fn build_range(
        nodes: &mut Vec<Node>,
        triangles: &[Triangle],
        order: &mut [u32],
        policy: SplitPolicy,
    ) -> u32 {
        // The node's box is the union of the per-triangle boxes of the
        // whole range, computed directly rather than from the children.
        let bounds = order.iter().fold(Aabb::EMPTY, |b, &i| {
            Aabb::union(&b, &triangles[i as usize].bounds())
        });

        let offset = nodes.len() as u32;
        if let [index] = *order {
            nodes.push(Node {
                bounds,
                kind: NodeKind::Leaf(index),
            });
            return offset;
        }

        sort_by_policy(triangles, order, policy);

        // Midpoint split; the placeholder interior node is patched with
        // its child indices once both subtrees exist.
        let mid = order.len() / 2;
        nodes.push(Node {
            bounds,
            kind: NodeKind::Interior { left: 0, right: 0 },
        });
        let (lo, hi) = order.split_at_mut(mid);
        let left = Self::build_range(nodes, triangles, lo, policy);
        let right = Self::build_range(nodes, triangles, hi, policy);
        nodes[offset as usize].kind = NodeKind::Interior { left, right };

        offset
    }

    /// Nearest intersection of `ray` with the triangles under this tree.
    pub fn intersect(&self, triangles: &[Triangle], ray: &Ray) -> Option<RayHit> {
        if self.nodes.is_empty() {
            return None;
        }
        self.intersect_node(0, triangles, ray)
    }

    fn intersect_node(&self, index: u32, triangles: &[Triangle], ray: &Ray) -> Option<RayHit> {
        let node = &self.nodes[index as usize];

        // A box miss prunes the whole subtree
        if !node.bounds.intersects(ray) {
            return None;
        }

        match node.kind {
            NodeKind::Leaf(tri) => triangles[tri as usize].intersect(ray),
            NodeKind::Interior { left, right } => {
                // Both children are visited unconditionally; the closer
                // hit (by squared distance from the ray origin) wins.
                let left = self.intersect_node(left, triangles, ray);
                let right = self.intersect_node(right, triangles, ray);
                match (left, right) {
                    (Some(l), Some(r)) => {
                        if l.distance_squared_from(ray.origin)
                            < r.distance_squared_from(ray.origin)
                        {
                            Some(l)
                        } else {
                            Some(r)
                        }
                    }
                    (l, None) => l,
                    (None, r) => r,
                }
            }
        }
    }

    /// Representative material: the material of the leftmost reachable
    /// leaf. A mesh normally shares one material, so this stands in for
    /// all of it.
    pub fn material(&self, triangles: &[Triangle]) -> Option<Arc<Material>> {
        let mut index = 0usize;
        loop {
            match self.nodes.get(index)?.kind {
                NodeKind::Leaf(tri) => {
                    return Some(Arc::clone(triangles[tri as usize].material()));
                }
                NodeKind::Interior { left, .. } => index = left as usize,
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

fn sort_by_policy(triangles: &[Triangle], order: &mut [u32], policy: SplitPolicy) {
    match policy {
        SplitPolicy::FirstVertexX => {
            order.sort_unstable_by(|&a, &b| {
                let ax = triangles[a as usize].vertices().0.x;
                let bx = triangles[b as usize].vertices().0.x;
                ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        SplitPolicy::LongestAxis => {
            let centroid_bounds = order.iter().fold(Aabb::EMPTY, |b, &i| {
                b.point_union(triangles[i as usize].bounds().centroid())
            });
            let axis = centroid_bounds.longest_axis();
            order.sort_unstable_by(|&a, &b| {
                let ac = triangles[a as usize].bounds().centroid()[axis];
                let bc = triangles[b as usize].bounds().centroid()[axis];
                ac.partial_cmp(&bc).unwrap_or(std::cmp::Ordering::Equal)
            });
        }
    }
}

//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree over the scene's spheres, built once at scene load and
//! read concurrently by every ray afterwards. Each leaf holds exactly one
//! primitive; every branch holds exactly two children.

use crate::error::{RenderError, RenderResult};
use crate::{HitRecord, Hittable, Sphere};
use orb_math::{Aabb, Interval, Ray};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// How the split axis of each branch is chosen during construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SplitAxis {
    /// Cycle X, Y, Z by tree depth.
    #[default]
    RoundRobin,
    /// Draw a random axis per node from a seeded generator.
    Random { seed: u64 },
}

/// Per-build state for choosing split axes.
enum AxisChooser {
    RoundRobin,
    Random(StdRng),
}

impl AxisChooser {
    fn new(policy: SplitAxis) -> Self {
        match policy {
            SplitAxis::RoundRobin => AxisChooser::RoundRobin,
            SplitAxis::Random { seed } => AxisChooser::Random(StdRng::seed_from_u64(seed)),
        }
    }

    fn axis(&mut self, depth: usize) -> usize {
        match self {
            AxisChooser::RoundRobin => depth % 3,
            AxisChooser::Random(rng) => rng.gen_range(0..3),
        }
    }
}

/// BVH node - either a branch with two children or a leaf with one primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node referencing a single primitive.
    Leaf { primitive: usize, bbox: Aabb },
}

impl BvhNode {
    pub fn bbox(&self) -> &Aabb {
        match self {
            BvhNode::Branch { bbox, .. } | BvhNode::Leaf { bbox, .. } => bbox,
        }
    }

    fn hit(&self, primitives: &[Sphere], ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        if !self.bbox().hit(ray, ray_t) {
            return None;
        }

        match self {
            BvhNode::Leaf { primitive, .. } => primitives[*primitive].hit(ray, ray_t),
            BvhNode::Branch { left, right, .. } => HitRecord::closer(
                left.hit(primitives, ray, ray_t),
                right.hit(primitives, ray, ray_t),
            ),
        }
    }

    fn occluded(&self, primitives: &[Sphere], ray: &Ray, ray_t: Interval) -> bool {
        if !self.bbox().hit(ray, ray_t) {
            return false;
        }

        match self {
            BvhNode::Leaf { primitive, .. } => primitives[*primitive].hit(ray, ray_t).is_some(),
            BvhNode::Branch { left, right, .. } => {
                left.occluded(primitives, ray, ray_t) || right.occluded(primitives, ray, ray_t)
            }
        }
    }
}

/// A BVH together with the primitives it indexes.
#[derive(Debug, Clone)]
pub struct Bvh {
    primitives: Vec<Sphere>,
    root: BvhNode,
    node_count: usize,
    depth: usize,
}

impl Bvh {
    /// Build a BVH over `primitives`.
    ///
    /// Fails with [`RenderError::EmptyScene`] when there is nothing to build over.
    pub fn build(primitives: Vec<Sphere>, split: SplitAxis) -> RenderResult<Self> {
        if primitives.is_empty() {
            return Err(RenderError::EmptyScene);
        }

        let mut indices: Vec<usize> = (0..primitives.len()).collect();
        let mut chooser = AxisChooser::new(split);
        let mut stats = BuildStats::default();
        let root = Self::build_node(&primitives, &mut indices, 0, &mut chooser, &mut stats);

        log::debug!(
            "BVH built: {} primitives, {} nodes, depth {}",
            primitives.len(),
            stats.nodes,
            stats.depth
        );

        Ok(Self {
            primitives,
            root,
            node_count: stats.nodes,
            depth: stats.depth,
        })
    }

    /// Recursive construction.
    ///
    /// Sorts the primitives by the minimum corner of their bounding box on
    /// the chosen axis and splits the list in half.
    fn build_node(
        primitives: &[Sphere],
        indices: &mut [usize],
        depth: usize,
        chooser: &mut AxisChooser,
        stats: &mut BuildStats,
    ) -> BvhNode {
        stats.nodes += 1;
        stats.depth = stats.depth.max(depth);

        if indices.len() == 1 {
            let primitive = indices[0];
            return BvhNode::Leaf {
                primitive,
                bbox: primitives[primitive].bounding_box(),
            };
        }

        let axis = chooser.axis(depth);
        indices.sort_unstable_by(|&a, &b| {
            let a_min = primitives[a].bounding_box().min()[axis];
            let b_min = primitives[b].bounding_box().min()[axis];
            a_min.total_cmp(&b_min)
        });

        let mid = indices.len() / 2;
        let (left_indices, right_indices) = indices.split_at_mut(mid);
        let left = Self::build_node(primitives, left_indices, depth + 1, chooser, stats);
        let right = Self::build_node(primitives, right_indices, depth + 1, chooser, stats);
        let bbox = Aabb::surrounding(left.bbox(), right.bbox());

        BvhNode::Branch {
            left: Box::new(left),
            right: Box::new(right),
            bbox,
        }
    }

    pub fn root(&self) -> &BvhNode {
        &self.root
    }

    pub fn primitives(&self) -> &[Sphere] {
        &self.primitives
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Length of the longest root-to-leaf path (a single leaf has depth 0).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns true if anything intersects `ray` inside `ray_t`.
    pub fn occluded(&self, ray: &Ray, ray_t: Interval) -> bool {
        self.root.occluded(&self.primitives, ray, ray_t)
    }
}

impl Hittable for Bvh {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        self.root.hit(&self.primitives, ray, ray_t)
    }

    fn bounding_box(&self) -> Aabb {
        *self.root.bbox()
    }
}

#[derive(Default)]
struct BuildStats {
    nodes: usize,
    depth: usize,
}

/// Closest hit by testing every primitive in turn.
///
/// Reference for the BVH and a fallback for tiny scenes.
pub fn closest_hit_linear(primitives: &[Sphere], ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
    let mut closest: Option<HitRecord> = None;

    for object in primitives {
        let interval = match &closest {
            Some(rec) => ray_t.with_max(rec.t),
            None => ray_t,
        };
        if let Some(rec) = object.hit(ray, interval) {
            closest = Some(rec);
        }
    }

    closest
}

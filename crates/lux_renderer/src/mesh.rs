//! BVH-backed triangle mesh entity.

use crate::entity::RayHit;
use crate::{Bvh, Triangle};
use glam::{Quat, Vec2};
use lux_core::{Material, Mesh, SplitPolicy};
use lux_math::{Ray, Vec3};
use std::sync::Arc;

/// A mesh entity: exclusively owns its triangle collection and the BVH
/// built over it. The BVH never outlives the mesh and is rebuilt
/// wholesale (never patched) whenever the triangles mutate.
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
    bvh: Bvh,
    policy: SplitPolicy,
    dirty: bool,
}

impl TriangleMesh {
    /// Build a mesh entity from pre-assembled triangles.
    pub fn new(triangles: Vec<Triangle>, policy: SplitPolicy) -> Self {
        let bvh = Bvh::build(&triangles, policy);
        Self {
            triangles,
            bvh,
            policy,
            dirty: false,
        }
    }

    /// Assemble triangles from a loaded mesh, sharing one material.
    ///
    /// The loader owns all file-format concerns; this only walks the
    /// index buffer. Texture coordinates are carried over when present.
    pub fn from_mesh(mesh: &Mesh, material: Arc<Material>, policy: SplitPolicy) -> Self {
        let uv = |i: u32| -> Option<Vec2> {
            mesh.uvs
                .as_ref()
                .and_then(|uvs| uvs.get(i as usize))
                .map(|&[u, v]| Vec2::new(u, v))
        };

        let triangles = mesh
            .indices
            .chunks_exact(3)
            .filter_map(|face| {
                let (i0, i1, i2) = (face[0], face[1], face[2]);
                let v0 = *mesh.positions.get(i0 as usize)?;
                let v1 = *mesh.positions.get(i1 as usize)?;
                let v2 = *mesh.positions.get(i2 as usize)?;
                Some(match (uv(i0), uv(i1), uv(i2)) {
                    (Some(t0), Some(t1), Some(t2)) => {
                        Triangle::with_uvs(v0, v1, v2, Arc::clone(&material), [t0, t1, t2])
                    }
                    _ => Triangle::new(v0, v1, v2, Arc::clone(&material)),
                })
            })
            .collect();

        Self::new(triangles, policy)
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Move the mesh: translate every vertex, then rotate it about the
    /// given pivot. Face normals are recomputed and the BVH is marked
    /// stale; the next `rebuild_if_dirty` call rebuilds it.
    pub fn apply_transform(&mut self, translation: Vec3, rotation: Quat, pivot: Vec3) {
        for tri in &mut self.triangles {
            let (v0, v1, v2) = tri.vertices();
            let move_vertex = |v: Vec3| pivot + rotation * (v + translation - pivot);
            tri.set_vertices(move_vertex(v0), move_vertex(v1), move_vertex(v2));
        }
        self.dirty = true;
    }

    /// Flag the BVH as stale after external vertex mutation.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Rebuild the BVH if the geometry changed since the last build.
    pub fn rebuild_if_dirty(&mut self) {
        if self.dirty {
            self.bvh = Bvh::build(&self.triangles, self.policy);
            self.dirty = false;
        }
    }

    /// Nearest intersection, delegated to the BVH. The render pass
    /// rebuilds stale BVHs before any sampling starts.
    pub fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        self.bvh.intersect(&self.triangles, ray)
    }

    /// Representative material (leftmost BVH leaf).
    pub fn material(&self) -> Option<Arc<Material>> {
        self.bvh.material(&self.triangles)
    }
}

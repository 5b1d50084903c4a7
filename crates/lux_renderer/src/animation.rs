//! Per-render animation hooks.
//!
//! The keyframe logic itself lives with the scene-description layer;
//! the renderer only runs each hook once per render pass, serially,
//! before any sampling. A hook that moves mesh geometry must mark the
//! mesh dirty (`apply_transform` does) so the BVH is rebuilt.

use crate::{EntityId, SceneEntity};

type UpdateFn = Box<dyn FnMut(&mut SceneEntity, f32) + Send + Sync>;

/// A callback that mutates one entity's geometry at a scene time.
pub struct Animation {
    target: EntityId,
    update: UpdateFn,
}

impl Animation {
    pub fn new(
        target: EntityId,
        update: impl FnMut(&mut SceneEntity, f32) + Send + Sync + 'static,
    ) -> Self {
        Self {
            target,
            update: Box::new(update),
        }
    }

    pub fn target(&self) -> EntityId {
        self.target
    }

    pub(crate) fn run(&mut self, entity: &mut SceneEntity, time: f32) {
        (self.update)(entity, time);
    }
}

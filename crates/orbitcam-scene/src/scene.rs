//! Entity arena with names and a parent/child hierarchy.

use std::fmt;

use glam::{Quat, Vec3};
use rustc_hash::FxHashMap;

use crate::Transform;

/// Handle to an entity in a [`Scene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(u32);

impl Entity {
    /// Index of the entity in its scene.
    #[must_use]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Errors returned by scene mutations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SceneError {
    /// The handle does not belong to this scene.
    #[error("unknown entity {0}")]
    UnknownEntity(Entity),
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    parent: Option<Entity>,
    children: Vec<Entity>,
    local: Transform,
}

/// Flat storage of named entities. Entities are never removed, so handles
/// stay valid for the lifetime of the scene.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<Node>,
    by_name: FxHashMap<String, Vec<Entity>>,
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds a root entity with a world transform.
    pub fn spawn(&mut self, name: impl Into<String>, transform: Transform) -> Entity {
        self.insert(name.into(), None, transform)
    }

    /// Adds an entity parented to `parent`, with `local` in the parent's space.
    pub fn spawn_child(
        &mut self,
        parent: Entity,
        name: impl Into<String>,
        local: Transform,
    ) -> Result<Entity, SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::UnknownEntity(parent));
        }
        let child = self.insert(name.into(), Some(parent), local);
        self.nodes[parent.0 as usize].children.push(child);
        Ok(child)
    }

    fn insert(&mut self, name: String, parent: Option<Entity>, local: Transform) -> Entity {
        let entity = Entity(self.nodes.len() as u32);
        self.by_name.entry(name.clone()).or_default().push(entity);
        self.nodes.push(Node {
            name,
            parent,
            children: Vec::new(),
            local,
        });
        entity
    }

    /// Whether `entity` belongs to this scene.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        (entity.0 as usize) < self.nodes.len()
    }

    /// First entity spawned with `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<Entity> {
        self.by_name.get(name).and_then(|list| list.first().copied())
    }

    /// Direct child of `parent` named `name`.
    #[must_use]
    pub fn find_child(&self, parent: Entity, name: &str) -> Option<Entity> {
        self.node(parent)?
            .children
            .iter()
            .copied()
            .find(|&c| self.nodes[c.0 as usize].name == name)
    }

    /// Name the entity was spawned with.
    #[must_use]
    pub fn name(&self, entity: Entity) -> Option<&str> {
        self.node(entity).map(|n| n.name.as_str())
    }

    /// Parent of `entity`, if any.
    #[must_use]
    pub fn parent(&self, entity: Entity) -> Option<Entity> {
        self.node(entity)?.parent
    }

    /// Direct children of `entity`.
    #[must_use]
    pub fn children(&self, entity: Entity) -> &[Entity] {
        self.node(entity).map_or(&[], |n| n.children.as_slice())
    }

    /// Whether `entity` is `ancestor` or lies below it in the hierarchy.
    #[must_use]
    pub fn is_descendant_of(&self, entity: Entity, ancestor: Entity) -> bool {
        let mut current = Some(entity);
        while let Some(e) = current {
            if e == ancestor {
                return true;
            }
            current = self.parent(e);
        }
        false
    }

    /// Transform relative to the parent.
    #[must_use]
    pub fn local(&self, entity: Entity) -> Option<&Transform> {
        self.node(entity).map(|n| &n.local)
    }

    /// Mutable transform relative to the parent.
    pub fn local_mut(&mut self, entity: Entity) -> Option<&mut Transform> {
        self.nodes.get_mut(entity.0 as usize).map(|n| &mut n.local)
    }

    /// Transform in world space, composed through all ancestors.
    #[must_use]
    pub fn world_transform(&self, entity: Entity) -> Option<Transform> {
        let node = self.node(entity)?;
        match node.parent {
            Some(parent) => Some(self.world_transform(parent)?.mul_transform(&node.local)),
            None => Some(node.local),
        }
    }

    /// World-space position.
    #[must_use]
    pub fn world_position(&self, entity: Entity) -> Option<Vec3> {
        self.world_transform(entity).map(|t| t.translation)
    }

    /// Moves `entity` by a world-space delta.
    pub fn translate(&mut self, entity: Entity, delta: Vec3) -> Result<(), SceneError> {
        let local_delta = match self.parent(entity) {
            Some(parent) => {
                let parent_world = self
                    .world_transform(parent)
                    .ok_or(SceneError::UnknownEntity(parent))?;
                parent_world.rotation.inverse() * delta
            }
            None => delta,
        };
        self.local_mut(entity)
            .ok_or(SceneError::UnknownEntity(entity))?
            .translate(local_delta);
        Ok(())
    }

    /// Sets the orientation of `entity` relative to its parent.
    pub fn set_rotation(&mut self, entity: Entity, rotation: Quat) -> Result<(), SceneError> {
        self.local_mut(entity)
            .ok_or(SceneError::UnknownEntity(entity))?
            .rotation = rotation.normalize();
        Ok(())
    }

    /// Iterates over all entities in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        (0..self.nodes.len() as u32).map(Entity)
    }

    fn node(&self, entity: Entity) -> Option<&Node> {
        self.nodes.get(entity.0 as usize)
    }
}

//! ECS World implementation

use super::component::{Component, ComponentKind, StoredComponent};
use super::entity::EntityId;
use super::query::Query;
use std::any::TypeId;
use std::collections::HashMap;

/// Components attached to a single entity, at most one per kind
#[derive(Default)]
struct EntityRecord {
    components: HashMap<TypeId, Box<dyn StoredComponent>>,
}

impl EntityRecord {
    fn detach_all(&mut self) {
        for component in self.components.values_mut() {
            component.detach();
        }
        self.components.clear();
    }
}

/// ECS World containing all entities and components
///
/// The world is single-owner: all structural changes go through `&mut World`,
/// so a tick's systems and the network drain never overlap.
#[derive(Default)]
pub struct World {
    /// Live entities in creation order
    order: Vec<EntityId>,
    entities: HashMap<EntityId, EntityRecord>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new entity, generating an id when none is given
    ///
    /// Creating an id that is already live leaves the existing entity untouched.
    pub fn create_entity(&mut self, id: Option<EntityId>) -> EntityId {
        let id = id.unwrap_or_else(EntityId::generate);
        if self.entities.contains_key(&id) {
            log::warn!("Entity {} already exists, keeping existing components", id);
            return id;
        }

        self.entities.insert(id.clone(), EntityRecord::default());
        self.order.push(id.clone());
        log::trace!("Created entity {}", id);
        id
    }

    /// Check whether an entity is live
    pub fn contains(&self, entity: &EntityId) -> bool {
        self.entities.contains_key(entity)
    }

    /// Add a component to an entity, replacing any component of the same kind
    ///
    /// The replaced component is detached. Returns `false` when the entity is not live.
    pub fn add_component<T: Component>(&mut self, entity: &EntityId, component: T) -> bool {
        let Some(record) = self.entities.get_mut(entity) else {
            log::debug!(
                "Dropping {:?} for missing entity {}",
                ComponentKind::of::<T>(),
                entity
            );
            return false;
        };

        if let Some(mut previous) = record.components.insert(TypeId::of::<T>(), Box::new(component)) {
            previous.detach();
        }
        true
    }

    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: &EntityId) -> Option<&T> {
        self.entities
            .get(entity)?
            .components
            .get(&TypeId::of::<T>())?
            .as_any()
            .downcast_ref::<T>()
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: &EntityId) -> Option<&mut T> {
        self.entities
            .get_mut(entity)?
            .components
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<T>()
    }

    /// Check whether an entity has a component of type `T`
    pub fn has_component<T: Component>(&self, entity: &EntityId) -> bool {
        self.has_kind(entity, ComponentKind::of::<T>())
    }

    /// Remove a component from an entity, handing ownership back to the caller
    ///
    /// The component is not detached; it releases its resources when dropped.
    pub fn remove_component<T: Component>(&mut self, entity: &EntityId) -> Option<T> {
        let boxed = self
            .entities
            .get_mut(entity)?
            .components
            .remove(&TypeId::of::<T>())?;
        boxed.into_any().downcast::<T>().ok().map(|component| *component)
    }

    /// Remove an entity, detaching all of its components
    ///
    /// Removing an entity that is not live is a no-op and returns `false`.
    pub fn remove_entity(&mut self, entity: &EntityId) -> bool {
        let Some(mut record) = self.entities.remove(entity) else {
            return false;
        };

        record.detach_all();
        self.order.retain(|id| id != entity);
        log::trace!("Removed entity {}", entity);
        true
    }

    /// Remove every entity
    pub fn clear(&mut self) {
        for record in self.entities.values_mut() {
            record.detach_all();
        }
        self.entities.clear();
        self.order.clear();
    }

    /// Query entities having ALL of the given component kinds
    pub fn query(&self, kinds: &[ComponentKind]) -> Query<'_> {
        Query::new(self, kinds)
    }

    /// Snapshot of the ids matching `kinds`, for systems that mutate while iterating
    pub fn query_ids(&self, kinds: &[ComponentKind]) -> Vec<EntityId> {
        self.query(kinds).cloned().collect()
    }

    /// Get an iterator over all entities
    pub fn entities(&self) -> impl Iterator<Item = &EntityId> {
        self.order.iter()
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check whether the world has no entities
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub(super) fn order(&self) -> &[EntityId] {
        &self.order
    }

    pub(super) fn has_kind(&self, entity: &EntityId, kind: ComponentKind) -> bool {
        self.entities
            .get(entity)
            .is_some_and(|record| record.components.contains_key(&kind.type_id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug, PartialEq)]
    struct Health(u32);
    impl Component for Health {}

    #[derive(Debug, PartialEq)]
    struct Tag;
    impl Component for Tag {}

    struct Tracked {
        detached: Arc<AtomicUsize>,
    }

    impl Component for Tracked {
        fn detach(&mut self) {
            self.detached.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_create_entity_with_and_without_id() {
        let mut world = World::new();
        let given = world.create_entity(Some(EntityId::from("a1")));
        let generated = world.create_entity(None);

        assert_eq!(given.as_str(), "a1");
        assert!(!generated.as_str().is_empty());
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn test_create_existing_id_keeps_components() {
        let mut world = World::new();
        let id = world.create_entity(Some("a1".into()));
        world.add_component(&id, Health(5));

        world.create_entity(Some("a1".into()));
        assert_eq!(world.len(), 1);
        assert_eq!(world.get_component::<Health>(&id), Some(&Health(5)));
    }

    #[test]
    fn test_add_component_replaces_same_kind() {
        let mut world = World::new();
        let id = world.create_entity(None);

        assert!(world.add_component(&id, Health(10)));
        assert!(world.add_component(&id, Health(3)));

        assert_eq!(world.get_component::<Health>(&id), Some(&Health(3)));
    }

    #[test]
    fn test_replacing_detaches_previous_component() {
        let detached = Arc::new(AtomicUsize::new(0));
        let mut world = World::new();
        let id = world.create_entity(None);

        world.add_component(&id, Tracked { detached: Arc::clone(&detached) });
        world.add_component(&id, Tracked { detached: Arc::clone(&detached) });

        assert_eq!(detached.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_add_component_to_missing_entity() {
        let mut world = World::new();
        assert!(!world.add_component(&EntityId::from("ghost"), Health(1)));
        assert!(world.is_empty());
    }

    #[test]
    fn test_get_component_mut() {
        let mut world = World::new();
        let id = world.create_entity(None);
        world.add_component(&id, Health(10));

        world.get_component_mut::<Health>(&id).unwrap().0 -= 4;
        assert_eq!(world.get_component::<Health>(&id), Some(&Health(6)));
        assert!(world.get_component::<Tag>(&id).is_none());
    }

    #[test]
    fn test_remove_component_returns_ownership() {
        let mut world = World::new();
        let id = world.create_entity(None);
        world.add_component(&id, Health(7));

        assert_eq!(world.remove_component::<Health>(&id), Some(Health(7)));
        assert!(!world.has_component::<Health>(&id));
        assert!(world.contains(&id));
    }

    #[test]
    fn test_remove_entity_is_idempotent_and_detaches() {
        let detached = Arc::new(AtomicUsize::new(0));
        let mut world = World::new();
        let id = world.create_entity(None);
        world.add_component(&id, Tracked { detached: Arc::clone(&detached) });

        assert!(world.remove_entity(&id));
        assert!(!world.remove_entity(&id));

        assert_eq!(detached.load(Ordering::SeqCst), 1);
        assert!(!world.contains(&id));
        assert!(world.get_component::<Tracked>(&id).is_none());
    }

    #[test]
    fn test_query_requires_all_kinds() {
        let mut world = World::new();
        let both = world.create_entity(Some("both".into()));
        let only_health = world.create_entity(Some("health".into()));
        world.add_component(&both, Health(1));
        world.add_component(&both, Tag);
        world.add_component(&only_health, Health(1));

        let ids = world.query_ids(&[ComponentKind::of::<Health>(), ComponentKind::of::<Tag>()]);
        assert_eq!(ids, vec![both]);

        let healthy = world.query(&[ComponentKind::of::<Health>()]).count();
        assert_eq!(healthy, 2);
    }

    #[test]
    fn test_query_sees_structural_changes() {
        let mut world = World::new();
        let id = world.create_entity(None);
        let kinds = [ComponentKind::of::<Tag>()];

        assert_eq!(world.query(&kinds).count(), 0);
        world.add_component(&id, Tag);
        assert_eq!(world.query(&kinds).count(), 1);
        world.remove_entity(&id);
        assert_eq!(world.query(&kinds).count(), 0);
    }

    #[test]
    fn test_clear_detaches_everything() {
        let detached = Arc::new(AtomicUsize::new(0));
        let mut world = World::new();
        for _ in 0..3 {
            let id = world.create_entity(None);
            world.add_component(&id, Tracked { detached: Arc::clone(&detached) });
        }

        world.clear();
        assert!(world.is_empty());
        assert_eq!(detached.load(Ordering::SeqCst), 3);
    }
}

//! Query over entities having a set of component kinds

use super::component::ComponentKind;
use super::entity::EntityId;
use super::world::World;

/// Lazy query for entities having ALL requested component kinds
///
/// Nothing is cached: every query walks the world as it is when iterated.
pub struct Query<'w> {
    world: &'w World,
    kinds: Vec<ComponentKind>,
    position: usize,
}

impl<'w> Query<'w> {
    pub(super) fn new(world: &'w World, kinds: &[ComponentKind]) -> Self {
        Self {
            world,
            kinds: kinds.to_vec(),
            position: 0,
        }
    }
}

impl<'w> Iterator for Query<'w> {
    type Item = &'w EntityId;

    fn next(&mut self) -> Option<Self::Item> {
        let world: &'w World = self.world;
        let order = world.order();
        while self.position < order.len() {
            let entity = &order[self.position];
            self.position += 1;
            if self.kinds.iter().all(|kind| world.has_kind(entity, *kind)) {
                return Some(entity);
            }
        }
        None
    }
}

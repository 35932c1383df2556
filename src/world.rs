use std::collections::{HashMap, HashSet};

use glam::{Quat, Vec3};
use log::{debug, error, trace};

use crate::{
    collision::{
        bounds::WorldBounds,
        events::{EventSlot, PairKey, TriggerEventPool, TriggerState},
        queries::{Ray, RaycastHit},
    },
    config::DEFAULT_EVENT_CAPACITY,
    core::{
        collider::Collider,
        shape::{ColliderShape, ShapeId},
    },
    error::{PhysicsError, Result},
    utils::{
        allocator::{Arena, ColliderHandle},
        disordered::DisorderedArray,
        logging::ScopedTimer,
    },
};

/// Callback receiving the ordered `(lo, hi)` ids of a trigger pair.
pub type TriggerCallback = Box<dyn FnMut(ShapeId, ShapeId)>;

/// Optional enter/exit/stay observers. A missing callback silences that transition only.
#[derive(Default)]
pub struct TriggerCallbacks {
    pub on_enter: Option<TriggerCallback>,
    pub on_exit: Option<TriggerCallback>,
    pub on_stay: Option<TriggerCallback>,
}

fn emit(callback: &mut Option<TriggerCallback>, pair: PairKey) {
    if let Some(callback) = callback.as_mut() {
        callback(pair.lo(), pair.hi());
    }
}

/// Owns the tracked colliders and turns per-step overlap observations into
/// enter/stay/exit trigger callbacks.
///
/// Every step tests all registered shape pairs (O(n²)); it is meant for small scenes.
/// Callbacks are stored inside the manager, so they cannot reach back into it and
/// change membership while the sweep is running.
pub struct PhysicsManager {
    colliders: Arena<Collider>,
    tracked: Vec<ColliderHandle>,
    registered: HashSet<ShapeId>,
    event_map: HashMap<PairKey, EventSlot>,
    active_events: DisorderedArray<EventSlot>,
    event_pool: TriggerEventPool,
    callbacks: TriggerCallbacks,
    scan: Vec<(ShapeId, WorldBounds)>,
}

impl Default for PhysicsManager {
    fn default() -> Self {
        Self::new(TriggerCallbacks::default())
    }
}

impl PhysicsManager {
    pub fn new(callbacks: TriggerCallbacks) -> Self {
        Self {
            colliders: Arena::new(),
            tracked: Vec::new(),
            registered: HashSet::new(),
            event_map: HashMap::new(),
            active_events: DisorderedArray::with_capacity(DEFAULT_EVENT_CAPACITY),
            event_pool: TriggerEventPool::new(),
            callbacks,
            scan: Vec::new(),
        }
    }

    pub fn builder() -> PhysicsManagerBuilder {
        PhysicsManagerBuilder::default()
    }

    /// Gravity needs a dynamics backend; always fails.
    pub fn set_gravity(&mut self, _gravity: Vec3) -> Result<()> {
        Err(PhysicsError::unsupported("gravity"))
    }

    /// Starts tracking a collider. Shapes whose ids are already held by another tracked
    /// collider are detached from it first.
    pub fn add_collider(&mut self, collider: Collider) -> ColliderHandle {
        for shape in collider.shapes() {
            self.detach_from_others(shape.id(), None);
        }
        let handle = self.colliders.insert(collider);
        self.tracked.push(handle);
        debug!("tracking collider {handle:?}");
        handle
    }

    /// Stops tracking a collider and hands it back. Events involving its shapes exit on
    /// the next [`PhysicsManager::update`].
    pub fn remove_collider(&mut self, handle: ColliderHandle) -> Option<Collider> {
        let collider = self.colliders.remove(handle)?;
        self.tracked.retain(|tracked| *tracked != handle);
        debug!("untracked collider {handle:?}");
        Some(collider)
    }

    pub fn collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle)
    }

    /// Moves a tracked collider. Its pairs are re-evaluated on the next update.
    pub fn set_collider_transform(
        &mut self,
        handle: ColliderHandle,
        position: Vec3,
        rotation: Quat,
    ) -> Result<()> {
        self.colliders
            .get_mut(handle)
            .ok_or(PhysicsError::UnknownCollider(handle))?
            .set_world_transform(position, rotation);
        Ok(())
    }

    /// Geometry access to an attached shape. Membership changes go through
    /// [`PhysicsManager::attach_shape`] and [`PhysicsManager::detach_shape`].
    pub fn shape_mut(&mut self, handle: ColliderHandle, id: ShapeId) -> Option<&mut ColliderShape> {
        self.colliders.get_mut(handle)?.shape_mut(id)
    }

    /// Tracked collider handles in insertion order.
    pub fn colliders(&self) -> &[ColliderHandle] {
        &self.tracked
    }

    /// Attaches `shape` to a tracked collider, moving any same-id shape off whichever
    /// other tracked collider held it. A same-id shape already on `handle` is replaced in
    /// place and returned.
    pub fn attach_shape(
        &mut self,
        handle: ColliderHandle,
        shape: ColliderShape,
    ) -> Result<Option<ColliderShape>> {
        if !self.colliders.contains(handle) {
            return Err(PhysicsError::UnknownCollider(handle));
        }
        self.detach_from_others(shape.id(), Some(handle));
        Ok(self
            .colliders
            .get_mut(handle)
            .ok_or(PhysicsError::UnknownCollider(handle))?
            .add_shape(shape))
    }

    pub fn detach_shape(&mut self, handle: ColliderHandle, id: ShapeId) -> Option<ColliderShape> {
        self.colliders.get_mut(handle)?.remove_shape(id)
    }

    /// Tracked collider currently owning the shape with `id`.
    pub fn shape_owner(&self, id: ShapeId) -> Option<ColliderHandle> {
        self.tracked.iter().copied().find(|handle| {
            self.colliders
                .get(*handle)
                .is_some_and(|collider| collider.contains_shape(id))
        })
    }

    fn detach_from_others(&mut self, id: ShapeId, keep: Option<ColliderHandle>) {
        for handle in &self.tracked {
            if Some(*handle) == keep {
                continue;
            }
            if let Some(collider) = self.colliders.get_mut(*handle) {
                if collider.remove_shape(id).is_some() {
                    debug!("shape {id} moved off collider {handle:?}");
                }
            }
        }
    }

    /// Registers a shape id so it takes part in overlap detection.
    pub fn add_collider_shape(&mut self, id: ShapeId) {
        if self.registered.insert(id) {
            debug!("registered shape {id}");
        }
    }

    /// Unregisters a shape id and extinguishes every live event that references it,
    /// firing the exit callback for each.
    pub fn remove_collider_shape(&mut self, id: ShapeId) {
        if !self.registered.remove(&id) {
            return;
        }
        debug!("unregistered shape {id}");

        let mut index = 0;
        while let Some(&slot) = self.active_events.get(index) {
            let pair = self.event_pool.get(slot).pair;
            if pair.involves(id) {
                debug!("extinguishing trigger pair ({}, {})", pair.lo(), pair.hi());
                self.retire_event(index, slot);
            } else {
                index += 1;
            }
        }
    }

    pub fn is_shape_registered(&self, id: ShapeId) -> bool {
        self.registered.contains(&id)
    }

    /// Runs one detection step. `delta_time` is accepted for symmetry with dynamics
    /// managers; detection does not integrate anything.
    pub fn update(&mut self, _delta_time: f32) {
        {
            let _timer = ScopedTimer::new("trigger::scan");
            self.gather_bounds();
            self.detect_overlaps();
        }
        let _timer = ScopedTimer::new("trigger::sweep");
        self.fire_events();
    }

    fn gather_bounds(&mut self) {
        self.scan.clear();
        for handle in &self.tracked {
            let Some(collider) = self.colliders.get(*handle) else {
                continue;
            };
            for shape in collider.shapes() {
                if !self.registered.contains(&shape.id()) {
                    trace!("skipping unregistered shape {}", shape.id());
                    continue;
                }
                self.scan.push((shape.id(), shape.compute_world_bounds(collider.transform())));
            }
        }
    }

    fn detect_overlaps(&mut self) {
        let Self {
            scan,
            event_map,
            active_events,
            event_pool,
            ..
        } = self;

        for (my_id, my_bounds) in scan.iter() {
            for (other_id, other_bounds) in scan.iter() {
                if my_id == other_id {
                    continue;
                }
                let pair = PairKey::new(*my_id, *other_id);
                let existing = event_map.get(&pair).copied();
                if let Some(slot) = existing {
                    // Already confirmed through the mirrored ordering this step.
                    if !event_pool.get(slot).pending_confirmation {
                        continue;
                    }
                }
                if !my_bounds.overlaps(other_bounds) {
                    continue;
                }

                match existing {
                    None => {
                        let slot = event_pool.acquire(pair);
                        event_map.insert(pair, slot);
                        active_events.add(slot);
                    }
                    Some(slot) => {
                        let event = event_pool.get_mut(slot);
                        if event.state == TriggerState::Enter {
                            event.state = TriggerState::Stay;
                        }
                        event.pending_confirmation = false;
                    }
                }
            }
        }
    }

    fn fire_events(&mut self) {
        let mut index = 0;
        while let Some(&slot) = self.active_events.get(index) {
            let event = self.event_pool.get_mut(slot);
            if event.pending_confirmation {
                self.retire_event(index, slot);
                continue;
            }

            event.pending_confirmation = true;
            let (pair, state) = (event.pair, event.state);
            match state {
                TriggerState::Enter => emit(&mut self.callbacks.on_enter, pair),
                TriggerState::Stay => emit(&mut self.callbacks.on_stay, pair),
                TriggerState::Exit => {
                    error!("exited event for ({}, {}) left in the active set", pair.lo(), pair.hi());
                    debug_assert!(false, "exited event left in the active set");
                }
            }
            index += 1;
        }
    }

    /// Moves the event at `index` to `Exit`, reports it, and returns it to the pool.
    /// The slot at `index` then holds a different event (or nothing).
    fn retire_event(&mut self, index: usize, slot: EventSlot) {
        let event = self.event_pool.get_mut(slot);
        event.state = TriggerState::Exit;
        let pair = event.pair;

        let removed = self.event_map.remove(&pair);
        if removed != Some(slot) {
            error!(
                "pair map out of sync for ({}, {}): expected slot {slot}, found {removed:?}",
                pair.lo(),
                pair.hi()
            );
            debug_assert!(false, "pair map out of sync for ({}, {})", pair.lo(), pair.hi());
        }
        emit(&mut self.callbacks.on_exit, pair);
        self.active_events.delete_by_index(index);
        self.event_pool.release(slot);
    }

    /// Current state of the pair `(a, b)` if it has a live event.
    pub fn trigger_state(&self, a: ShapeId, b: ShapeId) -> Option<TriggerState> {
        self.event_map
            .get(&PairKey::new(a, b))
            .map(|slot| self.event_pool.get(*slot).state)
    }

    /// Events currently in `Enter` or `Stay`.
    pub fn active_event_count(&self) -> usize {
        self.active_events.len()
    }

    /// Recycled events waiting in the free list.
    pub fn pooled_event_count(&self) -> usize {
        self.event_pool.pooled_count()
    }

    /// Closest hit strictly nearer than `max_distance` across all tracked colliders.
    pub fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RaycastHit> {
        let mut bound = max_distance;
        let mut closest = None;
        for hit in self.collider_hits(ray) {
            if hit.distance < bound {
                bound = hit.distance;
                closest = Some(hit);
            }
        }
        closest
    }

    /// Whether any tracked shape is hit nearer than `max_distance`. Stops at the first.
    pub fn raycast_any(&self, ray: &Ray, max_distance: f32) -> bool {
        self.collider_hits(ray).any(|hit| hit.distance < max_distance)
    }

    /// Closest-hit query reporting `(shape_id, distance, point, normal)` to `on_hit`.
    pub fn raycast_with<F>(&self, ray: &Ray, max_distance: f32, on_hit: F) -> bool
    where
        F: FnOnce(ShapeId, f32, Vec3, Vec3),
    {
        match self.raycast(ray, max_distance) {
            Some(hit) => {
                on_hit(hit.shape_id, hit.distance, hit.point, hit.normal);
                true
            }
            None => false,
        }
    }

    fn collider_hits<'a>(&'a self, ray: &'a Ray) -> impl Iterator<Item = RaycastHit> + 'a {
        self.tracked
            .iter()
            .filter_map(move |handle| self.colliders.get(*handle))
            .filter_map(move |collider| collider.raycast(ray))
    }
}

/// Builder wiring optional trigger callbacks into a [`PhysicsManager`].
#[derive(Default)]
pub struct PhysicsManagerBuilder {
    callbacks: TriggerCallbacks,
}

impl PhysicsManagerBuilder {
    pub fn on_trigger_enter<F>(mut self, callback: F) -> Self
    where
        F: FnMut(ShapeId, ShapeId) + 'static,
    {
        self.callbacks.on_enter = Some(Box::new(callback));
        self
    }

    pub fn on_trigger_exit<F>(mut self, callback: F) -> Self
    where
        F: FnMut(ShapeId, ShapeId) + 'static,
    {
        self.callbacks.on_exit = Some(Box::new(callback));
        self
    }

    pub fn on_trigger_stay<F>(mut self, callback: F) -> Self
    where
        F: FnMut(ShapeId, ShapeId) + 'static,
    {
        self.callbacks.on_stay = Some(Box::new(callback));
        self
    }

    pub fn build(self) -> PhysicsManager {
        PhysicsManager::new(self.callbacks)
    }
}

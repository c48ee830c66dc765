//! Player collision scanning
//!
//! Traffic is scanned in a fixed priority order (cars, then bikes, then
//! pedestrians) and only the FIRST hit is reported; the frame resolves at
//! most one traffic collision, so simultaneous overlaps never cost two
//! lives. Canister pickups are a separate, non-exclusive pass.

use super::rect::Rect;
use super::state::{TrafficKind, World};

/// The first traffic entity overlapping the player this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrafficHit {
    pub kind: TrafficKind,
    /// Index into the kind's entity list
    pub index: usize,
    pub variant: usize,
}

/// Scan all live traffic against the player rect in priority order
pub fn first_traffic_hit(player: &Rect, world: &World) -> Option<TrafficHit> {
    let groups = [
        (TrafficKind::Car, &world.cars),
        (TrafficKind::Bike, &world.bikes),
        (TrafficKind::Pedestrian, &world.pedestrians),
    ];
    for (kind, entities) in groups {
        for (index, entity) in entities.iter().enumerate() {
            if player.intersects(&entity.rect) {
                return Some(TrafficHit {
                    kind,
                    index,
                    variant: entity.variant,
                });
            }
        }
    }
    None
}

/// Collect every canister overlapping the player; returns how many were
/// picked up. Collection never ends the frame early.
pub fn collect_canisters(player: &Rect, world: &mut World) -> usize {
    let before = world.canisters.len();
    world.canisters.retain(|c| !player.intersects(&c.rect));
    before - world.canisters.len()
}

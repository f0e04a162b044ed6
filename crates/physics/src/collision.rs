//! Collision groups and circular hit tests.

use glam::Vec2;

/// Radius around a ship inside which a projectile counts as a hit.
pub const SHIP_HIT_RADIUS: f32 = 20.0;

/// Collision groups for the different bodies in local space.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroup {
    /// The player's ship
    Player = 1 << 0,
    /// NPC ships (traders, patrols, pirates)
    Npc = 1 << 1,
    /// Projectiles fired by the player
    PlayerProjectile = 1 << 2,
    /// Projectiles fired by NPCs
    NpcProjectile = 1 << 3,
}

/// Membership and filter bits for one body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionGroups {
    pub membership: u32,
    pub filter: u32,
}

impl InteractionGroups {
    /// Whether two bodies are allowed to interact.
    pub fn test(self, other: InteractionGroups) -> bool {
        (self.membership & other.filter) != 0 && (other.membership & self.filter) != 0
    }
}

impl CollisionGroup {
    fn bits(self) -> u32 {
        self as u32
    }

    /// Player ship: hit by NPC projectiles only.
    pub fn player() -> InteractionGroups {
        InteractionGroups {
            membership: Self::Player.bits(),
            filter: Self::NpcProjectile.bits(),
        }
    }

    /// NPC ship: hit by player projectiles only.
    pub fn npc() -> InteractionGroups {
        InteractionGroups {
            membership: Self::Npc.bits(),
            filter: Self::PlayerProjectile.bits(),
        }
    }

    /// Player projectiles hit NPCs.
    pub fn player_projectile() -> InteractionGroups {
        InteractionGroups {
            membership: Self::PlayerProjectile.bits(),
            filter: Self::Npc.bits(),
        }
    }

    /// NPC projectiles hit the player.
    pub fn npc_projectile() -> InteractionGroups {
        InteractionGroups {
            membership: Self::NpcProjectile.bits(),
            filter: Self::Player.bits(),
        }
    }
}

/// Point-in-circle test used for projectile hits.
pub fn circle_contains(center: Vec2, radius: f32, point: Vec2) -> bool {
    center.distance_squared(point) < radius * radius
}

/// Index of the first target (in iteration order) whose hit circle contains `point`.
///
/// This is deliberately first-match, not nearest-match: when two targets overlap
/// the one earlier in the list takes the hit.
pub fn first_hit<I>(point: Vec2, radius: f32, targets: I) -> Option<usize>
where
    I: IntoIterator<Item = Vec2>,
{
    targets
        .into_iter()
        .position(|center| circle_contains(center, radius, point))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projectile_groups_only_hit_opponents() {
        assert!(CollisionGroup::player_projectile().test(CollisionGroup::npc()));
        assert!(!CollisionGroup::player_projectile().test(CollisionGroup::player()));
        assert!(CollisionGroup::npc_projectile().test(CollisionGroup::player()));
        assert!(!CollisionGroup::npc_projectile().test(CollisionGroup::npc()));
    }

    #[test]
    fn circle_edge_is_exclusive() {
        assert!(circle_contains(Vec2::ZERO, 20.0, Vec2::new(19.9, 0.0)));
        assert!(!circle_contains(Vec2::ZERO, 20.0, Vec2::new(20.0, 0.0)));
    }

    #[test]
    fn first_hit_prefers_list_order_over_distance() {
        let targets = [Vec2::new(15.0, 0.0), Vec2::new(1.0, 0.0)];
        assert_eq!(first_hit(Vec2::ZERO, SHIP_HIT_RADIUS, targets), Some(0));
    }

    #[test]
    fn first_hit_none_when_clear() {
        let targets = [Vec2::new(100.0, 0.0)];
        assert_eq!(first_hit(Vec2::ZERO, SHIP_HIT_RADIUS, targets), None);
    }
}

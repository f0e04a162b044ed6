//! NPC steering: hostile pursuit and passive wandering.
//!
//! Both behaviours steer through the same kinematics as the player: heading
//! turns are capped per tick and snap onto the target bearing, thrust adds
//! along the heading, and friction decays momentum before integration.

use engine_core::{angle_delta, bearing};
use glam::Vec2;
use physics::{integrate, thrust, turn_towards, NPC_FRICTION};
use rand::Rng;

use crate::npc::{AiPattern, Npc};
use crate::spawner::ARENA_HALF_EXTENTS;

/// Per-tick acceleration as a fraction of top speed while hostile.
const HOSTILE_THRUST: f32 = 0.06;
/// Heading drift per tick while circling a close target.
const CIRCLE_DRIFT: f32 = 0.02;
/// Fire only when the heading is within this many radians of the target.
pub const FIRE_ALIGNMENT: f32 = 0.3;
/// Cowards break off below this fraction of shield.
const COWARD_SHIELD_FRACTION: f32 = 0.2;

/// Passive ships pick a new waypoint within this distance of the current one.
pub const ARRIVAL_RADIUS: f32 = 30.0;
const PASSIVE_THRUST: f32 = 0.02;
const PASSIVE_TURN_FACTOR: f32 = 0.5;
const PASSIVE_SPEED_FACTOR: f32 = 0.5;
/// Chance a new waypoint is next to a station rather than open space.
const STATION_BIAS: f64 = 0.7;
const STATION_SCATTER: f32 = 50.0;
/// Open-space waypoints stay this far inside the arena.
const WANDER_FRACTION: f32 = 0.6;

/// Steer a hostile NPC at `target`. Returns true when it has a firing solution.
pub fn steer_hostile(npc: &mut Npc, target: Vec2, dt: f32) -> bool {
    let profile = npc.pattern.profile();
    let distance = npc.transform.position.distance(target);
    let accel = npc.speed * HOSTILE_THRUST;
    let max_turn = npc.turn_speed * dt;

    if npc.pattern == AiPattern::Coward && npc.durability.shield_fraction() < COWARD_SHIELD_FRACTION {
        let away = bearing(target, npc.transform.position);
        turn_towards(&mut npc.transform, away, max_turn);
        thrust(&npc.transform, &mut npc.velocity, accel, npc.speed);
        integrate(&mut npc.transform, &mut npc.velocity, NPC_FRICTION);
        return false;
    }

    let to_target = npc.transform.bearing_to(target);
    turn_towards(&mut npc.transform, to_target, max_turn);

    if distance > profile.chase_distance {
        thrust(&npc.transform, &mut npc.velocity, accel, npc.speed);
    } else if distance < profile.too_close {
        npc.transform.rotate(CIRCLE_DRIFT);
        thrust(&npc.transform, &mut npc.velocity, accel * 0.5, npc.speed);
    }
    integrate(&mut npc.transform, &mut npc.velocity, NPC_FRICTION);

    let aim_error = angle_delta(npc.transform.angle, npc.transform.bearing_to(target)).abs();
    aim_error < FIRE_ALIGNMENT && distance < profile.fire_range
}

/// Cruise towards the current waypoint, choosing a new one on arrival. Never fires.
pub fn steer_passive<R: Rng>(npc: &mut Npc, stations: &[Vec2], rng: &mut R, dt: f32) {
    if npc.transform.position.distance(npc.waypoint) < ARRIVAL_RADIUS {
        npc.waypoint = pick_waypoint(stations, rng);
    }

    let heading = npc.transform.bearing_to(npc.waypoint);
    turn_towards(&mut npc.transform, heading, npc.turn_speed * dt * PASSIVE_TURN_FACTOR);
    thrust(
        &npc.transform,
        &mut npc.velocity,
        npc.speed * PASSIVE_THRUST,
        npc.speed * PASSIVE_SPEED_FACTOR,
    );
    integrate(&mut npc.transform, &mut npc.velocity, NPC_FRICTION);
}

/// Next wander target: usually beside a station, otherwise open space.
pub fn pick_waypoint<R: Rng>(stations: &[Vec2], rng: &mut R) -> Vec2 {
    if !stations.is_empty() && rng.gen_bool(STATION_BIAS) {
        let station = stations[rng.gen_range(0..stations.len())];
        return station
            + Vec2::new(
                rng.gen_range(-STATION_SCATTER..STATION_SCATTER),
                rng.gen_range(-STATION_SCATTER..STATION_SCATTER),
            );
    }
    let extent = ARENA_HALF_EXTENTS * WANDER_FRACTION;
    Vec2::new(rng.gen_range(-extent.x..extent.x), rng.gen_range(-extent.y..extent.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ShipTypeId;
    use crate::npc::NpcRole;
    use engine_core::Transform;
    use procgen::FactionId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DT: f32 = 1000.0 / 60.0;

    fn pirate_at(position: Vec2, angle: f32) -> Npc {
        Npc::new(
            1,
            NpcRole::Pirate,
            ShipTypeId::Fighter,
            FactionId::Pirates,
            Transform::from_position_angle(position, angle),
        )
    }

    #[test]
    fn pursuit_turn_is_capped() {
        // Target due east, ship facing north: a quarter turn away.
        let mut npc = pirate_at(Vec2::ZERO, 0.0);
        let fire = steer_hostile(&mut npc, Vec2::new(1000.0, 0.0), DT);
        assert!((npc.transform.angle - npc.turn_speed * DT).abs() < 1e-4);
        assert!(!fire);
    }

    #[test]
    fn aligned_and_in_range_fires() {
        let mut npc = pirate_at(Vec2::ZERO, 0.0);
        assert!(steer_hostile(&mut npc, Vec2::new(0.0, -200.0), DT));
    }

    #[test]
    fn out_of_range_holds_fire_but_closes() {
        let mut npc = pirate_at(Vec2::ZERO, 0.0);
        assert!(!steer_hostile(&mut npc, Vec2::new(0.0, -600.0), DT));
        assert!(npc.transform.position.y < 0.0);
    }

    #[test]
    fn close_target_is_circled_not_rammed() {
        // Dead ahead and inside the too-close band.
        let target = Vec2::new(0.0, -50.0);
        assert!(50.0 < AiPattern::Aggressive.profile().too_close);
        let mut npc = pirate_at(Vec2::ZERO, 0.0);
        steer_hostile(&mut npc, target, DT);
        assert!((npc.transform.angle - CIRCLE_DRIFT).abs() < 1e-6);
        assert!(npc.velocity.linear.x > 0.0);
        assert!(npc.velocity.linear.length() > 0.0);

        // Between the bands the ship holds its bearing and coasts.
        let mut holding = pirate_at(Vec2::ZERO, 0.0);
        steer_hostile(&mut holding, Vec2::new(0.0, -120.0), DT);
        assert_eq!(holding.transform.angle, 0.0);
        assert_eq!(holding.velocity.linear, Vec2::ZERO);
    }

    #[test]
    fn broken_coward_runs_away() {
        let mut npc = Npc::new(
            2,
            NpcRole::Trader,
            ShipTypeId::Trader,
            FactionId::Merchants,
            Transform::from_position_angle(Vec2::ZERO, std::f32::consts::PI),
        );
        npc.durability.shield = 0.0;
        // Player to the south; heading PI already points south, away is north.
        for _ in 0..200 {
            assert!(!steer_hostile(&mut npc, Vec2::new(0.0, 100.0), DT));
        }
        assert!(npc.transform.position.y < 0.0);
    }

    #[test]
    fn passive_ship_wanders_without_exceeding_cruise_speed() {
        let mut rng = StdRng::seed_from_u64(11);
        let stations = [Vec2::new(200.0, 0.0)];
        let mut npc = pirate_at(Vec2::ZERO, 0.0);
        for _ in 0..600 {
            steer_passive(&mut npc, &stations, &mut rng, DT);
            assert!(npc.velocity.linear.length() <= npc.speed * PASSIVE_SPEED_FACTOR + 1e-4);
        }
        assert_ne!(npc.waypoint, Vec2::ZERO);
    }

    #[test]
    fn waypoints_stay_inside_the_arena() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let p = pick_waypoint(&[], &mut rng);
            assert!(p.x.abs() <= ARENA_HALF_EXTENTS.x && p.y.abs() <= ARENA_HALF_EXTENTS.y);
        }
    }
}

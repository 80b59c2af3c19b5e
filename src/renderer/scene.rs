//! Frame description
//!
//! Draw order is fixed: blocks, particles, stickman. Every entity is placed
//! with the same `Viewport::world_to_screen` transform.

use glam::Vec2;

use super::DrawSink;
use super::vertex::colors;
use crate::consts::PARTICLE_SIZE;
use crate::sim::{Actor, Viewport, World};

/// Stickman stroke width in pixels
const STROKE: f32 = 3.0;

/// Draw the whole world. Returns the number of blocks drawn.
pub fn draw_world(world: &World, viewport: &Viewport, sink: &mut impl DrawSink) -> usize {
    let blocks = draw_blocks(world, viewport, sink);

    let particle_size = Vec2::splat(PARTICLE_SIZE);
    for p in world.particles.iter() {
        let pos = viewport.world_to_screen(&world.camera, p.pos);
        sink.fill_rect(pos, particle_size, p.color);
    }

    let anchor = viewport.world_to_screen(&world.camera, world.actor.pos);
    draw_stickman(&world.actor, anchor, sink);

    blocks
}

fn draw_blocks(world: &World, viewport: &Viewport, sink: &mut impl DrawSink) -> usize {
    let rect = viewport.cells_to_draw(&world.camera, &world.grid, world.redraw);
    let size = Vec2::splat(viewport.block_size);
    let mut drawn = 0;
    for cell in rect.iter() {
        let Some(kind) = world.grid.get_cell(cell) else {
            continue;
        };
        if kind.is_empty() {
            continue;
        }
        let pos = viewport.world_to_screen(&world.camera, cell.as_vec2());
        sink.fill_rect(pos, size, kind.color());
        drawn += 1;
    }
    drawn
}

/// Head, body, legs and arms around the actor's screen anchor (pixels)
fn draw_stickman(actor: &Actor, anchor: Vec2, sink: &mut impl DrawSink) {
    let c = colors::STICKMAN;
    let at = |dx: f32, dy: f32| anchor + Vec2::new(dx, dy);

    sink.circle(at(0.0, -16.0), 8.0, STROKE, c);
    sink.line(at(0.0, -8.0), at(0.0, 18.0), STROKE, c);

    let hip = at(0.0, 18.0);
    sink.line(hip, at(-6.0, 32.0), STROKE, c);
    sink.line(hip, at(6.0, 32.0), STROKE, c);

    let shoulder = anchor;
    let reach = 10.0 * actor.facing;
    sink.line(shoulder, at(-reach, 8.0), STROKE, c);
    sink.line(shoulder, at(reach, 8.0), STROKE, c);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BlockKind, Grid, RedrawPolicy, World};
    use glam::IVec2;

    #[derive(Debug, PartialEq)]
    enum Cmd {
        Rect(Vec2, Vec2, [f32; 4]),
        Line(Vec2, Vec2),
        Circle(Vec2, f32),
    }

    #[derive(Default)]
    struct Recorder(Vec<Cmd>);

    impl DrawSink for Recorder {
        fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: [f32; 4]) {
            self.0.push(Cmd::Rect(pos, size, color));
        }
        fn line(&mut self, a: Vec2, b: Vec2, _width: f32, _color: [f32; 4]) {
            self.0.push(Cmd::Line(a, b));
        }
        fn circle(&mut self, center: Vec2, radius: f32, _width: f32, _color: [f32; 4]) {
            self.0.push(Cmd::Circle(center, radius));
        }
    }

    fn big_world() -> World {
        // 100x100 solid floor half, above the full-scan threshold
        let grid = Grid::from_fn(100, 100, |_, y| {
            if y >= 50 { BlockKind::Dirt } else { BlockKind::Empty }
        });
        World::from_grid(grid, 1)
    }

    #[test]
    fn test_draw_order() {
        let mut world = big_world();
        world.particles.spawn_burst(IVec2::new(50, 49), [1.0, 0.0, 0.0, 1.0], &mut world.rng);
        let vp = Viewport::new(800.0, 600.0);
        let mut rec = Recorder::default();
        let blocks = draw_world(&world, &vp, &mut rec);

        let particle_size = Vec2::splat(PARTICLE_SIZE);
        let first_particle = rec
            .0
            .iter()
            .position(|c| matches!(c, Cmd::Rect(_, s, _) if *s == particle_size))
            .unwrap();
        assert_eq!(first_particle, blocks);
        assert!(matches!(rec.0[blocks + 8], Cmd::Circle(_, r) if r == 8.0));
        // Head + body + two legs + two arms
        assert_eq!(rec.0.len(), blocks + 8 + 6);
    }

    #[test]
    fn test_culled_pass_draws_visible_blocks() {
        let world = big_world();
        assert_eq!(world.redraw, RedrawPolicy::Culled);
        let vp = Viewport::new(800.0, 600.0);
        let mut rec = Recorder::default();
        let blocks = draw_world(&world, &vp, &mut rec);

        // Far fewer than the 5000 solid cells, but every on-screen one
        assert!(blocks < 1000);
        let size = Vec2::splat(vp.block_size);
        let on_screen = |p: Vec2| {
            p.x + size.x > 0.0 && p.y + size.y > 0.0 && p.x < vp.size.x && p.y < vp.size.y
        };
        let mut expected = 0;
        for y in 0..100 {
            for x in 0..100 {
                let cell = IVec2::new(x, y);
                let p = vp.world_to_screen(&world.camera, cell.as_vec2());
                if world.grid.is_solid(x, y) && on_screen(p) {
                    expected += 1;
                    assert!(rec.0.contains(&Cmd::Rect(p, size, BlockKind::Dirt.color())));
                }
            }
        }
        assert!(expected > 0);
    }

    #[test]
    fn test_full_scan_on_small_grid() {
        let grid = Grid::from_fn(60, 30, |_, y| {
            if y >= 25 { BlockKind::Stone } else { BlockKind::Empty }
        });
        let world = World::from_grid(grid, 2);
        assert_eq!(world.redraw, RedrawPolicy::FullScan);
        let vp = Viewport::new(320.0, 240.0);
        let mut rec = Recorder::default();
        assert_eq!(draw_world(&world, &vp, &mut rec), 60 * 5);
    }

    #[test]
    fn test_arms_follow_facing() {
        let mut world = big_world();
        world.actor.facing = -1.0;
        let vp = Viewport::new(800.0, 600.0);
        let mut rec = Recorder::default();
        draw_world(&world, &vp, &mut rec);
        let anchor = vp.world_to_screen(&world.camera, world.actor.pos);
        let n = rec.0.len();
        assert_eq!(rec.0[n - 2], Cmd::Line(anchor, anchor + Vec2::new(10.0, 8.0)));
        assert_eq!(rec.0[n - 1], Cmd::Line(anchor, anchor + Vec2::new(-10.0, 8.0)));
    }
}

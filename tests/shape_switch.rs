use drawer::agent::AgentState;
use drawer::surface::RecordingSurface;
use drawer::{Scene, SceneConfig};

fn scene(seed: u64) -> Scene {
    let mut config = SceneConfig::default();
    config.canvas.width = 800;
    config.canvas.height = 600;
    config.dots = 5;
    config.seed = seed;
    Scene::new(&config)
}

#[test]
fn agents_wander_in_bounds_until_the_skeleton_swaps() {
    let mut scene = scene(31);
    let before = scene.world().shape;
    let mut surface = RecordingSurface::new();

    scene.request_shape_switch(0.0);

    let mut tick_ms = 100.0;
    while tick_ms < 2000.0 {
        scene.tick(tick_ms, &mut surface);
        for agent in scene.agents() {
            assert!(
                matches!(agent.state(), AgentState::Transitioning { .. }),
                "agent {} left the transition early at {tick_ms} ms",
                agent.id()
            );
            let (x, y) = agent.position();
            assert!((0.0..=800.0).contains(&x), "x escaped the canvas: {x}");
            assert!((0.0..=600.0).contains(&y), "y escaped the canvas: {y}");
        }
        tick_ms += 100.0;
    }
    assert_eq!(scene.world().shape, before, "swap must wait out the delay");

    scene.tick(2001.0, &mut surface);
    assert_eq!(scene.world().shape, before.successor());
    for agent in scene.agents() {
        assert_eq!(agent.state(), AgentState::Steady);
    }
}

#[test]
fn a_second_request_replaces_the_pending_swap() {
    let mut scene = scene(8);
    let before = scene.world().shape;
    let mut surface = RecordingSurface::new();

    scene.request_shape_switch(0.0);
    scene.request_shape_switch(1000.0);

    scene.tick(2500.0, &mut surface);
    assert_eq!(
        scene.world().shape,
        before,
        "the first due time must have been dropped"
    );

    scene.tick(3001.0, &mut surface);
    assert_eq!(scene.world().shape, before.successor());
}

#[test]
fn skeleton_is_regenerated_not_mutated() {
    let mut scene = scene(77);
    let skeleton_before = scene.world().skeleton.clone();
    let mut surface = RecordingSurface::new();

    scene.request_shape_switch(0.0);
    scene.tick(2000.0, &mut surface);

    assert_eq!(scene.world().skeleton.len(), skeleton_before.len());
    assert_ne!(scene.world().skeleton, skeleton_before);
}

#[test]
fn consecutive_switches_cycle_through_all_shapes() {
    let mut scene = scene(3);
    let start = scene.world().shape;
    let mut surface = RecordingSurface::new();

    let mut now_ms = 0.0;
    let mut seen = vec![start];
    for _ in 0..5 {
        scene.request_shape_switch(now_ms);
        now_ms += 2500.0;
        scene.tick(now_ms, &mut surface);
        seen.push(scene.world().shape);
    }

    assert_eq!(seen.first(), seen.last(), "five switches close the cycle");
    let mut unique = seen.clone();
    unique.pop();
    unique.sort_by_key(|shape| shape.label());
    unique.dedup();
    assert_eq!(unique.len(), 5, "each shape appears exactly once per cycle");
}

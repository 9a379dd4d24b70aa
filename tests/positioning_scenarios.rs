//! Integration tests driving positioners through an in-memory scene.
//!
//! Each test builds a small element tree, runs one update and checks the
//! offset written to the floating box against hand-computed geometry.

use pretty_assertions::assert_eq;

use tether::{
    Edges, ElementId, LayoutHost, MinContact, NodeStyle, Offset, Placement, Point, Position,
    Positioner, PositionerConfig, Rect, Scene, SceneElement, ScrollbarCache, Scrollbars, Settings,
    Side, UpdateOutcome, Viewport,
};

fn viewport(width: f64, height: f64) -> Viewport {
    Viewport {
        width,
        height,
        ..Viewport::default()
    }
}

/// Scene with a reference box and a floating box of the given sizes
fn scene_with(reference: Rect, node_size: (f64, f64)) -> (Scene, ElementId, ElementId) {
    let mut scene = Scene::new(viewport(800.0, 600.0));
    let reference = scene.add("reference", SceneElement::new(reference));
    let node = scene.add(
        "node",
        SceneElement::new(Rect::new(0.0, 0.0, node_size.0, node_size.1)),
    );
    (scene, reference, node)
}

fn run(scene: &mut Scene, node: ElementId, settings: Settings) -> UpdateOutcome {
    let mut positioner = Positioner::new(node, settings).expect("valid settings");
    positioner
        .update(scene, &ScrollbarCache::new())
        .expect("update should succeed")
}

fn applied(outcome: &UpdateOutcome) -> &tether::PositionResult {
    outcome.result().expect("update should apply")
}

#[test]
fn test_simple_bottom_center() {
    let (mut scene, reference, node) = scene_with(Rect::new(0.0, 0.0, 100.0, 20.0), (50.0, 10.0));
    let outcome = run(&mut scene, node, Settings::new(reference));

    let result = applied(&outcome);
    assert_eq!(result.placement, Side::Bottom);
    assert_eq!(result.offset, Offset::new(25, 20));
    assert_eq!(
        scene.style(node),
        Some(&NodeStyle::Transform(Offset::new(25, 20)))
    );
    assert_eq!(scene.measure(node), Rect::new(25.0, 20.0, 50.0, 10.0));
}

#[test]
fn test_flip_each_side() {
    // Reference hugging each edge of the viewport; requesting that edge's side flips
    let cases = [
        (Rect::new(375.0, 5.0, 50.0, 20.0), Placement::Top, Side::Bottom),
        (Rect::new(375.0, 575.0, 50.0, 20.0), Placement::Bottom, Side::Top),
        (Rect::new(5.0, 290.0, 20.0, 20.0), Placement::Left, Side::Right),
        (Rect::new(775.0, 290.0, 20.0, 20.0), Placement::Right, Side::Left),
    ];
    for (reference_rect, requested, expected) in cases {
        let (mut scene, reference, node) = scene_with(reference_rect, (60.0, 40.0));
        let settings = Settings::new(reference)
            .with_config(PositionerConfig::new().with_placement(requested));
        let outcome = run(&mut scene, node, settings);
        assert_eq!(applied(&outcome).placement, expected, "{:?}", requested);
    }
}

#[test]
fn test_auto_picks_side_with_most_room() {
    let (mut scene, reference, node) = scene_with(Rect::new(350.0, 30.0, 100.0, 20.0), (80.0, 60.0));
    let settings = Settings::new(reference)
        .with_config(PositionerConfig::new().with_placement(Placement::Auto));
    let outcome = run(&mut scene, node, settings);
    assert_eq!(applied(&outcome).placement, Side::Bottom);
}

#[test]
fn test_fixed_keeps_requested_side() {
    let (mut scene, reference, node) = scene_with(Rect::new(350.0, 30.0, 100.0, 20.0), (80.0, 60.0));
    let settings = Settings::new(reference).with_config(
        PositionerConfig::new()
            .with_placement(Placement::Top)
            .with_fixed(true),
    );
    let outcome = run(&mut scene, node, settings);
    let result = applied(&outcome);
    assert_eq!(result.placement, Side::Top);
    assert_eq!(result.offset, Offset::new(360, -30));
}

#[test]
fn test_right_edge_clamp_keeps_contact() {
    // Container limits the right edge to 200
    let mut scene = Scene::new(viewport(800.0, 600.0));
    let container = scene.add("container", SceneElement::new(Rect::new(0.0, 0.0, 200.0, 600.0)));
    let reference = scene.add("reference", SceneElement::new(Rect::new(180.0, 100.0, 10.0, 10.0)));
    let node = scene.add("node", SceneElement::new(Rect::new(0.0, 0.0, 50.0, 30.0)));

    let outcome = run(
        &mut scene,
        node,
        Settings::new(reference).with_container(container),
    );
    let result = applied(&outcome);
    assert_eq!(result.minimum_box.right(), 200.0);
    assert_eq!(result.offset.x + 50, 200);
    // At least min(reference width, node width) of overlap with [180, 190]
    let overlap = (result.offset.x + 50).min(190) - result.offset.x.max(180);
    assert!(overlap >= 10, "overlap {}", overlap);
}

#[test]
fn test_min_contact_overrides_containment() {
    let mut scene = Scene::new(viewport(800.0, 600.0));
    let container = scene.add("container", SceneElement::new(Rect::new(0.0, 0.0, 200.0, 600.0)));
    let reference = scene.add("reference", SceneElement::new(Rect::new(230.0, 100.0, 20.0, 10.0)));
    let node = scene.add("node", SceneElement::new(Rect::new(0.0, 0.0, 50.0, 30.0)));

    let settings = Settings::new(reference)
        .with_container(container)
        .with_config(PositionerConfig::new().with_min_contact(MinContact::Px(5.0)));
    let outcome = run(&mut scene, node, settings);
    // Box may not end left of reference.left + 5
    assert_eq!(applied(&outcome).offset.x, 185);
}

#[test]
fn test_clamp_containment_across_placements_and_positions() {
    let minimum = Rect::new(0.0, 0.0, 800.0, 600.0);
    let references = [
        Rect::new(10.0, 10.0, 30.0, 30.0),
        Rect::new(760.0, 10.0, 30.0, 30.0),
        Rect::new(10.0, 560.0, 30.0, 30.0),
        Rect::new(760.0, 560.0, 30.0, 30.0),
        Rect::new(385.0, 285.0, 30.0, 30.0),
    ];
    let placements = [
        Placement::Top,
        Placement::Right,
        Placement::Bottom,
        Placement::Left,
        Placement::Auto,
    ];
    let positions = [Position::Start, Position::Center, Position::End];

    for reference_rect in references {
        for placement in placements {
            for position in positions {
                let (mut scene, reference, node) = scene_with(reference_rect, (120.0, 50.0));
                let settings = Settings::new(reference).with_config(
                    PositionerConfig::new()
                        .with_placement(placement)
                        .with_position(position)
                        .with_spacing(4.0),
                );
                let outcome = run(&mut scene, node, settings);
                let result = applied(&outcome);
                let placed = scene.measure(node);
                let (start, end, lo, hi) = match result.placement.cross_axis() {
                    tether::Axis::Horizontal => {
                        (placed.left(), placed.right(), minimum.left(), minimum.right())
                    }
                    tether::Axis::Vertical => {
                        (placed.top(), placed.bottom(), minimum.top(), minimum.bottom())
                    }
                };
                assert!(
                    start >= lo && end <= hi,
                    "{:?} {:?} {:?} escaped: {:?}",
                    reference_rect,
                    placement,
                    position,
                    placed
                );
            }
        }
    }
}

#[test]
fn test_relative_parent_offsets_are_local() {
    let mut scene = Scene::new(viewport(800.0, 600.0));
    let panel = scene.add(
        "panel",
        SceneElement::new(Rect::new(100.0, 50.0, 400.0, 400.0)).relative(),
    );
    let reference = scene.add(
        "reference",
        SceneElement::new(Rect::new(200.0, 150.0, 100.0, 20.0)).with_parent(panel),
    );
    let node = scene.add(
        "node",
        SceneElement::new(Rect::new(100.0, 50.0, 50.0, 10.0)).with_parent(panel),
    );

    let outcome = run(&mut scene, node, Settings::new(reference));
    assert_eq!(applied(&outcome).offset, Offset::new(125, 120));
    assert_eq!(scene.measure(node), Rect::new(225.0, 170.0, 50.0, 10.0));
}

#[test]
fn test_scrolling_container_constrains_and_offsets() {
    let mut scene = Scene::new(viewport(800.0, 600.0)).with_scrollbar_thickness(10.0);
    let panel = scene.add(
        "panel",
        SceneElement::new(Rect::new(100.0, 100.0, 300.0, 200.0))
            .relative()
            .scrollable(Scrollbars {
                vertical: true,
                horizontal: false,
            }),
    );
    let reference = scene.add(
        "reference",
        SceneElement::new(Rect::new(350.0, 300.0, 30.0, 20.0)).with_parent(panel),
    );
    let node = scene.add(
        "node",
        SceneElement::new(Rect::new(100.0, 100.0, 60.0, 20.0)).with_parent(panel),
    );
    scene.scroll_element(panel, Point::new(0.0, 150.0));

    let outcome = run(&mut scene, node, Settings::new(reference));
    let result = applied(&outcome);

    // Panel box minus the 10px vertical scrollbar
    assert_eq!(result.minimum_box, Rect::new(100.0, 100.0, 290.0, 200.0));
    // Reference at y=150 after scrolling; bottom placement fits inside the panel
    assert_eq!(result.placement, Side::Bottom);
    // Centered x would end at 395, clamped to the panel's inner edge at 390
    assert_eq!(scene.measure(node), Rect::new(330.0, 170.0, 60.0, 20.0));
    // Offset is in the panel's scrolled content space
    assert_eq!(result.offset, Offset::new(230, 220));
}

#[test]
fn test_document_scroll_moves_viewport_box() {
    let (mut scene, reference, node) = scene_with(Rect::new(375.0, 1010.0, 50.0, 20.0), (60.0, 40.0));
    scene.scroll_document(Point::new(0.0, 1000.0));
    let settings = Settings::new(reference)
        .with_config(PositionerConfig::new().with_placement(Placement::Top));
    let outcome = run(&mut scene, node, settings);
    let result = applied(&outcome);
    assert_eq!(result.minimum_box.top(), 1000.0);
    assert_eq!(result.placement, Side::Bottom);
}

#[test]
fn test_margins_compose_with_transform() {
    let mut scene = Scene::new(viewport(800.0, 600.0));
    let reference = scene.add("reference", SceneElement::new(Rect::new(100.0, 100.0, 100.0, 20.0)));
    let node = scene.add(
        "node",
        SceneElement::new(Rect::new(0.0, 0.0, 50.0, 10.0))
            .with_margin(Edges::new(8.0, 0.0, 0.0, 4.0)),
    );

    let outcome = run(&mut scene, node, Settings::new(reference));
    assert_eq!(applied(&outcome).offset, Offset::new(121, 112));
    assert_eq!(scene.measure(node), Rect::new(125.0, 120.0, 50.0, 10.0));
}

#[test]
fn test_margin_path_writes_margins() {
    let (mut scene, reference, node) = scene_with(Rect::new(0.0, 0.0, 100.0, 20.0), (50.0, 10.0));
    let settings =
        Settings::new(reference).with_config(PositionerConfig::new().with_gpu(false));
    run(&mut scene, node, settings);
    assert_eq!(
        scene.style(node),
        Some(&NodeStyle::Margin(Offset::new(25, 20)))
    );
    assert_eq!(scene.measure(node), Rect::new(25.0, 20.0, 50.0, 10.0));
}

#[test]
fn test_arrow_centering() {
    let mut scene = Scene::new(viewport(800.0, 600.0));
    let reference = scene.add("reference", SceneElement::new(Rect::new(0.0, 0.0, 100.0, 20.0)));
    let node = scene.add("node", SceneElement::new(Rect::new(0.0, 0.0, 100.0, 40.0)));
    let arrow = scene.add(
        "arrow",
        SceneElement::new(Rect::new(0.0, 0.0, 10.0, 6.0)).with_parent(node),
    );

    let outcome = run(&mut scene, node, Settings::new(reference).with_arrow(arrow));
    let style = applied(&outcome).arrow.expect("arrow configured");
    assert_eq!(style.offset, 45.0);
    assert_eq!(style.edge, Side::Top);
    assert_eq!(style.inset, -6.0);
    assert_eq!(scene.arrow_style(arrow), Some(&style));
}

#[test]
fn test_placement_attributes_written_unless_disabled() {
    let (mut scene, reference, node) = scene_with(Rect::new(0.0, 0.0, 100.0, 20.0), (50.0, 10.0));
    let outcome = run(&mut scene, node, Settings::new(reference));
    assert_eq!(applied(&outcome).placement_attribute, Some(Side::Bottom));
    assert_eq!(scene.placement_attribute(node), Some(Side::Bottom));
    assert_eq!(scene.placement_attribute(reference), Some(Side::Bottom));

    let (mut scene, reference, node) = scene_with(Rect::new(0.0, 0.0, 100.0, 20.0), (50.0, 10.0));
    let settings =
        Settings::new(reference).with_config(PositionerConfig::new().with_no_attributes(true));
    let outcome = run(&mut scene, node, settings);
    assert_eq!(applied(&outcome).placement_attribute, None);
    assert_eq!(scene.placement_attribute(node), None);
}

#[test]
fn test_hidden_node_is_skipped() {
    let (mut scene, reference, node) = scene_with(Rect::new(0.0, 0.0, 100.0, 20.0), (50.0, 10.0));
    if let Some(element) = scene.element_mut(node) {
        element.hidden = true;
    }
    let outcome = run(&mut scene, node, Settings::new(reference));
    assert!(outcome.is_skipped());
    assert_eq!(scene.style(node), None);
}

#[test]
fn test_update_is_idempotent() {
    let (mut scene, reference, node) =
        scene_with(Rect::new(700.0, 300.0, 40.0, 20.0), (120.0, 50.0));
    let mut positioner = Positioner::new(
        node,
        Settings::new(reference).with_config(
            PositionerConfig::new()
                .with_placement(Placement::Auto)
                .with_spacing(6.0),
        ),
    )
    .expect("valid settings");
    let cache = ScrollbarCache::new();

    let first = positioner.update(&mut scene, &cache).expect("first update");
    let second = positioner.update(&mut scene, &cache).expect("second update");
    assert_eq!(first, second);
    assert_eq!(positioner.last_result(), second.result());
}

//! Integration tests verifying that activated restraints are satisfied by a real
//! solver. They lay targets out through `KasuariEngine` and check the solved frames
//! against the declared constraints.

use restraint::{
    chain, Alignment, AlignmentSet, ChainConfig, EngineError, Frame, KasuariEngine, Pinning,
    Priority, Restraint, RestraintConfig, SolverError, Space, Target, YAnchor,
};

const TOLERANCE: f64 = 0.001;

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "{}: expected {}, got {}",
        what,
        expected,
        actual
    );
}

fn engine_with_root(root: &Target) -> KasuariEngine {
    let mut engine = KasuariEngine::new();
    engine
        .add_root(root, Frame::new(0.0, 0.0, 400.0, 300.0))
        .expect("root should pin");
    engine
}

fn solve(restraint: &Restraint, engine: &mut KasuariEngine) {
    restraint.activate(engine).expect("activation should succeed");
    engine.layout();
}

fn frame(engine: &KasuariEngine, target: &Target) -> Frame {
    engine
        .frame(target)
        .unwrap_or_else(|| panic!("target '{}' not laid out", target.id()))
}

/// Three fixed-width targets chained inside a guide that is only pinned at its
/// top-left corner: the guide should grow to wrap the chain.
#[test]
fn test_chain_in_guide_wraps_targets() {
    let root = Target::view("root");
    let guide = Target::guide("guide");
    let (a, b, c) = (Target::view("a"), Target::view("b"), Target::view("c"));

    let restraint = Restraint::new(&root)
        .add_items(&[guide.clone(), a.clone(), b.clone(), c.clone()])
        .align_items(&[guide.clone()], &[Alignment::Top.inset(20.0), Alignment::Leading.inset(30.0)])
        .set_widths(&[a.equal_size(50.0), b.equal_size(50.0), c.equal_size(50.0)])
        .set_heights(&[a.equal_size(20.0)])
        .chain_horizontally_in(&chain![&a, &b, &c], &guide);

    let mut engine = engine_with_root(&root);
    solve(&restraint, &mut engine);

    let g = frame(&engine, &guide);
    assert_close(g.x, 30.0, "guide.x");
    assert_close(g.y, 20.0, "guide.y");
    assert_close(g.width, 166.0, "guide.width");
    assert_close(g.height, 20.0, "guide.height");

    for (target, x) in [(&a, 30.0), (&b, 88.0), (&c, 146.0)] {
        let f = frame(&engine, target);
        assert_close(f.x, x, &format!("{}.x", target.id()));
        assert_close(f.y, 20.0, &format!("{}.y", target.id()));
        assert_close(f.height, 20.0, &format!("{}.height", target.id()));
    }
}

#[test]
fn test_vertical_chain_with_soft_ends_stays_inside_root() {
    let root = Target::view("root");
    let (a, b) = (Target::view("a"), Target::view("b"));
    let config = ChainConfig::new().with_ends_pinning(Pinning::Soft);

    let restraint = Restraint::new(&root)
        .add_items(&[a.clone(), b.clone()])
        .set_heights(&[a.equal_size(40.0), b.equal_size(40.0)])
        .align_items(&[a.clone()], &[Alignment::Top.inset(10.0)])
        .chain_vertically_in_with(&chain![&a, Space::equal(12.0), &b], &root, &config);

    let mut engine = engine_with_root(&root);
    solve(&restraint, &mut engine);

    let fa = frame(&engine, &a);
    let fb = frame(&engine, &b);
    assert_close(fa.y, 10.0, "a.y");
    assert_close(fb.y, 62.0, "b.y");
    assert!(fb.bottom() <= 300.0 + TOLERANCE);
    // Cross axis is hard-pinned: both fill the root's width
    assert_close(fa.width, 400.0, "a.width");
    assert_close(fb.x, 0.0, "b.x");
}

#[test]
fn test_centered_target() {
    let root = Target::view("root");
    let a = Target::view("a");

    let restraint = Restraint::new(&root)
        .add_items(&[a.clone()])
        .set_widths(&[a.equal_size(100.0)])
        .set_heights(&[a.equal_size(50.0)])
        .align_items(&[a.clone()], &AlignmentSet::CENTER_XY);

    let mut engine = engine_with_root(&root);
    solve(&restraint, &mut engine);

    let f = frame(&engine, &a);
    assert_close(f.x, 150.0, "a.x");
    assert_close(f.y, 125.0, "a.y");
}

#[test]
fn test_end_insets_are_negative() {
    let root = Target::view("root");
    let a = Target::view("a");

    let restraint = Restraint::new(&root)
        .add_items(&[a.clone()])
        .set_widths(&[a.equal_size(50.0)])
        .set_heights(&[a.equal_size(50.0)])
        .align_items(&[a.clone()], &[Alignment::Bottom.inset(10.0), Alignment::Trailing.inset(20.0)]);

    let mut engine = engine_with_root(&root);
    solve(&restraint, &mut engine);

    let f = frame(&engine, &a);
    assert_close(f.right(), 380.0, "a.right");
    assert_close(f.bottom(), 290.0, "a.bottom");
}

#[test]
fn test_relative_width() {
    let root = Target::view("root");
    let a = Target::view("a");

    let restraint = Restraint::new(&root)
        .add_items(&[a.clone()])
        .set_relative_widths(&[a.multiple(0.5, &root)])
        .set_relative_heights(&[a.multiple(0.25, &root).plus(5.0)]);

    let mut engine = engine_with_root(&root);
    solve(&restraint, &mut engine);

    let f = frame(&engine, &a);
    assert_close(f.width, 200.0, "a.width");
    assert_close(f.height, 80.0, "a.height");
}

#[test]
fn test_required_beats_low_priority() {
    let root = Target::view("root");
    let a = Target::view("a");

    let restraint = Restraint::new(&root)
        .add_items(&[a.clone()])
        .set_widths(&[a.min_size(50.0), a.equal_size(30.0).with_priority(Priority::LOW)]);

    let mut engine = engine_with_root(&root);
    solve(&restraint, &mut engine);

    assert_close(frame(&engine, &a).width, 50.0, "a.width");
}

#[test]
fn test_soft_alignment_confines_suggested_size() {
    let root = Target::view("root");
    let label = Target::view("label");

    let restraint = Restraint::new(&root)
        .add_items(&[label.clone()])
        .align_items(&[label.clone()], &[Alignment::Leading, Alignment::Top])
        .align_items(&[label.clone()], &AlignmentSet::ALL_SOFT_SIDES);

    let mut engine = engine_with_root(&root);
    restraint.activate(&mut engine).unwrap();
    engine.suggest_size(&label, 900.0, 20.0).unwrap();
    engine.layout();

    let f = frame(&engine, &label);
    assert_close(f.width, 400.0, "label.width");
    assert_close(f.height, 20.0, "label.height");
}

#[test]
fn test_proxy_redirects_top_to_center() {
    let root = Target::view("root");
    let dot = Target::view("dot");
    let centered = dot.proxy().top_is(YAnchor::CenterY);

    let restraint = Restraint::new(&root)
        .add_items(&[dot.clone()])
        .set_heights(&[dot.equal_size(20.0)])
        .align_items(&[centered], &[Alignment::Top.inset(100.0)]);

    let mut engine = engine_with_root(&root);
    solve(&restraint, &mut engine);

    let f = frame(&engine, &dot);
    assert_close(f.center_y(), 100.0, "dot.center_y");
    assert_close(f.y, 90.0, "dot.y");
}

#[test]
fn test_diff_activate_relayouts() {
    let root = Target::view("root");
    let a = Target::view("a");

    let pinned = Restraint::new(&root)
        .add_items(&[a.clone()])
        .align_items(&[a.clone()], &[Alignment::Top, Alignment::Leading]);
    let narrow = Restraint::new(&root)
        .set_widths(&[a.equal_size(100.0)])
        .add_child(pinned.clone());
    let wide = Restraint::new(&root)
        .set_widths(&[a.equal_size(200.0)])
        .add_child(pinned.clone());

    let mut engine = engine_with_root(&root);
    solve(&narrow, &mut engine);
    assert_close(frame(&engine, &a).width, 100.0, "narrow width");

    Restraint::diff_activate(&wide, &narrow, &mut engine).unwrap();
    assert!(engine.needs_layout(&root));
    engine.layout();

    assert_close(frame(&engine, &a).width, 200.0, "wide width");
    assert!(pinned.descriptors().iter().all(|d| engine.is_active(d)));
    assert!(!engine.is_active(&narrow.descriptors()[0]));
    assert_eq!(engine.active_count(), 3);
}

#[test]
fn test_configured_default_spacing() {
    let root = Target::view("root");
    let (a, b) = (Target::view("a"), Target::view("b"));
    let config = RestraintConfig::from_str("default_spacing = 16.0").unwrap();

    let restraint = Restraint::with_config(&root, config)
        .add_items(&[a.clone(), b.clone()])
        .align_items(&[a.clone()], &[Alignment::Leading])
        .set_widths(&[a.equal_size(10.0)])
        .chain_horizontally(&chain![&a, &b]);

    let mut engine = engine_with_root(&root);
    solve(&restraint, &mut engine);

    assert_close(frame(&engine, &b).x, 26.0, "b.x");
}

#[test]
fn test_conflicting_required_constraints_fail() {
    let root = Target::view("root");
    let a = Target::view("a");

    let restraint = Restraint::new(&root)
        .add_items(&[a.clone()])
        .set_widths(&[a.equal_size(100.0), a.equal_size(200.0)]);

    let mut engine = engine_with_root(&root);
    let result = restraint.activate(&mut engine);

    assert!(
        matches!(result, Err(EngineError::Solver(SolverError::Unsatisfiable { .. }))),
        "expected unsatisfiable, got {:?}",
        result
    );
    assert_eq!(engine.active_count(), 0);
}

#[test]
fn test_failed_activation_leaves_whole_tree_inactive() {
    let root = Target::view("root");
    let a = Target::view("a");

    let child = Restraint::new(&root).set_widths(&[a.equal_size(50.0)]);
    let parent = Restraint::new(&root)
        .add_items(&[a.clone()])
        .set_widths(&[a.equal_size(100.0)])
        .add_child(child);

    let mut engine = engine_with_root(&root);
    let result = parent.activate(&mut engine);

    assert!(
        matches!(result, Err(EngineError::Solver(SolverError::Unsatisfiable { .. }))),
        "expected unsatisfiable, got {:?}",
        result
    );
    assert!(!engine.is_active(&parent.descriptors()[0]));
    assert_eq!(engine.active_count(), 0);
}

#[test]
fn test_failed_diff_activate_restores_old_state() {
    let root = Target::view("root");
    let a = Target::view("a");

    let height = Restraint::new(&root).set_heights(&[a.equal_size(10.0)]);
    let old = Restraint::new(&root)
        .add_items(&[a.clone()])
        .set_widths(&[a.equal_size(100.0)])
        .add_child(height.clone());
    let new = Restraint::new(&root)
        .add_items(&[a.clone()])
        .set_widths(&[a.equal_size(200.0), a.equal_size(300.0)])
        .add_child(height.clone());

    let mut engine = engine_with_root(&root);
    solve(&old, &mut engine);

    let result = Restraint::diff_activate(&new, &old, &mut engine);
    assert!(
        matches!(result, Err(EngineError::Solver(SolverError::Unsatisfiable { .. }))),
        "expected unsatisfiable, got {:?}",
        result
    );

    assert!(engine.is_active(&old.descriptors()[0]));
    assert!(engine.is_active(&height.descriptors()[0]));
    assert!(new.descriptors().iter().all(|d| !engine.is_active(d)));
    assert_eq!(engine.active_count(), 2);

    engine.layout();
    let f = frame(&engine, &a);
    assert_close(f.width, 100.0, "a.width");
    assert_close(f.height, 10.0, "a.height");
}

#[test]
fn test_target_outside_container_fails() {
    let root = Target::view("root");
    let a = Target::view("a");

    let restraint = Restraint::new(&root).align_items(&[a.clone()], &[Alignment::Top]);

    let mut engine = engine_with_root(&root);
    let result = restraint.activate(&mut engine);

    match result {
        Err(EngineError::UnregisteredTarget { target, descriptor }) => {
            assert_eq!(target, "a");
            assert_eq!(descriptor, "a.top == root.top @ 1000");
        }
        other => panic!("expected an unregistered target, got {:?}", other),
    }
}

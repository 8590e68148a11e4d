use super::*;

fn single(id: &str) -> RevealTarget {
    RevealTarget::Single { id: id.to_string() }
}

fn group(id: &str, n: usize, step_s: Option<f64>) -> RevealTarget {
    RevealTarget::Group {
        id: id.to_string(),
        children: (0..n).map(|i| format!("{id}-{i}")).collect(),
        step_s,
    }
}

#[test]
fn singles_reveal_once_on_intersection() {
    let mut engine = RevealEngine::new(RevealConfig::default());
    assert!(engine.observe(vec![single("hero")]).is_empty());
    let hit = [Intersection {
        target: "hero",
        ratio: 0.5,
    }];
    let out = engine.on_intersect(&hit);
    assert_eq!(
        out,
        vec![Reveal {
            element: "hero".to_string(),
            delay_s: 0.0
        }]
    );
    assert!(engine.on_intersect(&hit).is_empty());
    assert_eq!(engine.observed_count(), 0);
    assert!(engine.is_revealed("hero"));
}

#[test]
fn entries_below_threshold_are_ignored() {
    let mut engine = RevealEngine::new(RevealConfig::default());
    engine.observe(vec![single("a")]);
    let out = engine.on_intersect(&[Intersection {
        target: "a",
        ratio: 0.05,
    }]);
    assert!(out.is_empty());
    assert_eq!(engine.observed_count(), 1);
}

#[test]
fn groups_stagger_children_by_step() {
    let mut engine = RevealEngine::new(RevealConfig::default());
    engine.observe(vec![group("cards", 4, None), group("logos", 3, Some(0.15))]);
    let out = engine.on_intersect(&[
        Intersection {
            target: "cards",
            ratio: 1.0,
        },
        Intersection {
            target: "logos",
            ratio: 0.2,
        },
    ]);
    let delays: Vec<f64> = out.iter().map(|r| r.delay_s).collect();
    assert_eq!(delays, vec![0.0, 0.08, 0.16, 0.24, 0.0, 0.15, 0.3]);
}

#[test]
fn invalid_group_step_falls_back_to_default() {
    let mut engine = RevealEngine::new(RevealConfig::default());
    engine.observe(vec![group("g", 2, Some(-1.0))]);
    let out = engine.on_intersect(&[Intersection {
        target: "g",
        ratio: 1.0,
    }]);
    assert_eq!(out[1].delay_s, 0.08);
}

#[test]
fn reduced_motion_reveals_everything_immediately() {
    let mut engine = RevealEngine::new(RevealConfig {
        reduced_motion: true,
        ..RevealConfig::default()
    });
    let out = engine.observe(vec![single("a"), group("g", 2, None)]);
    assert_eq!(out.len(), 3);
    assert!(out.iter().all(|r| r.delay_s == 0.0));
    assert_eq!(engine.observed_count(), 0);
}

#[test]
fn duplicate_targets_are_observed_once() {
    let mut engine = RevealEngine::new(RevealConfig::default());
    engine.observe(vec![single("a"), single("a")]);
    assert_eq!(engine.observed_count(), 1);
}

#[test]
fn config_validation_bounds_threshold() {
    let cfg = RevealConfig {
        threshold: 1.5,
        ..RevealConfig::default()
    };
    assert!(cfg.validate().is_err());
    RevealConfig::default().validate().unwrap();
}

use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::carousel::config::{LoopMode, TransitionStyle};

fn slides(n: usize) -> Vec<Slide> {
    (0..n).map(|i| Slide::new(format!("s{i}"))).collect()
}

fn config(mode: LoopMode) -> CarouselConfig {
    CarouselConfig {
        loop_mode: mode,
        ..CarouselConfig::default()
    }
}

fn carousel(n: usize, cfg: CarouselConfig) -> Carousel {
    Carousel::new("c", slides(n), cfg, Width::new(1000.0).unwrap(), Millis(0)).unwrap()
}

fn record_changes(c: &mut Carousel) -> Rc<RefCell<Vec<usize>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    c.on_slide_change(move |change| sink.borrow_mut().push(change.real_index));
    seen
}

fn instant_jump(display: usize) -> Vec<ViewCommand> {
    vec![
        ViewCommand::SetTransition {
            transition: Transition::Off,
        },
        ViewCommand::Translate {
            offset: Offset::for_index(display),
        },
        ViewCommand::Reflow,
        ViewCommand::SetTransition {
            transition: Transition::On {
                style: TransitionStyle::default(),
            },
        },
    ]
}

fn swipe(c: &mut Carousel, dx: f64) {
    c.pointer_down(Point::new(500.0, 100.0));
    c.pointer_move(Point::new(500.0 + dx, 100.0));
    c.pointer_up(Millis(0));
}

#[test]
fn initial_render_is_an_instant_jump() {
    let mut c = carousel(3, config(LoopMode::CloneWrap));
    assert_eq!(c.display_index(), 1);
    assert_eq!(c.real_index(), 0);
    assert_eq!(c.drain_view(), instant_jump(1));
}

#[test]
fn clone_wrap_five_nexts_wrap_back_to_first() {
    let mut c = carousel(5, config(LoopMode::CloneWrap));
    let seen = record_changes(&mut c);
    let mut reals = vec![c.real_index()];
    for _ in 0..5 {
        c.next(Millis(0));
        reals.push(c.real_index());
        c.transition_end();
    }
    assert_eq!(reals, vec![0, 1, 2, 3, 4, 0]);
    assert_eq!(*seen.borrow(), vec![1, 2, 3, 4, 0]);
    assert_eq!(c.display_index(), 1);
}

#[test]
fn edge_snap_waits_for_transition_end_and_keeps_content() {
    let mut c = carousel(5, config(LoopMode::CloneWrap));
    c.go_to(4, Millis(0));
    c.transition_end();
    c.drain_view();

    c.next(Millis(0));
    assert_eq!(c.display_index(), 6);
    let before = c.visible_slide().id.clone();
    assert_eq!(
        c.drain_view(),
        vec![ViewCommand::Translate {
            offset: Offset::for_index(6)
        }]
    );

    c.transition_end();
    assert_eq!(c.display_index(), 1);
    assert_eq!(c.visible_slide().id, before);
    assert_eq!(c.drain_view(), instant_jump(1));
}

#[test]
fn repeated_snaps_never_change_visible_content() {
    let mut c = carousel(3, config(LoopMode::CloneWrap));
    for _ in 0..4 {
        c.go_to(2, Millis(0));
        c.transition_end();
        c.next(Millis(0));
        let on_clone = c.visible_slide().id.clone();
        c.transition_end();
        assert_eq!(c.visible_slide().id, on_clone);
        assert_eq!(c.real_index(), 0);

        c.prev(Millis(0));
        let on_clone = c.visible_slide().id.clone();
        assert_eq!(c.display_index(), 0);
        c.transition_end();
        assert_eq!(c.display_index(), 3);
        assert_eq!(c.visible_slide().id, on_clone);
    }
}

#[test]
fn navigating_while_parked_on_clone_snaps_first() {
    let mut c = carousel(3, config(LoopMode::CloneWrap));
    c.go_to(2, Millis(0));
    c.transition_end();
    c.next(Millis(0));
    assert_eq!(c.display_index(), 4);
    c.next(Millis(0));
    assert_eq!(c.display_index(), 2);
    assert_eq!(c.real_index(), 1);
    assert!(c.display_index() < c.effective_slide_count());
}

#[test]
fn stray_transition_end_is_ignored() {
    let mut c = carousel(3, config(LoopMode::CloneWrap));
    c.drain_view();
    c.transition_end();
    assert!(c.drain_view().is_empty());
}

#[test]
fn wrap_mode_prev_from_first_goes_to_last() {
    let mut c = carousel(4, config(LoopMode::Wrap));
    c.prev(Millis(0));
    assert_eq!(c.display_index(), 3);
    c.next(Millis(0));
    assert_eq!(c.display_index(), 0);
}

#[test]
fn clamped_mode_stops_at_ends_without_notifying() {
    let mut c = carousel(2, config(LoopMode::Clamped));
    let seen = record_changes(&mut c);
    c.prev(Millis(0));
    c.next(Millis(0));
    c.next(Millis(0));
    assert_eq!(c.display_index(), 1);
    assert_eq!(*seen.borrow(), vec![1]);
}

#[test]
fn rendered_slides_mark_clones() {
    let c = carousel(3, config(LoopMode::CloneWrap));
    let ids: Vec<_> = c
        .rendered_slides()
        .iter()
        .map(|r| (r.slide.id.0.clone(), r.is_clone))
        .collect();
    assert_eq!(
        ids,
        vec![
            ("s2".to_string(), true),
            ("s0".to_string(), false),
            ("s1".to_string(), false),
            ("s2".to_string(), false),
            ("s0".to_string(), true),
        ]
    );
}

#[test]
fn short_drag_snaps_back_to_pre_drag_index() {
    let mut c = carousel(4, config(LoopMode::Wrap));
    c.go_to(2, Millis(0));
    c.drain_view();
    for dx in [-139.0, -20.0, 0.0, 35.0, 139.0] {
        swipe(&mut c, dx);
        assert_eq!(c.display_index(), 2, "dx={dx}");
        let cmds = c.drain_view();
        assert_eq!(
            cmds.last(),
            Some(&ViewCommand::Translate {
                offset: Offset::for_index(2)
            })
        );
        assert!(!c.is_dragging());
    }
}

#[test]
fn drag_exactly_at_threshold_stays() {
    let mut c = carousel(4, config(LoopMode::Wrap));
    assert_eq!(c.drag_threshold_px(), 140.0);
    swipe(&mut c, -140.0);
    assert_eq!(c.display_index(), 0);
    swipe(&mut c, 140.0);
    assert_eq!(c.display_index(), 0);
    swipe(&mut c, -141.0);
    assert_eq!(c.display_index(), 1);
}

#[test]
fn drag_right_goes_back() {
    let mut c = carousel(4, config(LoopMode::Wrap));
    swipe(&mut c, 200.0);
    assert_eq!(c.display_index(), 3);
}

#[test]
fn live_drag_offset_tracks_pointer_unanimated() {
    let mut c = carousel(4, config(LoopMode::Wrap));
    c.drain_view();
    c.pointer_down(Point::new(400.0, 50.0));
    let mv = c.pointer_move(Point::new(370.0, 55.0));
    assert!(mv.prevent_default);
    assert_eq!(c.state().drag_delta, -30.0);
    assert_eq!(
        c.drain_view(),
        vec![
            ViewCommand::SetTransition {
                transition: Transition::Off
            },
            ViewCommand::Translate {
                offset: Offset::for_index(0).with_px(-30.0)
            },
        ]
    );
}

#[test]
fn vertical_move_does_not_translate() {
    let mut c = carousel(4, config(LoopMode::Wrap));
    c.pointer_down(Point::new(400.0, 50.0));
    c.drain_view();
    let mv = c.pointer_move(Point::new(405.0, 150.0));
    assert!(!mv.prevent_default);
    assert!(c.drain_view().is_empty());
}

#[test]
fn move_without_drag_is_inert() {
    let mut c = carousel(2, config(LoopMode::Wrap));
    c.drain_view();
    assert_eq!(c.pointer_move(Point::new(1.0, 1.0)), DragMove::default());
    c.pointer_up(Millis(0));
    assert!(c.drain_view().is_empty());
}

#[test]
fn drag_on_clone_settles_before_offsetting() {
    let mut c = carousel(3, config(LoopMode::CloneWrap));
    c.prev(Millis(0));
    assert_eq!(c.display_index(), 0);
    c.pointer_down(Point::new(500.0, 0.0));
    assert_eq!(c.display_index(), 3);
    c.pointer_cancel(Millis(0));
    assert_eq!(c.display_index(), 3);
}

#[test]
fn autoplay_ticks_advance_on_schedule() {
    let mut c = carousel(3, config(LoopMode::Wrap));
    assert_eq!(c.next_deadline(), Some(Millis(5500)));
    c.advance(Millis(5499));
    assert_eq!(c.display_index(), 0);
    c.advance(Millis(5500));
    assert_eq!(c.display_index(), 1);
    c.advance(Millis(11000));
    assert_eq!(c.display_index(), 2);
    assert_eq!(c.next_deadline(), Some(Millis(16500)));
}

#[test]
fn overdue_autoplay_ticks_collapse_into_one_step() {
    let mut c = carousel(5, config(LoopMode::CloneWrap));
    let seen = record_changes(&mut c);
    c.drain_view();
    c.advance(Millis(5500 * 5));
    assert_eq!(*seen.borrow(), vec![1]);
    assert_eq!(c.drain_view().len(), 1);
    assert_eq!(c.next_deadline(), Some(Millis(5500 * 6)));
}

#[test]
fn navigation_restarts_countdown_from_its_own_clock() {
    let mut c = carousel(3, config(LoopMode::Wrap));
    c.advance(Millis(5500));
    assert_eq!(c.next_deadline(), Some(Millis(11_000)));
    c.next(Millis(10_900));
    assert_eq!(c.next_deadline(), Some(Millis(16_400)));
}

#[test]
fn long_drag_reschedules_from_release_time() {
    let mut c = carousel(3, config(LoopMode::Wrap));
    c.advance(Millis(1000));
    c.pointer_down(Point::new(500.0, 0.0));
    c.pointer_up(Millis(21_000));
    assert_eq!(c.next_deadline(), Some(Millis(26_500)));

    c.resize(Width::new(600.0).unwrap(), Millis(21_000));
    assert_eq!(c.next_deadline(), Some(Millis(21_100)));
}

#[test]
fn resume_handlers_schedule_from_event_time() {
    let mut c = carousel(3, config(LoopMode::Wrap));
    c.pointer_enter();
    c.pointer_leave(Millis(9_000));
    assert_eq!(c.next_deadline(), Some(Millis(14_500)));

    c.focus_in();
    c.focus_out(Millis(12_000));
    assert_eq!(c.next_deadline(), Some(Millis(17_500)));

    c.set_page_visible(false, Millis(13_000));
    c.set_page_visible(true, Millis(40_000));
    assert_eq!(c.next_deadline(), Some(Millis(45_500)));
}

#[test]
fn stale_clock_readings_never_move_time_back() {
    let mut c = carousel(3, config(LoopMode::Wrap));
    c.advance(Millis(8_000));
    c.next(Millis(100));
    assert_eq!(c.next_deadline(), Some(Millis(13_500)));
}

#[test]
fn clamped_autoplay_stops_at_the_last_slide() {
    let mut c = carousel(2, config(LoopMode::Clamped));
    c.advance(Millis(5500));
    assert_eq!(c.display_index(), 1);
    assert_eq!(c.autoplay_state(), AutoplayState::Running);

    c.advance(Millis(11_000));
    assert_eq!(c.display_index(), 1);
    assert_eq!(c.autoplay_state(), AutoplayState::Stopped);
    assert_eq!(c.next_deadline(), None);

    c.prev(Millis(12_000));
    assert_eq!(c.display_index(), 0);
    assert_eq!(c.next_deadline(), Some(Millis(17_500)));
}

#[test]
fn single_slide_autoplay_stops_after_first_tick() {
    let mut c = carousel(1, config(LoopMode::Wrap));
    c.advance(Millis(5500));
    assert_eq!(c.autoplay_state(), AutoplayState::Stopped);
}

#[test]
fn drag_stops_autoplay_until_released() {
    let mut c = carousel(3, config(LoopMode::Wrap));
    c.advance(Millis(1000));
    c.pointer_down(Point::new(10.0, 10.0));
    assert_eq!(c.autoplay_state(), AutoplayState::Stopped);
    assert_eq!(c.live_timer_count(), 0);
    c.advance(Millis(30_000));
    assert_eq!(c.display_index(), 0);
    c.pointer_up(Millis(30_000));
    assert_eq!(c.autoplay_state(), AutoplayState::Running);
    assert_eq!(c.next_deadline(), Some(Millis(35_500)));
}

#[test]
fn user_navigation_restarts_countdown() {
    let mut c = carousel(3, config(LoopMode::Wrap));
    c.advance(Millis(5000));
    c.next(Millis(5000));
    assert_eq!(c.next_deadline(), Some(Millis(10_500)));
    assert_eq!(c.live_timer_count(), 1);
}

#[test]
fn hover_pauses_only_when_configured() {
    let mut c = carousel(3, config(LoopMode::Wrap));
    c.pointer_enter();
    assert_eq!(c.autoplay_state(), AutoplayState::Stopped);
    c.pointer_leave(Millis(0));
    assert_eq!(c.autoplay_state(), AutoplayState::Running);

    let mut c = carousel(
        3,
        CarouselConfig {
            pause_on_hover: false,
            ..CarouselConfig::default()
        },
    );
    c.pointer_enter();
    assert_eq!(c.autoplay_state(), AutoplayState::Running);
}

#[test]
fn focus_and_visibility_hold_autoplay_independently() {
    let mut c = carousel(3, config(LoopMode::Wrap));
    c.focus_in();
    c.set_page_visible(false, Millis(0));
    c.focus_out(Millis(0));
    assert_eq!(c.autoplay_state(), AutoplayState::Stopped);
    assert!(c.pause_reasons().contains(PauseReasons::HIDDEN));
    c.set_page_visible(true, Millis(0));
    assert_eq!(c.autoplay_state(), AutoplayState::Running);
}

#[test]
fn repeated_resume_never_duplicates_timer() {
    let mut c = carousel(3, config(LoopMode::Wrap));
    c.pointer_leave(Millis(0));
    c.focus_out(Millis(0));
    c.set_page_visible(true, Millis(0));
    assert_eq!(c.live_timer_count(), 1);
}

#[test]
fn disabled_autoplay_never_schedules() {
    let mut c = carousel(
        3,
        CarouselConfig {
            autoplay_enabled: false,
            ..CarouselConfig::default()
        },
    );
    c.pointer_leave(Millis(0));
    swipe(&mut c, -300.0);
    assert_eq!(c.next_deadline(), None);
}

#[test]
fn reduced_motion_is_instant_and_snaps_immediately() {
    let mut c = carousel(
        3,
        CarouselConfig {
            loop_mode: LoopMode::CloneWrap,
            reduced_motion: true,
            ..CarouselConfig::default()
        },
    );
    assert_eq!(c.autoplay_state(), AutoplayState::Stopped);
    c.go_to(2, Millis(0));
    c.drain_view();
    c.next(Millis(0));
    assert_eq!(c.display_index(), 1);
    assert_eq!(c.real_index(), 0);
    let cmds = c.drain_view();
    assert!(cmds.iter().all(|cmd| !matches!(
        cmd,
        ViewCommand::SetTransition {
            transition: Transition::On { .. }
        }
    )));
}

#[test]
fn resize_is_debounced_then_jumps() {
    let mut c = carousel(3, config(LoopMode::Wrap));
    c.next(Millis(0));
    c.drain_view();
    c.resize(Width::new(600.0).unwrap(), Millis(0));
    c.advance(Millis(50));
    assert!(c.drain_view().is_empty());
    c.advance(Millis(100));
    assert_eq!(c.drain_view(), instant_jump(1));
    assert!((c.drag_threshold_px() - 132.0).abs() < 1e-9);
}

#[test]
fn resize_mid_drag_is_deferred_until_release() {
    let mut c = carousel(3, config(LoopMode::Wrap));
    c.pointer_down(Point::new(500.0, 0.0));
    c.resize(Width::new(600.0).unwrap(), Millis(0));
    c.advance(Millis(500));
    assert_eq!(c.drag_threshold_px(), 140.0);
    c.drain_view();
    c.pointer_move(Point::new(480.0, 0.0));
    c.pointer_up(Millis(0));
    assert!((c.drag_threshold_px() - 132.0).abs() < 1e-9);
    let cmds = c.drain_view();
    assert_eq!(cmds[cmds.len() - 4..], instant_jump(0)[..]);
}

#[test]
fn key_arrows_navigate() {
    let mut c = carousel(3, config(LoopMode::Wrap));
    assert!(c.key_down("ArrowRight", Millis(0)));
    assert_eq!(c.display_index(), 1);
    assert!(c.key_down("ArrowLeft", Millis(0)));
    assert_eq!(c.display_index(), 0);
    assert!(!c.key_down("Enter", Millis(0)));
}

#[test]
fn destroy_cancels_everything() {
    let mut c = carousel(3, config(LoopMode::Wrap));
    let seen = record_changes(&mut c);
    c.resize(Width::new(300.0).unwrap(), Millis(0));
    c.destroy();
    assert_eq!(c.live_timer_count(), 0);
    assert_eq!(c.next_deadline(), None);
    c.next(Millis(0));
    c.advance(Millis(60_000));
    c.pointer_down(Point::new(0.0, 0.0));
    assert_eq!(c.display_index(), 0);
    assert!(c.drain_view().is_empty());
    assert!(seen.borrow().is_empty());
    assert!(c.is_destroyed());
}

#[test]
fn carousels_do_not_share_timers() {
    let mut a = carousel(3, config(LoopMode::Wrap));
    let mut b = carousel(3, config(LoopMode::Wrap));
    a.pointer_enter();
    a.advance(Millis(5500));
    b.advance(Millis(5500));
    assert_eq!(a.display_index(), 0);
    assert_eq!(b.display_index(), 1);
}

#[test]
fn init_skips_roots_without_usable_track() {
    let mut dataset = BTreeMap::new();
    dataset.insert("autoplay".to_string(), "false".to_string());
    let roots = vec![
        CarouselRoot {
            id: "no-track".to_string(),
            track: None,
            ..CarouselRoot::default()
        },
        CarouselRoot {
            id: "empty".to_string(),
            track: Some(vec![]),
            ..CarouselRoot::default()
        },
        CarouselRoot {
            id: "reviews".to_string(),
            track: Some(slides(3)),
            dataset,
            viewport_width: 800.0,
        },
    ];
    let built = init_carousels(roots, &CarouselConfig::default(), Millis(0));
    assert_eq!(built.len(), 1);
    assert_eq!(built[0].id(), "reviews");
    assert!(!built[0].config().autoplay_enabled);
    assert_eq!(built[0].next_deadline(), None);
}

#[test]
fn invalid_config_is_rejected() {
    let err = Carousel::new(
        "bad",
        slides(2),
        CarouselConfig {
            interval_ms: 0,
            ..CarouselConfig::default()
        },
        Width::new(100.0).unwrap(),
        Millis(0),
    )
    .unwrap_err();
    assert!(matches!(err, VitrineError::Configuration(_)));
}

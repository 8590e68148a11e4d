use super::*;

#[test]
fn css_uses_plain_percent_when_resting() {
    assert_eq!(Offset::for_index(0).to_css(), "translateX(0%)");
    assert_eq!(Offset::for_index(3).to_css(), "translateX(-300%)");
}

#[test]
fn css_uses_calc_while_dragging() {
    let o = Offset::for_index(2).with_px(-35.5);
    assert_eq!(o.to_css(), "translateX(calc(-200% + -35.5px))");
}

#[test]
fn to_px_combines_percent_and_pixels() {
    let o = Offset::for_index(2).with_px(10.0);
    assert_eq!(o.to_px(300.0), -590.0);
}

#[test]
fn in_memory_view_records_transition_state_per_move() {
    let mut view = InMemoryView::new();
    view.apply(&ViewCommand::SetTransition {
        transition: Transition::Off,
    });
    view.apply(&ViewCommand::Translate {
        offset: Offset::for_index(1),
    });
    view.apply(&ViewCommand::Reflow);
    view.apply(&ViewCommand::SetTransition {
        transition: Transition::On {
            style: TransitionStyle::default(),
        },
    });
    view.apply(&ViewCommand::Translate {
        offset: Offset::for_index(2),
    });

    assert_eq!(view.reflows(), 1);
    assert_eq!(view.moves().len(), 2);
    assert_eq!(view.animated_moves().collect::<Vec<_>>(), vec![Offset::for_index(2)]);
    assert!(view.is_animated());
}

#[test]
fn commands_serialize_with_op_tag() {
    let json = serde_json::to_value(ViewCommand::Reflow).unwrap();
    assert_eq!(json["op"], "reflow");
}

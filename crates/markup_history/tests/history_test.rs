use markup_history::{
    Action, ActionManager, CreateMarkup, DeleteMarkup, EditSession, HistoryConfig, HistoryEvent,
    HistoryEventKind, SetGeometry, SetPosition, SetSize, SetText,
};
use markup_model::{
    Color, Markup, MarkupId, MarkupKind, MarkupLayer, MarkupRegistry, MarkupStyle, Point, Size,
};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::Level;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::TRACE)
        .try_init();
}

fn snapshot(layer: &MarkupLayer) -> Vec<Markup> {
    layer.iter().cloned().collect()
}

fn position_of(layer: &MarkupLayer, id: MarkupId) -> Point {
    layer.resolve(id).unwrap().position
}

fn move_to(id: MarkupId, from: (f64, f64), to: (f64, f64)) -> Box<dyn Action> {
    Box::new(SetPosition::new(id, Point::new(from.0, from.1), Point::new(to.0, to.1)))
}

/// A fully populated markup of every kind
fn sample_markups() -> Vec<Markup> {
    let style = MarkupStyle::stroke(Color::BLUE, 3.5)
        .with_fill(Color::YELLOW, 0.4)
        .with_font("Courier", 18.0);
    let path = [Point::new(1.0, 1.0), Point::new(8.0, 3.0), Point::new(4.0, 9.0)];

    MarkupKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let id = MarkupId::new(i as u64 + 1);
            let markup = match kind {
                MarkupKind::Arrow => Markup::arrow(id, Point::new(2.0, 2.0), Point::new(30.0, 12.0)),
                MarkupKind::Rectangle => {
                    Markup::rectangle(id, Point::new(5.0, 5.0), Size::new(20.0, 10.0))
                }
                MarkupKind::Circle => Markup::circle(id, Point::new(5.0, 5.0), Size::new(8.0, 8.0)),
                MarkupKind::Cloud => Markup::cloud(id, Point::new(1.0, 2.0), Size::new(40.0, 20.0)),
                MarkupKind::Text => {
                    Markup::text(id, Point::new(3.0, 4.0), Size::new(60.0, 20.0), "Check this")
                }
                MarkupKind::Callout => {
                    Markup::callout(id, Point::new(3.0, 4.0), Size::new(60.0, 30.0), "Leader")
                }
                MarkupKind::Freehand => Markup::freehand(id, &path),
                MarkupKind::Highlight => Markup::highlight(id, &path),
                MarkupKind::Polyline => Markup::polyline(id, &path, false),
                MarkupKind::Polycloud => Markup::polycloud(id, &path),
            };
            markup.with_style(style.clone()).with_rotation(0.25)
        })
        .collect()
}

#[test]
fn test_concrete_rectangle_scenario() {
    init_tracing();
    let mut layer = MarkupLayer::new();
    let mut history = ActionManager::new(50);
    let id = MarkupId::new(1);

    history.execute(
        Box::new(CreateMarkup::rectangle(id, Point::ORIGIN, Size::new(10.0, 10.0))),
        &mut layer,
    );

    history.begin_action_group().unwrap();
    history.execute(move_to(id, (0.0, 0.0), (5.0, 5.0)), &mut layer);
    history.execute(move_to(id, (5.0, 5.0), (9.0, 9.0)), &mut layer);
    history.close_action_group().unwrap();

    assert_eq!(history.undo_count(), 2);

    history.undo(&mut layer).unwrap();
    assert_eq!(position_of(&layer, id), Point::ORIGIN);

    history.undo(&mut layer).unwrap();
    assert!(layer.resolve(id).is_none());

    history.redo(&mut layer).unwrap();
    history.redo(&mut layer).unwrap();
    assert_eq!(position_of(&layer, id), Point::new(9.0, 9.0));
}

#[test]
fn test_undo_redo_symmetry() {
    init_tracing();
    let mut layer = MarkupLayer::new();
    let mut history = ActionManager::new(50);

    let rect = MarkupId::new(1);
    let note = MarkupId::new(2);
    history.execute(
        Box::new(CreateMarkup::rectangle(rect, Point::ORIGIN, Size::new(10.0, 10.0))),
        &mut layer,
    );
    history.execute(
        Box::new(CreateMarkup::text(note, Point::new(50.0, 0.0), Size::new(40.0, 12.0), "a")),
        &mut layer,
    );
    history.execute(move_to(rect, (0.0, 0.0), (3.0, 4.0)), &mut layer);
    let edit = SetText::from_markup(layer.resolve(note).unwrap(), "abc");
    history.execute(Box::new(edit), &mut layer);

    let after = snapshot(&layer);
    let steps = history.undo_count();
    for _ in 0..steps {
        history.undo(&mut layer).unwrap();
    }
    assert!(layer.is_empty());
    for _ in 0..steps {
        history.redo(&mut layer).unwrap();
    }

    assert_eq!(snapshot(&layer), after);
}

#[test]
fn test_drag_merges_into_single_step() {
    let mut layer = MarkupLayer::new();
    let id = MarkupId::new(1);
    layer.insert(Markup::rectangle(id, Point::ORIGIN, Size::new(10.0, 10.0)));
    let mut history = ActionManager::new(50);

    history.begin_action_group().unwrap();
    for step in 0..200 {
        let x = step as f64 * 0.5;
        history.execute(move_to(id, (x, x), (x + 0.5, x + 0.5)), &mut layer);
    }
    history.close_action_group().unwrap();

    assert_eq!(history.undo_count(), 1);
    assert_eq!(history.last_element_in_undo_stack().unwrap().len(), 1);

    history.undo(&mut layer).unwrap();
    assert_eq!(position_of(&layer, id), Point::ORIGIN);
    assert!(history.is_undo_stack_empty());
}

#[test]
fn test_identity_edit_leaves_no_history() {
    let mut layer = MarkupLayer::new();
    let id = MarkupId::new(1);
    layer.insert(Markup::rectangle(id, Point::new(10.0, 10.0), Size::new(10.0, 10.0)));
    let mut history = ActionManager::new(50);

    history.begin_action_group().unwrap();
    history.execute(move_to(id, (10.0, 10.0), (10.0, 10.0)), &mut layer);
    history.close_action_group().unwrap();

    assert!(history.is_undo_stack_empty());
}

#[test]
fn test_sub_epsilon_drag_is_identity() {
    let mut layer = MarkupLayer::new();
    let id = MarkupId::new(1);
    layer.insert(Markup::rectangle(id, Point::new(10.0, 10.0), Size::new(10.0, 10.0)));
    let mut history = ActionManager::new(50);

    history.begin_action_group().unwrap();
    history.execute(move_to(id, (10.0, 10.0), (10.00001, 10.0)), &mut layer);
    history.close_action_group().unwrap();

    assert!(history.is_undo_stack_empty());
}

#[test]
fn test_redo_invalidation() {
    let mut layer = MarkupLayer::new();
    let id = MarkupId::new(1);
    layer.insert(Markup::rectangle(id, Point::ORIGIN, Size::new(10.0, 10.0)));
    let mut history = ActionManager::new(50);

    history.execute(move_to(id, (0.0, 0.0), (1.0, 0.0)), &mut layer);
    history.execute(move_to(id, (1.0, 0.0), (2.0, 0.0)), &mut layer);
    history.undo(&mut layer).unwrap();
    history.execute(move_to(id, (1.0, 0.0), (1.0, 7.0)), &mut layer);

    assert!(history.is_redo_stack_empty());
    assert!(history.redo(&mut layer).is_err());
    assert_eq!(position_of(&layer, id), Point::new(1.0, 7.0));
}

#[test]
fn test_bounded_history() {
    let mut layer = MarkupLayer::new();
    let config = HistoryConfig::new(2).unwrap();
    let mut history = ActionManager::with_config(&config);

    for i in 1..=3 {
        history.execute(
            Box::new(CreateMarkup::circle(MarkupId::new(i), Point::ORIGIN, Size::new(1.0, 1.0))),
            &mut layer,
        );
    }
    assert_eq!(history.undo_count(), 2);

    history.undo(&mut layer).unwrap();
    history.undo(&mut layer).unwrap();
    assert!(history.undo(&mut layer).is_err());
    assert_eq!(layer.ids(), vec![MarkupId::new(1)]);
}

#[test]
fn test_cancel_on_full_history_keeps_every_step() {
    let mut layer = MarkupLayer::new();
    let mut history = ActionManager::new(2);
    for i in 1..=2 {
        history.execute(
            Box::new(CreateMarkup::circle(MarkupId::new(i), Point::ORIGIN, Size::new(1.0, 1.0))),
            &mut layer,
        );
    }

    history.begin_action_group().unwrap();
    history.execute(
        Box::new(CreateMarkup::circle(MarkupId::new(3), Point::ORIGIN, Size::new(1.0, 1.0))),
        &mut layer,
    );
    history.cancel_action_group(&mut layer).unwrap();

    assert_eq!(history.undo_count(), 2);
    assert_eq!(layer.ids(), vec![MarkupId::new(1), MarkupId::new(2)]);
    history.undo(&mut layer).unwrap();
    history.undo(&mut layer).unwrap();
    assert!(layer.is_empty());
}

fn resize_at(id: MarkupId, from: (f64, f64), to: (f64, f64)) -> Box<dyn Action> {
    let size = Size::new(10.0, 10.0);
    Box::new(SetSize::new(
        id,
        (Point::new(from.0, from.1), size),
        (Point::new(to.0, to.1), size),
    ))
}

#[test]
fn test_move_resize_move_bracket_is_symmetric() {
    init_tracing();
    let id = MarkupId::new(1);
    let mut layer = MarkupLayer::new();
    layer.insert(Markup::rectangle(id, Point::ORIGIN, Size::new(10.0, 10.0)));
    let mut history = ActionManager::new(50);

    history.begin_action_group().unwrap();
    history.execute(move_to(id, (0.0, 0.0), (1.0, 1.0)), &mut layer);
    history.execute(resize_at(id, (1.0, 1.0), (3.0, 3.0)), &mut layer);
    history.execute(move_to(id, (3.0, 3.0), (5.0, 5.0)), &mut layer);
    history.close_action_group().unwrap();
    assert_eq!(position_of(&layer, id), Point::new(5.0, 5.0));

    history.undo(&mut layer).unwrap();
    assert_eq!(position_of(&layer, id), Point::ORIGIN);
    history.redo(&mut layer).unwrap();
    assert_eq!(position_of(&layer, id), Point::new(5.0, 5.0));
}

#[test]
fn test_move_back_across_resize_still_undoes() {
    let id = MarkupId::new(1);
    let mut layer = MarkupLayer::new();
    layer.insert(Markup::rectangle(id, Point::ORIGIN, Size::new(10.0, 10.0)));
    let mut history = ActionManager::new(50);

    history.begin_action_group().unwrap();
    history.execute(move_to(id, (0.0, 0.0), (5.0, 5.0)), &mut layer);
    history.execute(resize_at(id, (5.0, 5.0), (7.0, 7.0)), &mut layer);
    history.execute(move_to(id, (7.0, 7.0), (0.0, 0.0)), &mut layer);
    history.close_action_group().unwrap();
    assert_eq!(history.undo_count(), 1);

    history.undo(&mut layer).unwrap();
    assert_eq!(position_of(&layer, id), Point::ORIGIN);
    history.redo(&mut layer).unwrap();
    assert_eq!(position_of(&layer, id), Point::ORIGIN);
}

#[test]
fn test_cancel_reverts_cleanly() {
    init_tracing();
    let mut layer = MarkupLayer::new();
    let existing = MarkupId::new(1);
    layer.insert(Markup::rectangle(existing, Point::ORIGIN, Size::new(10.0, 10.0)));
    let mut history = ActionManager::new(50);

    history.execute(move_to(existing, (0.0, 0.0), (4.0, 4.0)), &mut layer);
    history.execute(move_to(existing, (4.0, 4.0), (8.0, 8.0)), &mut layer);
    history.undo(&mut layer).unwrap();

    let before = snapshot(&layer);
    let undo_before = history.undo_count();
    let redo_before = history.redo_count();

    history.begin_action_group().unwrap();
    history.execute(
        Box::new(CreateMarkup::callout(
            MarkupId::new(2),
            Point::new(20.0, 20.0),
            Size::new(30.0, 10.0),
            "",
        )),
        &mut layer,
    );
    history.execute(move_to(existing, (4.0, 4.0), (6.0, 6.0)), &mut layer);
    history.cancel_action_group(&mut layer).unwrap();

    assert_eq!(snapshot(&layer), before);
    assert_eq!(history.undo_count(), undo_before);
    assert_eq!(history.redo_count(), redo_before);

    history.redo(&mut layer).unwrap();
    assert_eq!(position_of(&layer, existing), Point::new(8.0, 8.0));
}

#[test]
fn test_create_delete_inverse_for_every_kind() {
    let mut layer = MarkupLayer::new();
    for markup in sample_markups() {
        layer.insert(markup);
    }

    for original in sample_markups() {
        let mut delete = DeleteMarkup::from_registry(&layer, original.id).unwrap();
        delete.redo(&mut layer);
        assert!(!layer.contains(original.id), "{} was not deleted", original.kind);

        delete.undo(&mut layer);
        assert_eq!(layer.resolve(original.id), Some(&original));
    }
}

#[test]
fn test_create_delete_inverse_through_history() {
    let mut layer = MarkupLayer::new();
    let mut history = ActionManager::new(50);
    for markup in sample_markups() {
        history.execute(Box::new(CreateMarkup::new(markup)), &mut layer);
    }
    let created = snapshot(&layer);

    history.begin_action_group().unwrap();
    for id in layer.ids() {
        let delete = DeleteMarkup::from_registry(&layer, id).unwrap();
        history.execute(Box::new(delete), &mut layer);
    }
    history.close_action_group().unwrap();
    assert!(layer.is_empty());

    history.undo(&mut layer).unwrap();
    assert_eq!(snapshot(&layer), created);
}

#[test]
fn test_replay_tolerates_missing_target() {
    let mut layer = MarkupLayer::new();
    let id = MarkupId::new(1);
    layer.insert(Markup::rectangle(id, Point::ORIGIN, Size::new(10.0, 10.0)));
    let mut history = ActionManager::new(50);

    history.execute(move_to(id, (0.0, 0.0), (5.0, 5.0)), &mut layer);
    layer.remove(id);

    assert_eq!(history.undo(&mut layer).unwrap(), Some(id));
    assert!(layer.is_empty());
    history.redo(&mut layer).unwrap();
    assert!(layer.is_empty());
}

#[test]
fn test_replay_resolves_recreated_target() {
    let mut layer = MarkupLayer::new();
    let id = MarkupId::new(1);
    layer.insert(Markup::rectangle(id, Point::ORIGIN, Size::new(10.0, 10.0)));
    let mut history = ActionManager::new(50);

    history.execute(move_to(id, (0.0, 0.0), (5.0, 5.0)), &mut layer);
    layer.remove(id);
    layer.insert(Markup::circle(id, Point::new(5.0, 5.0), Size::new(2.0, 2.0)));

    history.undo(&mut layer).unwrap();
    let recreated = layer.resolve(id).unwrap();
    assert_eq!(recreated.kind, MarkupKind::Circle);
    assert_eq!(recreated.position, Point::ORIGIN);
}

#[test]
fn test_reshape_round_trip() {
    let mut layer = MarkupLayer::new();
    let id = MarkupId::new(1);
    let path = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)];
    layer.insert(Markup::polyline(id, &path, false));
    let original = layer.resolve(id).unwrap().clone();
    let mut history = ActionManager::new(50);

    let mut moved_vertex = path;
    moved_vertex[2] = Point::new(20.0, 15.0);
    let reshaped = Markup::polyline(id, &moved_vertex, false);
    history.execute(Box::new(SetGeometry::from_markups(&original, &reshaped)), &mut layer);
    assert_eq!(layer.resolve(id).unwrap().absolute_points(), moved_vertex.to_vec());

    history.undo(&mut layer).unwrap();
    assert_eq!(layer.resolve(id), Some(&original));
}

#[test]
fn test_notification_stream() {
    let mut layer = MarkupLayer::new();
    let mut history = ActionManager::new(50);
    let events: Rc<RefCell<Vec<HistoryEvent>>> = Rc::default();
    let sink = Rc::clone(&events);
    history.add_listener(move |event| sink.borrow_mut().push(*event));

    let drawn = MarkupId::new(1);
    history.begin_action_group().unwrap();
    history.execute(
        Box::new(
            CreateMarkup::rectangle(drawn, Point::ORIGIN, Size::new(1.0, 1.0))
                .with_select_on_execution(false),
        ),
        &mut layer,
    );
    history.close_action_group().unwrap();
    history.undo(&mut layer).unwrap();
    history.redo(&mut layer).unwrap();
    history.clear();

    let kinds: Vec<(HistoryEventKind, Option<MarkupId>)> =
        events.borrow().iter().map(|e| (e.kind, e.target_id)).collect();
    assert_eq!(
        kinds,
        vec![
            (HistoryEventKind::Execute, None),
            (HistoryEventKind::Undo, Some(drawn)),
            (HistoryEventKind::Redo, Some(drawn)),
            (HistoryEventKind::Clear, None),
        ]
    );
}

#[test]
fn test_session_selection_follows_history() {
    init_tracing();
    let mut session = EditSession::new(&HistoryConfig::default());
    let rect = session
        .create_markup(Markup::rectangle(
            MarkupId::new(1),
            Point::ORIGIN,
            Size::new(10.0, 10.0),
        ))
        .unwrap();
    let circle = session
        .create_markup(Markup::circle(
            MarkupId::new(2),
            Point::new(20.0, 0.0),
            Size::new(5.0, 5.0),
        ))
        .unwrap();

    session.begin_action_group().unwrap();
    session.move_markup(rect, Point::new(1.0, 1.0)).unwrap();
    session.move_markup(rect, Point::new(2.0, 2.0)).unwrap();
    session.close_action_group().unwrap();
    assert_eq!(session.selection(), Some(rect));

    session.undo().unwrap();
    assert_eq!(session.selection(), Some(circle));
    assert_eq!(session.layer().get(rect).unwrap().position, Point::ORIGIN);

    session.redo().unwrap();
    assert_eq!(session.selection(), Some(rect));
    assert_eq!(session.layer().get(rect).unwrap().position, Point::new(2.0, 2.0));
}

//! Undo/redo discipline end-to-end: bounded history, redo invalidation,
//! and driving a live mechanism through the invoker.

use pop_core::{Param, Scene};
use pop_editor::{
    change_number_command, ClosureCommand, CommandInvoker, CommandParts, DEFAULT_STACK_LIMIT,
};
use pop_mech::MechanismActive;
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

/// A command that appends its tag to a shared log when it gets destroyed.
fn tracked_command(
    param: &Param<f64>,
    value: f64,
    tag: usize,
    undo_log: &Rc<RefCell<Vec<usize>>>,
    redo_log: &Rc<RefCell<Vec<usize>>>,
) -> ClosureCommand {
    let param = param.clone();
    let undo_log = Rc::clone(undo_log);
    let redo_log = Rc::clone(redo_log);
    ClosureCommand::new(move || {
        let old = param.get();
        param.set(value);
        let undo_param = param.clone();
        let redo_param = param.clone();
        CommandParts {
            undo: Box::new(move || {
                undo_param.set(old);
                true
            }),
            redo: Box::new(move || {
                redo_param.set(value);
                true
            }),
            destroy_from_undo: Some(Box::new(move || {
                undo_log.borrow_mut().push(tag);
                true
            })),
            destroy_from_redo: Some(Box::new(move || {
                redo_log.borrow_mut().push(tag);
                true
            })),
        }
    })
}

#[test]
fn history_is_bounded_to_fifty_and_sheds_the_oldest() {
    let param = Param::new(0.0);
    let undo_log = Rc::new(RefCell::new(Vec::new()));
    let redo_log = Rc::new(RefCell::new(Vec::new()));
    let mut invoker = CommandInvoker::new();

    for i in 0..60 {
        let cmd = tracked_command(&param, i as f64, i, &undo_log, &redo_log);
        assert!(invoker.execute(Box::new(cmd)));
    }

    assert_eq!(invoker.undo_len(), DEFAULT_STACK_LIMIT);
    assert_eq!(
        *undo_log.borrow(),
        (0..10).collect::<Vec<_>>(),
        "exactly the ten oldest commands get destroy_from_undo, oldest first"
    );
    assert!(redo_log.borrow().is_empty());

    // the remaining fifty all undo
    let mut undone = 0;
    while invoker.undo() {
        undone += 1;
    }
    assert_eq!(undone, DEFAULT_STACK_LIMIT);
    assert_eq!(param.get(), 9.0, "undoing stops at the oldest surviving value");
}

#[test]
fn fresh_execution_invalidates_redo_exactly_once() {
    let param = Param::new(0.0);
    let undo_log = Rc::new(RefCell::new(Vec::new()));
    let redo_log = Rc::new(RefCell::new(Vec::new()));
    let mut invoker = CommandInvoker::new();

    invoker.execute(Box::new(tracked_command(
        &param, 1.0, 1, &undo_log, &redo_log,
    )));
    invoker.execute(Box::new(tracked_command(
        &param, 2.0, 2, &undo_log, &redo_log,
    )));
    assert!(invoker.undo());
    assert!(invoker.undo());
    assert_eq!(invoker.redo_len(), 2);

    invoker.execute(Box::new(tracked_command(
        &param, 3.0, 3, &undo_log, &redo_log,
    )));

    assert_eq!(invoker.redo_len(), 0);
    assert_eq!(
        *redo_log.borrow(),
        vec![2, 1],
        "abandoned redos are destroyed newest first, each exactly once"
    );
    assert!(!invoker.redo(), "the redone future is gone");
    assert!(undo_log.borrow().is_empty());
}

#[test]
fn mechanism_angle_drives_through_the_invoker() {
    let scene = Scene::new_handle();
    let mechanism = MechanismActive::new(&scene, None);
    let mut invoker = CommandInvoker::new();

    assert_eq!(mechanism.left_angle.get(), 90.0);
    invoker.execute(Box::new(change_number_command(45.0, &mechanism.left_angle)));
    assert_eq!(mechanism.left_angle.get(), 45.0);
    assert!(
        (mechanism.hinge().hinge().left_transform().rotation().x - 45f64.to_radians()).abs()
            < 1e-12,
        "the command must reach the scene transform"
    );

    assert!(invoker.undo());
    assert_eq!(mechanism.left_angle.get(), 90.0);

    assert!(invoker.redo());
    assert_eq!(mechanism.left_angle.get(), 45.0);
}

#[test]
fn undo_then_redo_restores_interleaved_values() {
    let param = Param::new(0.0);
    let mut invoker = CommandInvoker::new();
    invoker.execute(Box::new(change_number_command(10.0, &param)));
    invoker.execute(Box::new(change_number_command(20.0, &param)));

    invoker.undo();
    assert_eq!(param.get(), 10.0);
    invoker.undo();
    assert_eq!(param.get(), 0.0);
    invoker.redo();
    assert_eq!(param.get(), 10.0);
    invoker.redo();
    assert_eq!(param.get(), 20.0);
    assert!(!invoker.redo());
}

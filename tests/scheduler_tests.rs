use std::cell::{Cell, RefCell};
use std::rc::Rc;

use streamchart::runtime::{Scheduler, TaskHandle};

fn counter() -> (Rc<Cell<u32>>, impl FnMut(i64) + 'static) {
    let count = Rc::new(Cell::new(0));
    let inner = Rc::clone(&count);
    (count, move |_now: i64| inner.set(inner.get() + 1))
}

#[test]
fn interval_task_runs_once_per_elapsed_period() {
    let scheduler = Scheduler::new(0);
    let (count, task) = counter();
    let _handle = scheduler.every(100, task).expect("register");

    scheduler.advance_to(99);
    assert_eq!(count.get(), 0);
    scheduler.advance_to(100);
    assert_eq!(count.get(), 1);
    scheduler.advance_to(150);
    assert_eq!(count.get(), 1);
}

#[test]
fn interval_task_catches_up_missed_ticks_with_due_times() {
    let scheduler = Scheduler::new(1_000);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let _handle = scheduler
        .every(100, move |now: i64| sink.borrow_mut().push(now))
        .expect("register");

    let runs = scheduler.advance_to(1_350);
    assert_eq!(runs, 3);
    assert_eq!(*seen.borrow(), vec![1_100, 1_200, 1_300]);
}

#[test]
fn frame_task_runs_once_per_advance() {
    let scheduler = Scheduler::new(0);
    let (count, task) = counter();
    let _handle = scheduler.every_frame(task);

    scheduler.advance_to(16);
    scheduler.advance_to(16);
    scheduler.advance_to(5_000);
    assert_eq!(count.get(), 3);
}

#[test]
fn dropping_handle_cancels_and_releases_registration() {
    let scheduler = Scheduler::new(0);
    let (count, task) = counter();
    let handle = scheduler.every(10, task).expect("register");
    assert_eq!(scheduler.registration_count(), 1);

    scheduler.advance_to(10);
    drop(handle);
    assert_eq!(scheduler.registration_count(), 0);

    scheduler.advance_to(1_000);
    assert_eq!(count.get(), 1);
}

#[test]
fn cancel_is_idempotent() {
    let scheduler = Scheduler::new(0);
    let (count, task) = counter();
    let mut handle = scheduler.every_frame(task);
    assert!(handle.is_active());

    handle.cancel();
    handle.cancel();
    assert!(!handle.is_active());
    scheduler.advance_to(1);
    assert_eq!(count.get(), 0);
}

#[test]
fn task_can_cancel_itself_while_running() {
    let scheduler = Scheduler::new(0);
    let slot: Rc<RefCell<Option<TaskHandle>>> = Rc::new(RefCell::new(None));
    let runs = Rc::new(Cell::new(0));

    let own_slot = Rc::clone(&slot);
    let own_runs = Rc::clone(&runs);
    let handle = scheduler
        .every(10, move |_now: i64| {
            own_runs.set(own_runs.get() + 1);
            own_slot.borrow_mut().take();
        })
        .expect("register");
    *slot.borrow_mut() = Some(handle);

    scheduler.advance_to(100);
    assert_eq!(runs.get(), 1);
    assert_eq!(scheduler.registration_count(), 0);
}

#[test]
fn task_can_cancel_another_task() {
    let scheduler = Scheduler::new(0);
    let (victim_count, victim) = counter();
    let victim_handle = Rc::new(RefCell::new(Some(scheduler.every(10, victim).expect("victim"))));

    let target = Rc::clone(&victim_handle);
    let _killer = scheduler.every_frame(move |_now: i64| {
        target.borrow_mut().take();
    });

    scheduler.advance_to(50);
    assert_eq!(scheduler.registration_count(), 1);

    scheduler.advance_to(500);
    assert_eq!(victim_count.get(), 5);
}

#[test]
fn handles_outliving_scheduler_are_inert() {
    let scheduler = Scheduler::new(0);
    let (_count, task) = counter();
    let mut handle = scheduler.every_frame(task);
    drop(scheduler);

    assert!(!handle.is_active());
    handle.cancel();
}

#[test]
fn non_positive_period_is_rejected() {
    let scheduler = Scheduler::new(0);
    let (_count, task) = counter();
    assert!(scheduler.every(0, task).is_err());
    assert_eq!(scheduler.registration_count(), 0);
}

#[test]
fn clock_never_moves_backwards() {
    let scheduler = Scheduler::new(500);
    let (count, task) = counter();
    let _handle = scheduler.every(100, task).expect("register");

    scheduler.advance_to(100);
    assert_eq!(scheduler.now_ms(), 500);
    assert_eq!(count.get(), 0);
}

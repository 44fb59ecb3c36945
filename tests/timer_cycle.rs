use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use interval_timer::{AlertSignal, IntervalTimer, Phase, TimerSettings};
use tokio::time::sleep;

#[derive(Default)]
struct CountingAlert(AtomicUsize);

impl AlertSignal for CountingAlert {
    fn trigger(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn timer(work: u32, brk: u32, intervals: u32) -> (Arc<IntervalTimer>, Arc<CountingAlert>) {
    let alert = Arc::new(CountingAlert::default());
    let timer = IntervalTimer::new(TimerSettings::new(work, brk, intervals), alert.clone());
    (timer, alert)
}

fn alerts(alert: &CountingAlert) -> usize {
    alert.0.load(Ordering::SeqCst)
}

#[tokio::test(start_paused = true)]
async fn default_cycle_first_work_and_break() {
    let (timer, alert) = timer(45, 5, 4);

    let snapshot = timer.start().unwrap();
    assert_eq!(snapshot.phase, Phase::Working);
    assert_eq!(snapshot.remaining_seconds, 2700);

    // Half a second past the tick instants
    sleep(Duration::from_millis(2700 * 1000 + 500)).await;
    let snapshot = timer.snapshot().unwrap();
    assert_eq!(snapshot.phase, Phase::OnBreak);
    assert_eq!(snapshot.remaining_seconds, 300);
    assert_eq!(snapshot.current_interval, 1);
    assert_eq!(alerts(&alert), 1);

    sleep(Duration::from_secs(300)).await;
    let snapshot = timer.snapshot().unwrap();
    assert_eq!(snapshot.phase, Phase::Working);
    assert_eq!(snapshot.remaining_seconds, 2700);
    assert_eq!(snapshot.current_interval, 2);
    assert_eq!(alerts(&alert), 2);
}

#[tokio::test(start_paused = true)]
async fn whole_cycle_ends_idle_at_interval_one() {
    let (timer, alert) = timer(1, 1, 3);
    let mut updates = timer.subscribe();
    timer.start().unwrap();

    let mut intervals = vec![];
    sleep(Duration::from_millis(500)).await;
    for _ in 0..(5 * 60) {
        sleep(Duration::from_secs(1)).await;
        let snapshot = updates.borrow_and_update().clone();
        if snapshot.phase == Phase::Working && intervals.last() != Some(&snapshot.current_interval)
        {
            intervals.push(snapshot.current_interval);
        }
    }

    assert_eq!(intervals, vec![1, 2, 3]);
    let snapshot = timer.snapshot().unwrap();
    assert_eq!(snapshot.phase, Phase::Idle);
    assert_eq!(snapshot.current_interval, 1);
    assert_eq!(snapshot.remaining_seconds, 60);
    assert_eq!(alerts(&alert), 5);
    assert!(!timer.countdown_active().unwrap());
}

#[tokio::test(start_paused = true)]
async fn single_interval_has_no_break() {
    let (timer, alert) = timer(1, 5, 1);
    timer.start().unwrap();

    sleep(Duration::from_millis(60 * 1000 + 500)).await;
    let snapshot = timer.snapshot().unwrap();
    assert_eq!(snapshot.phase, Phase::Idle);
    assert_eq!(snapshot.current_interval, 1);
    assert_eq!(alerts(&alert), 1);
}

#[tokio::test(start_paused = true)]
async fn work_edits_only_touch_an_idle_timer() {
    let (timer, _) = timer(45, 5, 4);

    assert_eq!(timer.set_work_minutes(30).unwrap().remaining_seconds, 1800);

    timer.start().unwrap();
    sleep(Duration::from_millis(10 * 1000 + 500)).await;
    let snapshot = timer.set_work_minutes(5).unwrap();
    assert_eq!(snapshot.phase, Phase::Working);
    assert_eq!(snapshot.remaining_seconds, 1790);

    let snapshot = timer.reset().unwrap();
    assert_eq!(snapshot.phase, Phase::Idle);
    assert_eq!(snapshot.remaining_seconds, 300);
}

#[tokio::test(start_paused = true)]
async fn reset_while_paused() {
    let (timer, alert) = timer(1, 1, 2);
    timer.start().unwrap();
    sleep(Duration::from_millis(20 * 1000 + 500)).await;
    timer.pause().unwrap();

    let snapshot = timer.reset().unwrap();
    assert_eq!(snapshot.phase, Phase::Idle);
    assert_eq!(snapshot.paused_from, None);
    assert_eq!(snapshot.current_interval, 1);
    assert_eq!(snapshot.remaining_seconds, 60);
    assert_eq!(alerts(&alert), 0);
}

use approx::assert_relative_eq;
use carviz::animation::{AnimationConfig, AnimationScheduler, SpeedMapping, TrackPath};
use carviz::api::{Dashboard, DashboardConfig};
use carviz::core::{Car, CarKey, Dataset};
use carviz::render::{NullRenderer, Surface};

fn dataset() -> Dataset {
    Dataset::from_cars(
        ["A", "B", "C"]
            .into_iter()
            .enumerate()
            .map(|(i, model)| {
                Car::new("Test", model, "2")
                    .with_hp(100.0 * (i + 1) as f64)
                    .with_capacity(1000.0)
            })
            .collect(),
    )
    .expect("dataset")
}

fn key(model: &str) -> CarKey {
    CarKey::new("TEST", model)
}

/// Every car moves 5 units per 16 ms on a 100-unit loop.
fn constant_scheduler() -> AnimationScheduler {
    let speed = SpeedMapping {
        exponent: 2.0,
        max_hp: 0.0,
        min_speed: 5.0,
        max_speed: 5.0,
    };
    AnimationScheduler::new(AnimationConfig::default(), speed, 100.0)
}

#[test]
fn newcomers_are_spread_along_the_path() {
    let dataset = dataset();
    let mut scheduler = constant_scheduler();
    scheduler.sync_members(&[key("A"), key("B"), key("C")], &dataset);

    let phases: Vec<f64> = scheduler.states().map(|s| s.phase_offset).collect();
    assert_eq!(phases, vec![0.0, 10.0, 20.0]);
}

#[test]
fn frame_delta_is_capped() {
    let dataset = dataset();
    let mut scheduler = constant_scheduler();
    scheduler.sync_members(&[key("A")], &dataset);

    let applied = scheduler.advance(1_000.0);
    assert_eq!(applied, 32.0);
    assert_relative_eq!(
        scheduler.state(&key("A")).expect("state").phase_offset,
        10.0
    );

    assert_eq!(scheduler.advance(-50.0), 0.0);
    assert_relative_eq!(
        scheduler.state(&key("A")).expect("state").phase_offset,
        10.0
    );
}

#[test]
fn phase_wraps_around_the_loop() {
    let dataset = dataset();
    let mut scheduler = constant_scheduler();
    scheduler.sync_members(&[key("A")], &dataset);

    for _ in 0..11 {
        scheduler.advance(32.0);
    }
    let phase = scheduler.state(&key("A")).expect("state").phase_offset;
    assert_relative_eq!(phase, 10.0);
    assert!(phase < scheduler.path_length());
    assert_eq!(scheduler.frames(), 11);
}

#[test]
fn first_tick_only_records_time() {
    let dataset = dataset();
    let mut scheduler = constant_scheduler();
    let chosen = [key("A")];

    assert_eq!(scheduler.tick(5_000.0, &chosen, &dataset), 0.0);
    assert_eq!(scheduler.tick(5_016.0, &chosen, &dataset), 16.0);
    assert_relative_eq!(
        scheduler.state(&key("A")).expect("state").phase_offset,
        5.0
    );
}

#[test]
fn members_that_stay_keep_their_phase() {
    let dataset = dataset();
    let mut scheduler = constant_scheduler();
    scheduler.sync_members(&[key("A"), key("B")], &dataset);
    scheduler.advance(16.0);
    let b_phase = scheduler.state(&key("B")).expect("state").phase_offset;
    assert_relative_eq!(b_phase, 15.0);

    scheduler.sync_members(&[key("B"), key("C")], &dataset);
    assert!(scheduler.state(&key("A")).is_none());
    assert_eq!(
        scheduler.state(&key("B")).expect("state").phase_offset,
        b_phase
    );
    assert_eq!(
        scheduler.state(&key("C")).expect("state").phase_offset,
        10.0
    );
    assert_eq!(scheduler.len(), 2);
}

#[test]
fn velocity_comes_from_dataset_horsepower() {
    let dataset = dataset();
    let mapping = SpeedMapping::for_dataset(&dataset, AnimationConfig::default());
    assert_eq!(mapping.max_hp, 300.0);
    assert_relative_eq!(mapping.velocity(Some(300.0)), 6.0);
    assert_relative_eq!(mapping.velocity(Some(150.0)), 0.5 + 0.25 * 5.5);
}

#[test]
fn markers_follow_the_track() {
    let track = TrackPath::race_track();
    assert!(track.total_length() > 0.0);
    let start = track.point_at_length(0.0);
    assert_relative_eq!(start.x, 300.0);
    assert_relative_eq!(start.y, 550.0);

    let lap = track.point_at_length(track.total_length());
    assert_relative_eq!(lap.x, start.x);
    assert_relative_eq!(lap.y, start.y);
}

#[test]
fn dashboard_tick_redraws_the_ribbon() {
    let mut dashboard =
        Dashboard::new(NullRenderer::default(), dataset(), DashboardConfig::default())
            .expect("dashboard init");
    dashboard.tick(16.0).expect("tick");
    dashboard.tick(32.0).expect("tick");

    assert_eq!(dashboard.scheduler().frames(), 2);
    assert_eq!(dashboard.renderer().render_count(Surface::Ribbon), 3);
    let state = dashboard
        .scheduler()
        .state(&key("C"))
        .expect("state for fastest car");
    assert!(state.phase_offset > 0.2 * dashboard.scheduler().path_length());
}

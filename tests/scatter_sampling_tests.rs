use carviz::api::{
    Dashboard, DashboardConfig, NO_DATA_MESSAGE, ScatterView, SeatFilter, SelectionState,
    ViewUpdate, sample_scatter_points,
};
use carviz::core::{BaselineMode, Car, Dataset, MetricKey, Viewport};
use carviz::render::{NullRenderer, Surface};

fn car(model: &str, hp: f64, tops: f64, accel: f64, price: Option<f64>) -> Car {
    let car = Car::new("Test", model, "4")
        .with_hp(hp)
        .with_top_speed(tops)
        .with_accel(accel)
        .with_capacity(1500.0);
    match price {
        Some(price) => car.with_price(price),
        None => car,
    }
}

fn dataset() -> Dataset {
    Dataset::from_cars(vec![
        car("Slow", 100.0, 180.0, 10.0, Some(20_000.0)),
        car("Quick", 400.0, 300.0, 4.0, Some(90_000.0)),
        car("Unpriced", 900.0, 350.0, 2.0, None),
        car("Middle", 250.0, 240.0, 6.0, Some(45_000.0)),
        car("Twin", 250.0, 240.0, 6.0, Some(46_000.0)),
    ])
    .expect("dataset")
}

fn models(cars: &[&Car]) -> Vec<String> {
    cars.iter().map(|car| car.model.clone()).collect()
}

#[test]
fn points_missing_an_axis_are_excluded() {
    let dataset = dataset();
    let points = sample_scatter_points(&dataset, MetricKey::Horsepower, MetricKey::Price, 100);
    assert_eq!(models(&points), vec!["Slow", "Quick", "Middle", "Twin"]);
}

#[test]
fn cap_keeps_highest_performance_scores() {
    let dataset = dataset();
    let top = sample_scatter_points(&dataset, MetricKey::Horsepower, MetricKey::Price, 1);
    assert_eq!(models(&top), vec!["Quick"]);

    let three = sample_scatter_points(&dataset, MetricKey::Horsepower, MetricKey::Price, 3);
    assert_eq!(models(&three), vec!["Quick", "Middle", "Twin"]);
}

#[test]
fn cap_of_one_over_fully_valid_points_keeps_only_the_top_scorer() {
    let dataset = dataset();
    let all = sample_scatter_points(&dataset, MetricKey::Horsepower, MetricKey::TopSpeed, 100);
    assert_eq!(all.len(), 5);

    let top = sample_scatter_points(&dataset, MetricKey::Horsepower, MetricKey::TopSpeed, 1);
    assert_eq!(models(&top), vec!["Unpriced"]);
}

#[test]
fn ties_keep_source_order() {
    let dataset = dataset();
    let top = sample_scatter_points(&dataset, MetricKey::Horsepower, MetricKey::TopSpeed, 3);
    assert_eq!(models(&top), vec!["Unpriced", "Quick", "Middle"]);
}

#[test]
fn zero_cap_shows_no_data_message() {
    let dataset = dataset();
    let selection = SelectionState::new(
        Default::default(),
        BaselineMode::default(),
        MetricKey::Horsepower,
        MetricKey::Price,
        0,
    );
    let mut view = ScatterView::new(Viewport::new(800, 400), &dataset);
    assert!(view.relayout(&dataset, &selection).expect("relayout"));

    let frame = view.build_frame(&SeatFilter::All).expect("frame");
    assert!(frame.circles.is_empty());
    assert_eq!(frame.texts.len(), 1);
    assert_eq!(frame.texts[0].text, NO_DATA_MESSAGE);
}

#[test]
fn caption_reports_shown_and_total_counts() {
    let dashboard = Dashboard::new(
        NullRenderer::default(),
        dataset(),
        DashboardConfig::default().with_max_display_count(2),
    )
    .expect("dashboard init");
    let frame = dashboard
        .renderer()
        .last_frame(Surface::Scatter)
        .expect("scatter frame");
    assert!(
        frame
            .texts
            .iter()
            .any(|text| text.text == "Showing 2 of 5 cars")
    );
    assert_eq!(frame.circles.len(), 2);
}

#[test]
fn axis_domain_is_padded_and_rounded() {
    let dataset = dataset();
    let selection = SelectionState::new(
        Default::default(),
        BaselineMode::default(),
        MetricKey::Horsepower,
        MetricKey::Price,
        100,
    );
    let mut view = ScatterView::new(Viewport::new(1200, 500), &dataset);
    view.relayout(&dataset, &selection).expect("relayout");
    let layout = view.layout().expect("layout");

    let (x_min, x_max) = layout.x_scale.expect("x scale").domain();
    assert!(x_min <= 90.0);
    assert!(x_max >= 440.0);
    for point in &layout.points {
        assert!(point.x >= 80.0 && point.x <= 1200.0 - 120.0);
        assert!(point.y >= 40.0 && point.y <= 500.0 - 60.0);
    }
}

#[test]
fn seat_filter_never_changes_point_count() {
    let mut dashboard =
        Dashboard::new(NullRenderer::default(), dataset(), DashboardConfig::default())
            .expect("dashboard init");
    let before = dashboard.snapshot().scatter_points;

    dashboard
        .set_seat_filter(SeatFilter::from_option("2"))
        .expect("seat filter");
    let frame = dashboard
        .renderer()
        .last_frame(Surface::Scatter)
        .expect("scatter frame");
    assert_eq!(frame.circles.len(), before);
    assert!(frame.circles.iter().all(|circle| circle.radius == 4.0));
    assert!(frame.circles.iter().all(|circle| circle.fill.alpha == 0.05));
}

#[test]
fn zero_area_resize_renders_nothing() {
    let mut dashboard =
        Dashboard::new(NullRenderer::default(), dataset(), DashboardConfig::default())
            .expect("dashboard init");
    dashboard.renderer_mut().clear_log();

    let update = dashboard
        .resize_scatter(Viewport::new(0, 320))
        .expect("resize");
    assert_eq!(update, ViewUpdate::none());
    assert!(dashboard.renderer().render_log.is_empty());

    let update = dashboard
        .set_seat_filter(SeatFilter::from_option("4"))
        .expect("seat filter");
    assert!(update.is_none());
    assert!(dashboard.renderer().render_log.is_empty());

    let update = dashboard
        .resize_scatter(Viewport::new(900, 400))
        .expect("resize");
    assert!(!update.is_none());
    assert_eq!(dashboard.renderer().render_log, vec![Surface::Scatter]);
}

#[test]
fn unchanged_resize_is_skipped() {
    let mut dashboard =
        Dashboard::new(NullRenderer::default(), dataset(), DashboardConfig::default())
            .expect("dashboard init");
    dashboard.renderer_mut().clear_log();
    let current = dashboard.scatter_view().viewport();
    let update = dashboard.resize_scatter(current).expect("resize");
    assert!(update.is_none());
    assert!(dashboard.renderer().render_log.is_empty());
}

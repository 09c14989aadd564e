use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace, warn};

use crate::animation::{AnimationScheduler, NeedleTransitions, SpeedMapping, TrackPath};
use crate::core::{BaselineMode, CarKey, Dataset, MetricKey, Viewport};
use crate::error::DashResult;
use crate::render::Renderer;

use super::{
    ChosenKeys, DashboardConfig, DashboardSnapshot, GaugeView, NeedleSnapshot, NeedleTarget,
    RibbonMarkerSnapshot, RibbonView, ScatterView, SeatFilter, SelectionState, ViewTopic,
    ViewUpdate, initial_chosen, pick_random_keys, resolve_chosen, seat_filter_options,
};

/// Owner of the dataset, the selection and every view.
///
/// All mutation goes through the methods below. Each one redraws exactly the
/// views its control affects and reports them as a [`ViewUpdate`]. Time is
/// injected: transitions started by a mutator use the timestamp of the last
/// [`tick`](Self::tick), and the clock starts at `0`.
pub struct Dashboard<R: Renderer> {
    renderer: R,
    config: DashboardConfig,
    dataset: Dataset,
    selection: SelectionState,
    scheduler: AnimationScheduler,
    needles: NeedleTransitions,
    needle_targets: Vec<NeedleTarget>,
    ribbon: RibbonView,
    gauges: GaugeView,
    scatter: ScatterView,
    rng: StdRng,
    now_ms: f64,
    clock_started: bool,
}

impl<R: Renderer> Dashboard<R> {
    /// Builds every view and draws the initial state of all three surfaces.
    pub fn new(renderer: R, dataset: Dataset, config: DashboardConfig) -> DashResult<Self> {
        config.validate()?;

        let selection = SelectionState::new(
            initial_chosen(&config.default_selection, &dataset),
            config.baseline_mode,
            config.x_axis,
            config.y_axis,
            config.resolved_max_display_count(dataset.len()),
        );
        let track = TrackPath::race_track();
        let scheduler = AnimationScheduler::new(
            config.animation,
            SpeedMapping::for_dataset(&dataset, config.animation),
            track.total_length(),
        );
        let ribbon = RibbonView::new(config.ribbon_viewport, &dataset, track)?;
        let gauges = GaugeView::new(config.gauge_viewport);
        let scatter = ScatterView::new(config.scatter_viewport, &dataset);
        let rng = config
            .random_seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        let mut dashboard = Self {
            renderer,
            needles: NeedleTransitions::new(config.needles),
            config,
            dataset,
            selection,
            scheduler,
            needle_targets: Vec::new(),
            ribbon,
            gauges,
            scatter,
            rng,
            now_ms: 0.0,
            clock_started: false,
        };
        debug!(
            cars = dashboard.dataset.len(),
            chosen = dashboard.selection.chosen().len(),
            "dashboard initialized"
        );
        dashboard.render_comparison()?;
        dashboard.relayout_scatter()?;
        Ok(dashboard)
    }

    /// Loads a CSV dataset and builds the dashboard over it.
    pub fn load_csv(
        renderer: R,
        path: impl AsRef<Path>,
        config: DashboardConfig,
    ) -> DashResult<Self> {
        let dataset = Dataset::load_csv_path(path)?;
        Self::new(renderer, dataset, config)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    #[must_use]
    pub fn needles(&self) -> &NeedleTransitions {
        &self.needles
    }

    /// Needle targets of the current selection and baseline, card by card.
    #[must_use]
    pub fn needle_targets(&self) -> &[NeedleTarget] {
        &self.needle_targets
    }

    #[must_use]
    pub fn ribbon_view(&self) -> &RibbonView {
        &self.ribbon
    }

    #[must_use]
    pub fn gauge_view(&self) -> &GaugeView {
        &self.gauges
    }

    #[must_use]
    pub fn scatter_view(&self) -> &ScatterView {
        &self.scatter
    }

    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Options for the seat selector.
    #[must_use]
    pub fn seat_filter_options(&self) -> Vec<SeatFilter> {
        seat_filter_options(&self.dataset)
    }

    /// Replaces the comparison set, then redraws the ribbon and the gauges
    /// against the same selection.
    pub fn set_chosen(&mut self, keys: &[CarKey]) -> DashResult<ViewUpdate> {
        let chosen = resolve_chosen(keys, &self.dataset)?;
        self.apply_chosen(chosen)
    }

    /// Same as [`set_chosen`](Self::set_chosen) with selector labels
    /// (`"BRAND model"`). Unknown labels are skipped.
    pub fn set_chosen_labels(&mut self, labels: &[&str]) -> DashResult<ViewUpdate> {
        let keys: Vec<CarKey> = labels
            .iter()
            .filter_map(|label| {
                let key = self.dataset.key_for_label(label).cloned();
                if key.is_none() {
                    warn!(label = %label, "ignoring unknown car label in selection");
                }
                key
            })
            .collect();
        self.set_chosen(&keys)
    }

    /// Picks up to three distinct cars at random and compares them.
    pub fn pick_random(&mut self) -> DashResult<ViewUpdate> {
        let chosen = pick_random_keys(&self.dataset, &mut self.rng);
        self.apply_chosen(chosen)
    }

    /// [`pick_random`](Self::pick_random) with a caller-supplied generator.
    pub fn pick_random_with<G: Rng + ?Sized>(&mut self, rng: &mut G) -> DashResult<ViewUpdate> {
        let chosen = pick_random_keys(&self.dataset, rng);
        self.apply_chosen(chosen)
    }

    /// Switches the gauge baseline. Only the gauges are redrawn.
    pub fn set_baseline_mode(&mut self, mode: BaselineMode) -> DashResult<ViewUpdate> {
        debug!(mode = ?mode, "baseline mode changed");
        self.selection.set_baseline_mode(mode);
        self.retarget_needles();
        self.render_gauges()?;
        Ok(ViewUpdate::from_topic(ViewTopic::Gauges))
    }

    /// Restyles scatter points against `filter` on the cached layout.
    pub fn set_seat_filter(&mut self, filter: SeatFilter) -> DashResult<ViewUpdate> {
        debug!(filter = %filter, "seat filter changed");
        self.selection.set_seat_filter(filter);
        self.restyle_scatter()
    }

    /// Changes both scatter axes and relayouts the scatter.
    pub fn set_axes(&mut self, x_axis: MetricKey, y_axis: MetricKey) -> DashResult<ViewUpdate> {
        debug!(x_axis = %x_axis, y_axis = %y_axis, "scatter axes changed");
        self.selection.set_axes(x_axis, y_axis);
        self.relayout_scatter()
    }

    /// Changes the scatter sampling cap and relayouts the scatter.
    pub fn set_max_display_count(&mut self, count: usize) -> DashResult<ViewUpdate> {
        debug!(count, "scatter max display count changed");
        self.selection.set_max_display_count(count);
        self.relayout_scatter()
    }

    /// Applies a container size change to the scatter. Unchanged or
    /// zero-area sizes draw nothing.
    pub fn resize_scatter(&mut self, viewport: Viewport) -> DashResult<ViewUpdate> {
        if !self.scatter.resize(viewport) {
            return Ok(ViewUpdate::none());
        }
        self.relayout_scatter()
    }

    /// Runs one host frame at `now_ms`.
    ///
    /// The ribbon always redraws. Gauges redraw while any needle is sweeping,
    /// plus the frame on which the last sweep settles. The first finite
    /// timestamp becomes the clock origin: sweeps started before it are
    /// rebased onto it.
    pub fn tick(&mut self, now_ms: f64) -> DashResult<ViewUpdate> {
        if !self.clock_started && now_ms.is_finite() {
            self.needles.shift_clock(now_ms - self.now_ms);
            self.now_ms = now_ms;
            self.clock_started = true;
            debug!(origin_ms = now_ms, "dashboard clock started");
        }
        let was_animating = self.needles.is_animating(self.now_ms);
        if now_ms.is_finite() {
            self.now_ms = now_ms;
        }

        let dt = self
            .scheduler
            .tick(now_ms, self.selection.chosen(), &self.dataset);
        trace!(now_ms, dt, "dashboard tick");
        self.render_ribbon()?;

        let mut update = ViewUpdate::from_topic(ViewTopic::Ribbon);
        if was_animating || self.needles.is_animating(self.now_ms) {
            self.render_gauges()?;
            update = update.with_topic(ViewTopic::Gauges);
        }
        Ok(update)
    }

    /// Deterministic view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            now_ms: self.now_ms,
            dataset_size: self.dataset.len(),
            load_stats: self.dataset.stats(),
            chosen: self.selection.chosen().to_vec(),
            baseline_mode: self.selection.baseline_mode(),
            seat_filter: self.selection.seat_filter().clone(),
            x_axis: self.selection.x_axis(),
            y_axis: self.selection.y_axis(),
            max_display_count: self.selection.max_display_count(),
            scatter_viewport: self.scatter.viewport(),
            scatter_points: self
                .scatter
                .layout()
                .map_or(0, |layout| layout.points.len()),
            ribbon_frames: self.scheduler.frames(),
            ribbon: self
                .scheduler
                .states()
                .map(|state| RibbonMarkerSnapshot {
                    key: state.key.clone(),
                    phase_offset: state.phase_offset,
                    velocity: state.velocity,
                })
                .collect(),
            needles: self
                .needle_targets
                .iter()
                .map(|target| NeedleSnapshot {
                    car: target.key.car.clone(),
                    metric: target.key.metric,
                    display_value: target.display_value,
                    target_angle: target.angle,
                    rendered_angle: self.needles.angle(&target.key, self.now_ms),
                })
                .collect(),
        }
    }

    fn apply_chosen(&mut self, chosen: ChosenKeys) -> DashResult<ViewUpdate> {
        debug!(
            chosen = ?chosen.iter().map(CarKey::as_str).collect::<Vec<_>>(),
            "comparison selection changed"
        );
        self.selection.replace_chosen(chosen);
        self.render_comparison()?;
        Ok(ViewUpdate::comparison())
    }

    /// Ribbon first, then gauges, both from the current selection.
    fn render_comparison(&mut self) -> DashResult<()> {
        self.scheduler
            .sync_members(self.selection.chosen(), &self.dataset);
        self.render_ribbon()?;
        self.retarget_needles();
        self.render_gauges()
    }

    fn retarget_needles(&mut self) {
        let cars = self.selection.chosen_cars(&self.dataset);
        let targets = GaugeView::targets(&cars, &self.dataset, self.selection.baseline_mode());
        self.needles.retain_cars(self.selection.chosen());
        for target in &targets {
            self.needles
                .retarget(target.key.clone(), target.angle, self.now_ms);
        }
        self.needle_targets = targets;
    }

    fn render_ribbon(&mut self) -> DashResult<()> {
        let frame = self.ribbon.build_frame(&self.scheduler, &self.dataset)?;
        self.renderer.render(&frame)
    }

    fn render_gauges(&mut self) -> DashResult<()> {
        let cars = self.selection.chosen_cars(&self.dataset);
        let frame = self.gauges.build_frame(&cars, &self.needles, self.now_ms)?;
        self.renderer.render(&frame)
    }

    fn relayout_scatter(&mut self) -> DashResult<ViewUpdate> {
        if !self.scatter.relayout(&self.dataset, &self.selection)? {
            return Ok(ViewUpdate::none());
        }
        self.render_scatter()?;
        Ok(ViewUpdate::from_topic(ViewTopic::ScatterLayout))
    }

    fn restyle_scatter(&mut self) -> DashResult<ViewUpdate> {
        if self.scatter.layout().is_none() {
            return Ok(ViewUpdate::none());
        }
        self.render_scatter()?;
        Ok(ViewUpdate::from_topic(ViewTopic::ScatterStyle))
    }

    fn render_scatter(&mut self) -> DashResult<()> {
        if let Some(frame) = self.scatter.build_frame(self.selection.seat_filter()) {
            self.renderer.render(&frame)?;
        }
        Ok(())
    }
}

use std::sync::Arc;

use serde_json::Value;
use tokio::{sync::mpsc::UnboundedSender, time::Instant};
use tracing::{debug, error, info, instrument, trace, warn};

use super::{
    DeskletEvent, DeskletHost, DrawingSurface, REPAINT_SIGNAL, ResumeMonitor, SettingsEditor,
};
use crate::{
    clock::{
        ClockScheduler, ClockZone, DisplayTime, HandAngles, SystemClock, TickId, TimeSource,
        aligned_start_delay, steady_delay,
    },
    core::Result,
    paths::DeskletPaths,
    render::{
        Canvas, Compositor, Layer, Layers, MARGIN, Scene, label_text, label_visible, place_label,
    },
    settings::{ClockSettings, SettingsStore, changed_signal, keys},
    signals::{Handler, SignalTracker},
    theme::{Theme, ThemeLoader},
};

/// Header text shown in the host decorations.
pub const HEADER: &str = "Clock";

/// Label of the menu entry that opens the settings editor.
pub const SETTINGS_ACTION: &str = "Settings";

const DEFAULT_THEME: &str = "default";

const WATCHED_KEYS: [&str; 7] = [
    keys::SIZE,
    keys::THEME,
    keys::SHOW_SECONDS,
    keys::HIDE_DECORATIONS,
    keys::TIMEZONE_USE,
    keys::TIMEZONE,
    keys::TIMEZONE_DISPLAY,
];

fn forward(events: &UnboundedSender<DeskletEvent>, event: DeskletEvent) {
    if events.send(event).is_err() {
        trace!("event loop gone, dropping event");
    }
}

/// One analog clock desklet.
///
/// All state changes go through [`handle_event`](Self::handle_event) and
/// [`tick`](Self::tick), called from a single event loop. Signal handlers
/// registered with the host and the settings store only forward
/// [`DeskletEvent`]s into that loop.
pub struct AnalogClock {
    instance_id: String,
    host: Arc<dyn DeskletHost>,
    settings: Arc<SettingsStore>,
    config: ClockSettings,
    themes: ThemeLoader,
    theme: Theme,
    zone: ClockZone,
    time_source: Arc<dyn TimeSource>,
    display_time: DisplayTime,
    scheduler: ClockScheduler,
    surface: Option<Arc<dyn DrawingSurface>>,
    queued: Layers,
    paint_signals: SignalTracker<Layer>,
    settings_signals: SignalTracker<Value>,
    events: UnboundedSender<DeskletEvent>,
    editor: SettingsEditor,
    monitor_resume: bool,
    resume: Option<ResumeMonitor>,
    removed: bool,
}

impl AnalogClock {
    /// Opens the instance's settings and loads its theme.
    ///
    /// If the configured theme cannot be loaded the bundled default theme is
    /// tried instead.
    ///
    /// # Errors
    /// * `DeskletError::Settings` - If the settings file cannot be created
    /// * `DeskletError::Theme` - If neither the configured nor the default theme loads
    #[instrument(skip(host, paths, events))]
    pub fn new(
        host: Arc<dyn DeskletHost>,
        paths: &DeskletPaths,
        instance_id: &str,
        events: UnboundedSender<DeskletEvent>,
    ) -> Result<Self> {
        let settings = SettingsStore::open(paths, instance_id)?;
        let config = settings.snapshot();
        let themes = ThemeLoader::new(paths.themes_dir());
        let theme = load_initial_theme(&themes, &config.theme)?;
        let zone = ClockZone::resolve(config.active_timezone().as_deref());

        Ok(Self {
            instance_id: instance_id.to_string(),
            host,
            settings,
            config,
            themes,
            theme,
            zone,
            time_source: Arc::new(SystemClock),
            display_time: DisplayTime::default(),
            scheduler: ClockScheduler::new(),
            surface: None,
            queued: Layers::empty(),
            paint_signals: SignalTracker::new(),
            settings_signals: SignalTracker::new(),
            events,
            editor: SettingsEditor::from_env(),
            monitor_resume: true,
            resume: None,
            removed: false,
        })
    }

    /// Replaces the wall clock.
    #[must_use]
    pub fn with_time_source(mut self, time_source: Arc<dyn TimeSource>) -> Self {
        self.time_source = time_source;
        self
    }

    /// Replaces the settings editor command.
    #[must_use]
    pub fn with_editor(mut self, editor: SettingsEditor) -> Self {
        self.editor = editor;
        self
    }

    /// Skips listening for resume on the system bus.
    #[must_use]
    pub fn without_resume_monitor(mut self) -> Self {
        self.monitor_resume = false;
        self
    }

    /// Places the clock on the host and starts ticking.
    ///
    /// # Errors
    /// * `DeskletError::Host` - If the host cannot create a surface
    /// * `DeskletError::Signal` - If called after removal
    #[instrument(skip(self), fields(instance = %self.instance_id))]
    pub fn on_added(&mut self) -> Result<()> {
        if self.surface.is_some() {
            warn!("desklet already added");
            return Ok(());
        }

        self.host.set_header(HEADER);
        self.host.set_decorations_hidden(self.config.hide_decorations);

        let side = self.config.size + 2.0 * MARGIN;
        let surface = self.host.create_surface(side, side)?;

        let events = self.events.clone();
        self.paint_signals.subscribe(
            &surface,
            REPAINT_SIGNAL,
            Handler::new(move |layer: &Layer| forward(&events, DeskletEvent::Repaint(*layer))),
            "paint",
        )?;

        for key in WATCHED_KEYS {
            let events = self.events.clone();
            let handler = Handler::new(move |value: &Value| {
                forward(
                    &events,
                    DeskletEvent::SettingChanged {
                        key: key.to_string(),
                        value: value.clone(),
                    },
                );
            });
            self.settings_signals
                .subscribe(&self.settings, &changed_signal(key), handler, "settings")?;
        }

        let events = self.events.clone();
        self.host.add_menu_action(
            SETTINGS_ACTION,
            Handler::new(move |_: &()| forward(&events, DeskletEvent::OpenSettings)),
        );

        if let Err(e) = self.settings.start_watching() {
            warn!(error = %e, "external settings changes will not be picked up");
        }

        if self.monitor_resume {
            let events = self.events.clone();
            self.resume = Some(ResumeMonitor::spawn(Handler::new(move |_: &()| {
                forward(&events, DeskletEvent::Resumed);
            })));
        }

        self.surface = Some(surface);
        self.display_time = self.now();
        self.request_repaint(Layers::all());
        self.refresh_label();

        self.scheduler
            .schedule(aligned_start_delay(self.display_time.millisecond));

        info!(theme = self.theme.name(), size = self.config.size, "desklet added");
        Ok(())
    }

    /// Applies one event. Returns `false` once the desklet is gone.
    pub fn handle_event(&mut self, event: DeskletEvent) -> bool {
        if self.removed {
            debug!(?event, "ignoring event after removal");
            return false;
        }

        match event {
            DeskletEvent::SettingChanged { key, .. } => self.on_setting_changed(&key),
            DeskletEvent::Repaint(layer) => self.paint(layer),
            DeskletEvent::Resumed => self.force_update(),
            DeskletEvent::OpenSettings => {
                if let Err(e) = self.editor.launch(&self.instance_id) {
                    error!(error = %e, "could not open settings editor");
                }
            }
            DeskletEvent::Remove => {
                self.on_removed();
                return false;
            }
        }

        true
    }

    /// Handles a scheduled wake-up. Cancelled or replaced ticks are ignored.
    pub fn tick(&mut self, id: TickId) {
        if self.removed {
            return;
        }

        if self.scheduler.fire(id) {
            self.update_clock();
        }
    }

    /// The pending tick and when it is due.
    pub fn next_tick(&self) -> Option<(TickId, Instant)> {
        self.scheduler.pending().zip(self.scheduler.deadline())
    }

    /// Recomputes the displayed time, queues a hands repaint and schedules
    /// the next tick.
    ///
    /// The previous tick must already be consumed or cancelled.
    fn update_clock(&mut self) {
        self.display_time = self.now();
        self.request_repaint(Layers::HANDS);

        let delay = steady_delay(self.config.show_seconds, self.display_time.second);
        self.scheduler.schedule(delay);
    }

    /// Cancels the pending tick and updates immediately.
    pub fn force_update(&mut self) {
        if self.removed {
            return;
        }

        self.scheduler.cancel();
        self.update_clock();
    }

    /// Paints `layer` onto the surface.
    pub fn paint(&mut self, layer: Layer) {
        self.queued.remove(layer.into());

        let Some(surface) = self.surface.clone() else {
            return;
        };

        let scene = self.scene();
        surface.paint(layer, &mut |canvas: &mut dyn Canvas| {
            Compositor::paint(layer, canvas, &scene);
        });
    }

    /// Shows, moves or hides the timezone label to match the settings.
    pub fn refresh_label(&self) {
        if !label_visible(&self.config, self.host.decoration_level()) {
            self.host.show_label(None);
            return;
        }

        let text = label_text(&self.config.timezone);
        let style = self.theme.label_style().map(str::to_string);
        let extent = self.host.measure_label(&text, style.as_deref());
        let placement = place_label(text, style, self.config.size, extent);

        self.host.show_label(Some(&placement));
    }

    /// Tears the desklet down.
    ///
    /// Stops the tick, releases paint subscriptions, releases settings
    /// subscriptions and disposes the settings store, in that order. Later
    /// calls do nothing.
    #[instrument(skip(self), fields(instance = %self.instance_id))]
    pub fn on_removed(&mut self) {
        if self.removed {
            debug!("desklet already removed");
            return;
        }
        self.removed = true;

        self.scheduler.cancel();
        self.paint_signals.dispose();
        self.settings_signals.dispose();
        self.settings.dispose();

        if let Some(resume) = self.resume.take() {
            resume.stop();
        }

        info!("desklet removed");
    }

    /// Instance this desklet belongs to.
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Settings store of this instance.
    pub fn settings(&self) -> &Arc<SettingsStore> {
        &self.settings
    }

    /// Typed settings as last applied.
    pub fn config(&self) -> &ClockSettings {
        &self.config
    }

    /// Currently loaded theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Time the hands currently show.
    pub fn display_time(&self) -> DisplayTime {
        self.display_time
    }

    /// Layers with a repaint requested but not yet painted.
    pub fn queued_layers(&self) -> Layers {
        self.queued
    }

    /// Whether [`on_removed`](Self::on_removed) has run.
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Sender feeding this desklet's event loop.
    pub fn event_sender(&self) -> UnboundedSender<DeskletEvent> {
        self.events.clone()
    }

    fn now(&self) -> DisplayTime {
        DisplayTime::at(self.time_source.now(), self.zone)
    }

    fn scene(&self) -> Scene<'_> {
        Scene {
            theme: &self.theme,
            size: self.config.size,
            angles: HandAngles::at(self.display_time),
            show_seconds: self.config.show_seconds,
        }
    }

    fn request_repaint(&mut self, layers: Layers) {
        let Some(surface) = self.surface.clone() else {
            return;
        };

        for layer in Layer::ALL {
            let flag = Layers::from(layer);
            if layers.contains(flag) && !self.queued.contains(flag) {
                self.queued.insert(flag);
                surface.queue_repaint(layer);
            }
        }
    }

    fn on_setting_changed(&mut self, key: &str) {
        let next = self.settings.snapshot_over(&self.config);
        let previous = std::mem::replace(&mut self.config, next);
        debug!(key, "setting changed");

        match key {
            keys::SIZE => self.on_size_changed(previous.size),
            keys::THEME => self.on_theme_changed(),
            keys::SHOW_SECONDS => self.force_update(),
            keys::HIDE_DECORATIONS => {
                self.host.set_decorations_hidden(self.config.hide_decorations);
                self.refresh_label();
            }
            keys::TIMEZONE_USE | keys::TIMEZONE => {
                self.zone = ClockZone::resolve(self.config.active_timezone().as_deref());
                self.force_update();
                self.refresh_label();
            }
            keys::TIMEZONE_DISPLAY => self.refresh_label(),
            _ => trace!(key, "setting not used by the clock"),
        }
    }

    fn on_size_changed(&mut self, previous: f64) {
        let size = self.config.size;
        if size == previous {
            warn!(
                stored = ?self.settings.get(keys::SIZE),
                size,
                "ignoring invalid clock size"
            );
            return;
        }

        if let Some(surface) = &self.surface {
            let side = size + 2.0 * MARGIN;
            surface.resize(side, side);
        }

        self.request_repaint(Layers::BACKDROP);
        self.force_update();
        self.refresh_label();
    }

    fn on_theme_changed(&mut self) {
        self.scheduler.cancel();

        match self.themes.load_theme(&self.config.theme) {
            Ok(theme) => self.theme = theme,
            Err(e) => error!(
                error = %e,
                current = self.theme.name(),
                "could not load theme, keeping the current one"
            ),
        }

        self.request_repaint(Layers::BACKDROP);
        self.update_clock();
        self.refresh_label();
    }
}

fn load_initial_theme(themes: &ThemeLoader, name: &str) -> Result<Theme> {
    match themes.load_theme(name) {
        Ok(theme) => Ok(theme),
        Err(e) if name != DEFAULT_THEME => {
            warn!(error = %e, theme = name, "falling back to the default theme");
            Ok(themes.load_theme(DEFAULT_THEME)?)
        }
        Err(e) => Err(e.into()),
    }
}

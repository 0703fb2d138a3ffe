//! Player - wires one widget together
//!
//! Owns the controller, the controls, the sampler loop and the resize
//! notifier. Hosts construct it with their backends and mount points, then
//! either call [`Player::handle`] and the tick methods from their own event
//! loop, or hand it to [`Player::run`] and talk to it through a
//! [`PlayerHandle`]. The controller is only exposed read-only, so every
//! command goes through [`Player::handle`] and its events are routed
//! before the call returns.
//!
//! The player is `!Send` (observers are plain closures); run it on a
//! current-thread runtime or inside a `tokio::task::LocalSet`.

use crate::{
    backend::{AnalysisBackend, MediaBackend, MediaSignal, Renderer},
    controller::PlaybackController,
    controls::{Controls, ControlsView},
    drag::{BarGeometry, BarKind, PointerPosition},
    error::{PlaybackError, Result},
    events::{EventKind, PlayerEvent},
    resize::{ResizeNotifier, Viewport, RESIZE_POLL_INTERVAL},
    sampler::{SamplerLoop, SamplerTick},
};
use spiral_core::Settings;
use std::cell::Cell;
use std::rc::Rc;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};
use tracing::{debug, error, info};

/// Maps client (page) coordinates into a bar's coordinate space
pub trait BarTransform {
    fn to_bar(&self, bar: BarKind, client: PointerPosition) -> PointerPosition;
}

impl<F> BarTransform for F
where
    F: Fn(BarKind, PointerPosition) -> PointerPosition,
{
    fn to_bar(&self, bar: BarKind, client: PointerPosition) -> PointerPosition {
        self(bar, client)
    }
}

/// Host-side mount points
pub struct Mount {
    pub renderer: Box<dyn Renderer>,
    pub transform: Box<dyn BarTransform>,
    pub viewport: Viewport,
    pub seek_bar: BarGeometry,
    pub volume_bar: BarGeometry,
}

/// Transport commands from buttons or the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransportCommand {
    Play,
    Pause,
    Toggle,
    Next,
    Last,
    ToggleMute,
    SetVolume(f32),
    Seek(f64),
    FinishSeek,
}

/// Everything the player reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerInput {
    /// Lifecycle signal from the media backend
    Media(MediaSignal),
    /// Pointer pressed on a bar, in client coordinates
    PointerDown {
        bar: BarKind,
        client: PointerPosition,
    },
    /// Pointer moved, in client coordinates
    PointerMove { client: PointerPosition },
    /// Pointer released
    PointerUp,
    Command(TransportCommand),
    /// Native resize
    Resized(Viewport),
}

/// Cloneable sender feeding a running [`Player`]
#[derive(Debug, Clone)]
pub struct PlayerHandle {
    tx: mpsc::UnboundedSender<PlayerInput>,
}

impl PlayerHandle {
    /// Queue an input
    pub fn send(&self, input: PlayerInput) -> Result<()> {
        self.tx.send(input).map_err(|_| PlaybackError::PlayerClosed)
    }

    pub fn media(&self, signal: MediaSignal) -> Result<()> {
        self.send(PlayerInput::Media(signal))
    }

    pub fn command(&self, command: TransportCommand) -> Result<()> {
        self.send(PlayerInput::Command(command))
    }

    pub fn resized(&self, viewport: Viewport) -> Result<()> {
        self.send(PlayerInput::Resized(viewport))
    }
}

/// Create a handle and the receiver [`Player::run`] consumes
pub fn player_channel() -> (PlayerHandle, mpsc::UnboundedReceiver<PlayerInput>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (PlayerHandle { tx }, rx)
}

/// One visualizer widget
pub struct Player<M: MediaBackend> {
    controller: PlaybackController<M>,
    controls: Controls,
    sampler: SamplerLoop,
    resize: ResizeNotifier,
    /// Written by the resize callback
    sample_cap: Rc<Cell<usize>>,
    renderer: Box<dyn Renderer>,
    transform: Box<dyn BarTransform>,
    title: Option<String>,
}

impl<M: MediaBackend> Player<M> {
    /// Build a player from validated settings
    ///
    /// The first track is loaded but not played. The playlist moves into
    /// the controller.
    pub fn new(
        settings: Settings,
        media: M,
        analysis: Option<Box<dyn AnalysisBackend>>,
        mount: Mount,
    ) -> Result<Self> {
        settings.validate()?;

        info!(
            tracks = settings.audio.len(),
            fft_size = settings.fft_size(),
            autoplay = settings.autoplay,
            "Creating player"
        );

        let controls = Controls::new(mount.seek_bar, mount.volume_bar, settings.volume);
        let sampler = SamplerLoop::new(settings.frame_interval());

        let sample_cap = Rc::new(Cell::new(0));
        let mut resize = ResizeNotifier::new(mount.viewport);
        {
            let effect = settings.primary_effect().clone();
            let cap = Rc::clone(&sample_cap);
            resize.register(move |viewport: Viewport| {
                cap.set(effect.max_samples(viewport.width, viewport.height));
            });
        }

        let controller = PlaybackController::with_event_queue(settings, media, analysis);

        let mut player = Self {
            controller,
            controls,
            sampler,
            resize,
            sample_cap,
            renderer: mount.renderer,
            transform: mount.transform,
            title: None,
        };
        player.sampler.set_cap(player.sample_cap.get());
        player.dispatch_events();
        Ok(player)
    }

    /// Parse settings JSON and build a player
    ///
    /// Malformed settings are logged and no player is built.
    pub fn from_json(
        json: &str,
        media: M,
        analysis: Option<Box<dyn AnalysisBackend>>,
        mount: Mount,
    ) -> Result<Self> {
        let settings = Settings::from_json(json).map_err(|e| {
            error!(error = %e, "Invalid player settings");
            PlaybackError::from(e)
        })?;
        Self::new(settings, media, analysis, mount)
    }

    /// Register a synchronous observer on the controller
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&PlayerEvent) + 'static,
    {
        self.controller.subscribe(kind, handler);
    }

    /// React to one input
    pub fn handle(&mut self, input: PlayerInput) {
        match input {
            PlayerInput::Media(signal) => self.controller.handle_signal(signal),
            PlayerInput::PointerDown { bar, client } => {
                let pos = self.transform.to_bar(bar, client);
                self.controls.pointer_down(bar, pos, &mut self.controller);
            }
            PlayerInput::PointerMove { client } => {
                if let Some(bar) = self.controls.session().map(|s| s.target.bar()) {
                    let pos = self.transform.to_bar(bar, client);
                    self.controls.pointer_move(pos, &mut self.controller);
                }
            }
            PlayerInput::PointerUp => self.controls.pointer_up(&mut self.controller),
            PlayerInput::Command(command) => self.command(command),
            PlayerInput::Resized(viewport) => self.resize.mark_resized(viewport),
        }
        self.dispatch_events();
    }

    fn command(&mut self, command: TransportCommand) {
        debug!(?command, "Transport command");
        match command {
            TransportCommand::Play => {
                self.controller.play();
            }
            TransportCommand::Pause => {
                self.controller.pause();
            }
            TransportCommand::Toggle => {
                self.controller.toggle();
            }
            TransportCommand::Next => self.controller.next(),
            TransportCommand::Last => self.controller.last(),
            TransportCommand::ToggleMute => self.controls.toggle_mute(&mut self.controller),
            TransportCommand::SetVolume(level) => self.controller.set_volume(level),
            TransportCommand::Seek(seconds) => self.controller.seek(seconds),
            TransportCommand::FinishSeek => self.controller.finish_seek(),
        }
    }

    /// Route queued controller events to the controls, title and sampler
    fn dispatch_events(&mut self) {
        for event in self.controller.drain_events() {
            self.controls.apply_event(&event, &self.controller);
            match event {
                PlayerEvent::Title { title } => self.title = Some(title),
                PlayerEvent::Playing if self.controller.sampling_enabled() => {
                    self.sampler.on_playing();
                }
                _ => {}
            }
        }
    }

    /// Run one sampler tick
    pub fn tick_sampler(&mut self) -> SamplerTick {
        self.sampler.set_cap(self.sample_cap.get());
        self.sampler
            .tick(&mut self.controller, &mut *self.renderer)
    }

    /// Run pending resize callbacks
    pub fn poll_resize(&mut self) -> bool {
        let fired = self.resize.poll();
        if fired {
            self.sampler.set_cap(self.sample_cap.get());
            debug!(cap = self.sample_cap.get(), "Sample cap recomputed");
        }
        fired
    }

    /// Drive the player until every [`PlayerHandle`] is dropped
    ///
    /// Returns the player so its final state can be inspected.
    pub async fn run(mut self, mut inputs: mpsc::UnboundedReceiver<PlayerInput>) -> Self {
        let mut resize_poll = time::interval(RESIZE_POLL_INTERVAL);
        resize_poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut frames: Option<Interval> = None;

        loop {
            if self.sampler.is_active() && frames.is_none() {
                let period = self.sampler.interval();
                let mut interval = time::interval_at(Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                frames = Some(interval);
            }

            tokio::select! {
                input = inputs.recv() => match input {
                    Some(input) => self.handle(input),
                    None => break,
                },
                _ = resize_poll.tick() => {
                    self.poll_resize();
                }
                () = next_frame(&mut frames) => {
                    self.tick_sampler();
                    if !self.sampler.is_active() {
                        frames = None;
                    }
                }
            }
        }

        info!(frames = self.sampler.frames_rendered(), "Player inputs closed");
        self
    }

    // ===== Accessors =====

    pub fn controller(&self) -> &PlaybackController<M> {
        &self.controller
    }

    /// Controls snapshot for painting
    pub fn controls(&self) -> ControlsView {
        self.controls.view()
    }

    /// Title of the last titled track loaded
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn sampler(&self) -> &SamplerLoop {
        &self.sampler
    }

    /// Current per-array sample cap
    pub fn sample_cap(&self) -> usize {
        self.sample_cap.get()
    }

    pub fn viewport(&self) -> Viewport {
        self.resize.viewport()
    }
}

async fn next_frame(frames: &mut Option<Interval>) {
    match frames {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

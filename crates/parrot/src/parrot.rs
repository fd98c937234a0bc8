use {
    crate::{
        Camera, Command, CommandDispatcher, FramedImageSource, Intent, JsonCommandSink,
        JsonLineSource, ParrotConfig, ParrotError, TelemetrySample,
    },
    base::Tensor,
    com::{Acquisition, Delivery, HealthReport, Sink, Source, StreamError},
    image::Image,
    std::sync::Arc,
    vision::{BoundingBox, Extractor, FeaturePipeline, TemplateTracker, Tracker, TrackingState},
};

// names of the transport threads
const VIDEO: &str = "video";
const TELEMETRY: &str = "telemetry";
const REMOTE: &str = "remote";
const COMMANDS: &str = "commands";

/// Fold a health poll into liveness, logging and converting a fatal error.
fn health(name: &str, poll: Result<HealthReport, StreamError>) -> Result<bool, ParrotError> {
    match poll {
        Ok(report) => Ok(report.alive),
        Err(error) => {
            log::error!("{name} stream stopped: {error}");
            Err(error.into())
        }
    }
}

/// The vehicle as seen by the control loop.
///
/// Each stream is initialized separately and pulled on demand: `get_*`
/// blocks until the next unit is available and remembers it as the latest.
/// Processing (features, tracking) always works on the latest frame.
pub struct Parrot {
    config: ParrotConfig,
    video: Option<Acquisition<Image>>,
    telemetry: Option<Acquisition<TelemetrySample>>,
    remote: Option<Acquisition<Command>>,
    commands: Option<Delivery<Command>>,
    frame: Option<Arc<Image>>,
    sample: Option<TelemetrySample>,
    remote_command: Option<Command>,
    pipeline: Option<FeaturePipeline>,
    tracker: Box<dyn Tracker>,
    tracking: Option<TrackingState>,
}

impl Parrot {
    pub fn new(config: ParrotConfig) -> Self {
        Self {
            config,
            video: None,
            telemetry: None,
            remote: None,
            commands: None,
            frame: None,
            sample: None,
            remote_command: None,
            pipeline: None,
            tracker: Box::new(TemplateTracker::default()),
            tracking: None,
        }
    }

    /// Replace the tracker used by `init_tracking`.
    pub fn with_tracker(mut self, tracker: Box<dyn Tracker>) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn config(&self) -> &ParrotConfig {
        &self.config
    }

    /// Start video acquisition; returns once the first frame has arrived.
    pub fn init_video<S>(&mut self, source: S) -> Result<(), ParrotError>
    where
        S: Source<Image> + 'static,
    {
        let video = Acquisition::spawn(VIDEO, source)?;
        let frame = video.get();
        log::info!("video: first frame {}x{}", frame.width(), frame.height());
        self.frame = Some(Arc::new(frame));
        self.video = Some(video);
        Ok(())
    }

    /// Start telemetry acquisition; returns once the first sample has arrived.
    pub fn init_telemetry<S>(&mut self, source: S) -> Result<(), ParrotError>
    where
        S: Source<TelemetrySample> + 'static,
    {
        let telemetry = Acquisition::spawn(TELEMETRY, source)?;
        self.sample = Some(telemetry.get());
        self.telemetry = Some(telemetry);
        log::info!("telemetry: running");
        Ok(())
    }

    /// Start reading pilot commands; returns once the first command has arrived.
    pub fn init_remote<S>(&mut self, source: S) -> Result<(), ParrotError>
    where
        S: Source<Command> + 'static,
    {
        let remote = Acquisition::spawn(REMOTE, source)?;
        self.remote_command = Some(remote.get());
        self.remote = Some(remote);
        log::info!("remote: running");
        Ok(())
    }

    /// Start the outgoing command link.
    pub fn init_commands<S>(&mut self, sink: S) -> Result<(), ParrotError>
    where
        S: Sink<Command> + 'static,
    {
        let commands = Delivery::spawn(COMMANDS, sink)?;
        self.commands = Some(commands);
        log::info!("commands: running");
        Ok(())
    }

    /// Connect video, telemetry and commands over TCP to the configured vehicle.
    pub fn connect(config: ParrotConfig) -> Result<Self, ParrotError> {
        let timeout = config.read_timeout();
        let video = FramedImageSource::connect(&config.video_address(), timeout)?;
        let telemetry = JsonLineSource::<_, TelemetrySample>::connect(&config.navdata_address(), timeout)?;
        let commands = JsonCommandSink::connect(&config.command_address())?;
        let camera = config.camera();

        let mut parrot = Self::new(config);
        parrot.init_commands(commands)?;
        if camera != Camera::Front {
            parrot.change_camera(camera)?;
        }
        parrot.init_video(video)?;
        parrot.init_telemetry(telemetry)?;
        Ok(parrot)
    }

    /// Wait for the next frame.
    pub fn get_frame(&mut self) -> Result<Arc<Image>, ParrotError> {
        let video = self.video.as_ref().ok_or(ParrotError::NotInitialized(VIDEO))?;
        let frame = Arc::new(video.get());
        self.frame = Some(Arc::clone(&frame));
        Ok(frame)
    }

    /// Wait for the next telemetry sample.
    pub fn get_telemetry(&mut self) -> Result<TelemetrySample, ParrotError> {
        let telemetry = self
            .telemetry
            .as_ref()
            .ok_or(ParrotError::NotInitialized(TELEMETRY))?;
        let sample = telemetry.get();
        self.sample = Some(sample.clone());
        Ok(sample)
    }

    /// Wait for the next pilot command.
    pub fn get_remote_command(&mut self) -> Result<Command, ParrotError> {
        let remote = self.remote.as_ref().ok_or(ParrotError::NotInitialized(REMOTE))?;
        let command = remote.get();
        self.remote_command = Some(command);
        Ok(command)
    }

    /// Latest frame received, without waiting.
    pub fn frame(&self) -> Option<&Arc<Image>> {
        self.frame.as_ref()
    }

    pub fn telemetry(&self) -> Option<&TelemetrySample> {
        self.sample.as_ref()
    }

    pub fn remote_command(&self) -> Option<Command> {
        self.remote_command
    }

    /// Dispatcher bound to the outgoing command link.
    pub fn dispatcher(&self) -> Result<CommandDispatcher, ParrotError> {
        let commands = self
            .commands
            .as_ref()
            .ok_or(ParrotError::NotInitialized(COMMANDS))?;
        Ok(CommandDispatcher::new(commands.sender()))
    }

    /// Queue an arbitrary command, replacing one not yet written.
    pub fn send_command(&self, command: Command) -> Result<(), ParrotError> {
        self.dispatcher()?.send(command);
        Ok(())
    }

    pub fn dispatch(&self, intent: Intent) -> Result<Command, ParrotError> {
        Ok(self.dispatcher()?.dispatch(intent))
    }

    pub fn land(&self) -> Result<Command, ParrotError> {
        self.dispatch(Intent::Land)
    }

    pub fn takeoff(&self) -> Result<Command, ParrotError> {
        self.dispatch(Intent::Takeoff)
    }

    pub fn stop(&self) -> Result<Command, ParrotError> {
        self.dispatch(Intent::Stop)
    }

    pub fn turn_left(&self, speed: f32) -> Result<Command, ParrotError> {
        self.dispatch(Intent::TurnLeft(speed))
    }

    pub fn turn_right(&self, speed: f32) -> Result<Command, ParrotError> {
        self.dispatch(Intent::TurnRight(speed))
    }

    pub fn fly_up(&self, speed: f32) -> Result<Command, ParrotError> {
        self.dispatch(Intent::FlyUp(speed))
    }

    pub fn fly_down(&self, speed: f32) -> Result<Command, ParrotError> {
        self.dispatch(Intent::FlyDown(speed))
    }

    pub fn fly_forward(&self, speed: f32) -> Result<Command, ParrotError> {
        self.dispatch(Intent::FlyForward(speed))
    }

    pub fn fly_backward(&self, speed: f32) -> Result<Command, ParrotError> {
        self.dispatch(Intent::FlyBackward(speed))
    }

    pub fn fly_left(&self, speed: f32) -> Result<Command, ParrotError> {
        self.dispatch(Intent::FlyLeft(speed))
    }

    pub fn fly_right(&self, speed: f32) -> Result<Command, ParrotError> {
        self.dispatch(Intent::FlyRight(speed))
    }

    pub fn change_camera(&self, camera: Camera) -> Result<Command, ParrotError> {
        self.dispatch(Intent::ChangeCamera(camera))
    }

    /// Set up windowed feature extraction, checking the grid against the
    /// current frame. Requires video.
    pub fn init_feature_extraction(
        &mut self,
        extractors: Vec<Box<dyn Extractor>>,
    ) -> Result<(), ParrotError> {
        let frame = self.frame.as_ref().ok_or(ParrotError::NotInitialized(VIDEO))?;
        let mut pipeline = FeaturePipeline::new(extractors, self.config.pipeline_config())?;
        pipeline.grid_for(frame.size())?;
        log::info!(
            "feature extraction: {} windows x {} features",
            self.config.grid().x * self.config.grid().y,
            pipeline.total_dims()
        );
        self.pipeline = Some(pipeline);
        Ok(())
    }

    /// Feature matrix of the latest frame, one row per window.
    pub fn visual_features(&mut self) -> Result<Tensor<f32>, ParrotError> {
        let pipeline = self
            .pipeline
            .as_mut()
            .ok_or(ParrotError::NotInitialized("feature extraction"))?;
        let frame = self.frame.as_ref().ok_or(ParrotError::NotInitialized(VIDEO))?;
        Ok(pipeline.extract(frame)?)
    }

    /// Start tracking the box given by two corner points in the latest frame.
    pub fn init_tracking(&mut self, points: Option<&[Vec<i64>]>) -> Result<(), ParrotError> {
        let frame = self.frame.as_ref().ok_or(ParrotError::NotInitialized(VIDEO))?;
        let bbox = BoundingBox::from_points(points)?;
        self.tracking = Some(self.tracker.init(frame, &bbox)?);
        log::info!("tracking: started at {:?}..{:?}", bbox.min, bbox.max);
        Ok(())
    }

    /// Follow the target into the latest frame. On failure the previous
    /// position is kept, so tracking can resume on a later frame.
    pub fn update_tracking(&mut self) -> Result<BoundingBox, ParrotError> {
        let frame = self.frame.as_ref().ok_or(ParrotError::NotInitialized(VIDEO))?;
        let state = self
            .tracking
            .as_ref()
            .ok_or(ParrotError::NotInitialized("tracking"))?;
        let state = self.tracker.update(frame, state.clone())?;
        let bbox = state.bbox();
        self.tracking = Some(state);
        Ok(bbox)
    }

    pub fn tracking(&self) -> Option<&TrackingState> {
        self.tracking.as_ref()
    }

    /// Poll the video stream. `Ok(false)` once it has stopped; its fatal
    /// error is returned once as `Err`.
    pub fn check_video(&mut self) -> Result<bool, ParrotError> {
        let video = self.video.as_mut().ok_or(ParrotError::NotInitialized(VIDEO))?;
        health(VIDEO, video.check())
    }

    pub fn check_telemetry(&mut self) -> Result<bool, ParrotError> {
        let telemetry = self
            .telemetry
            .as_mut()
            .ok_or(ParrotError::NotInitialized(TELEMETRY))?;
        health(TELEMETRY, telemetry.check())
    }

    pub fn check_remote(&mut self) -> Result<bool, ParrotError> {
        let remote = self.remote.as_mut().ok_or(ParrotError::NotInitialized(REMOTE))?;
        health(REMOTE, remote.check())
    }

    pub fn check_commands(&mut self) -> Result<bool, ParrotError> {
        let commands = self
            .commands
            .as_mut()
            .ok_or(ParrotError::NotInitialized(COMMANDS))?;
        health(COMMANDS, commands.check())
    }

    /// Shut down all streams. A command still waiting to be sent (typically
    /// the final `land`) is written before this returns.
    pub fn close(mut self) {
        // acquisitions stop after their current read
        self.video.take();
        self.telemetry.take();
        self.remote.take();
        if let Some(commands) = self.commands.take() {
            commands.close();
            log::info!("commands: closed");
        }
    }
}

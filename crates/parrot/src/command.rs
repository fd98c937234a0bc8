use {
    com::Mailbox,
    serde::{Deserialize, Serialize},
};

/// Vehicle camera selector, by the id the vehicle expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Camera {
    #[default]
    Front,
    Bottom,
    Custom,
}

impl Camera {
    pub fn id(&self) -> u8 {
        match self {
            Camera::Front => 0,
            Camera::Bottom => 3,
            Camera::Custom => 4,
        }
    }

    pub fn from_id(id: u8) -> Option<Camera> {
        match id {
            0 => Some(Camera::Front),
            3 => Some(Camera::Bottom),
            4 => Some(Camera::Custom),
            _ => None,
        }
    }
}

/// One control command: three speed axes, yaw rate, camera and action flags.
///
/// Serialized with the single-letter keys the command link uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Command {
    #[serde(rename = "X")]
    pub lateral: f32,
    #[serde(rename = "Y")]
    pub longitudinal: f32,
    #[serde(rename = "Z")]
    pub vertical: f32,
    #[serde(rename = "R")]
    pub yaw_rate: f32,
    #[serde(rename = "C")]
    pub camera: u8,
    #[serde(rename = "T")]
    pub takeoff: bool,
    #[serde(rename = "L")]
    pub land: bool,
    #[serde(rename = "S")]
    pub stop: bool,
}

impl Default for Command {
    fn default() -> Self {
        Self {
            lateral: 0.0,
            longitudinal: 0.0,
            vertical: 0.0,
            yaw_rate: 0.0,
            camera: Camera::Front.id(),
            takeoff: false,
            land: false,
            stop: false,
        }
    }
}

/// High-level pilot intent. Speeds are magnitudes; the intent sets the sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Land,
    Takeoff,
    Stop,
    TurnLeft(f32),
    TurnRight(f32),
    FlyUp(f32),
    FlyDown(f32),
    FlyForward(f32),
    FlyBackward(f32),
    FlyLeft(f32),
    FlyRight(f32),
    ChangeCamera(Camera),
}

impl Intent {
    /// The default command with only this intent's field changed.
    pub fn to_command(self) -> Command {
        let mut command = Command::default();
        match self {
            Intent::Land => command.land = true,
            Intent::Takeoff => command.takeoff = true,
            Intent::Stop => command.stop = true,
            Intent::TurnLeft(speed) => command.yaw_rate = -speed,
            Intent::TurnRight(speed) => command.yaw_rate = speed,
            Intent::FlyUp(speed) => command.vertical = speed,
            Intent::FlyDown(speed) => command.vertical = -speed,
            Intent::FlyForward(speed) => command.longitudinal = speed,
            Intent::FlyBackward(speed) => command.longitudinal = -speed,
            Intent::FlyLeft(speed) => command.lateral = -speed,
            Intent::FlyRight(speed) => command.lateral = speed,
            Intent::ChangeCamera(camera) => command.camera = camera.id(),
        }
        command
    }
}

/// Turns intents into commands and hands them to the outgoing mailbox.
///
/// Stateless: every command starts from the default, nothing carries over
/// between calls. Never blocks; a command not yet written is replaced.
#[derive(Clone)]
pub struct CommandDispatcher {
    outgoing: Mailbox<Command>,
}

impl CommandDispatcher {
    pub fn new(outgoing: Mailbox<Command>) -> Self {
        Self { outgoing }
    }

    pub fn send(&self, command: Command) {
        if self.outgoing.put(command) {
            log::debug!("command dispatcher: replaced unsent command");
        }
    }

    pub fn dispatch(&self, intent: Intent) -> Command {
        let command = intent.to_command();
        self.send(command);
        command
    }

    pub fn land(&self) -> Command {
        self.dispatch(Intent::Land)
    }

    pub fn takeoff(&self) -> Command {
        self.dispatch(Intent::Takeoff)
    }

    pub fn stop(&self) -> Command {
        self.dispatch(Intent::Stop)
    }

    pub fn turn_left(&self, speed: f32) -> Command {
        self.dispatch(Intent::TurnLeft(speed))
    }

    pub fn turn_right(&self, speed: f32) -> Command {
        self.dispatch(Intent::TurnRight(speed))
    }

    pub fn fly_up(&self, speed: f32) -> Command {
        self.dispatch(Intent::FlyUp(speed))
    }

    pub fn fly_down(&self, speed: f32) -> Command {
        self.dispatch(Intent::FlyDown(speed))
    }

    pub fn fly_forward(&self, speed: f32) -> Command {
        self.dispatch(Intent::FlyForward(speed))
    }

    pub fn fly_backward(&self, speed: f32) -> Command {
        self.dispatch(Intent::FlyBackward(speed))
    }

    pub fn fly_left(&self, speed: f32) -> Command {
        self.dispatch(Intent::FlyLeft(speed))
    }

    pub fn fly_right(&self, speed: f32) -> Command {
        self.dispatch(Intent::FlyRight(speed))
    }

    pub fn change_camera(&self, camera: Camera) -> Command {
        self.dispatch(Intent::ChangeCamera(camera))
    }
}

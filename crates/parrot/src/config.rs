use {crate::Camera, base::Vec2, std::time::Duration, vision::PipelineConfig};

/// Connection and processing settings for a `Parrot`.
#[derive(Debug, Clone)]
pub struct ParrotConfig {
    address: String,
    navdata_port: u16,
    video_port: u16,
    command_port: u16,
    read_timeout: Duration,
    grid: Vec2<usize>,
    overlap: f32,
    camera: Camera,
}

impl Default for ParrotConfig {
    fn default() -> Self {
        Self {
            address: "192.168.1.1".to_string(),
            navdata_port: 5554,
            video_port: 5555,
            command_port: 5556,
            read_timeout: Duration::from_millis(500),
            grid: Vec2::new(15, 7),
            overlap: 0.5,
            camera: Camera::Front,
        }
    }
}

impl ParrotConfig {
    /// Set the vehicle's IP address or host name.
    pub fn with_address(mut self, address: String) -> Self {
        self.address = address;
        self
    }

    pub fn with_navdata_port(mut self, port: u16) -> Self {
        self.navdata_port = port;
        self
    }

    pub fn with_video_port(mut self, port: u16) -> Self {
        self.video_port = port;
        self
    }

    pub fn with_command_port(mut self, port: u16) -> Self {
        self.command_port = port;
        self
    }

    /// Set how long a socket read may stall before it is reported as a warning.
    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Set the feature window grid as columns × rows.
    pub fn with_grid(mut self, cols: usize, rows: usize) -> Self {
        self.grid = Vec2::new(cols, rows);
        self
    }

    /// Set the fraction by which neighbouring windows overlap, in `[0, 1)`.
    pub fn with_overlap(mut self, overlap: f32) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    // Getters
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn navdata_port(&self) -> u16 {
        self.navdata_port
    }

    pub fn video_port(&self) -> u16 {
        self.video_port
    }

    pub fn command_port(&self) -> u16 {
        self.command_port
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    pub fn grid(&self) -> Vec2<usize> {
        self.grid
    }

    pub fn overlap(&self) -> f32 {
        self.overlap
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn navdata_address(&self) -> String {
        format!("{}:{}", self.address, self.navdata_port)
    }

    pub fn video_address(&self) -> String {
        format!("{}:{}", self.address, self.video_port)
    }

    pub fn command_address(&self) -> String {
        format!("{}:{}", self.address, self.command_port)
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new()
            .with_grid(self.grid.x, self.grid.y)
            .with_overlap(self.overlap)
    }
}

use crate::cpu::sm83::CpuError;

/// Describes a single input button that a machine accepts.
pub struct InputButton {
    /// Machine-defined button identifier, passed to `set_input()`.
    pub id: u8,
    /// Human-readable name for display/configuration (e.g., "A", "Start").
    pub name: &'static str,
}

/// A fatal condition raised while running a frame.
///
/// Recoverable conditions (out-of-range bank reads, writes into ROM,
/// unmapped I/O) are absorbed by the bus; only errors that must stop
/// the run loop surface here.
#[derive(Debug)]
pub enum MachineError {
    /// The CPU fetched an opcode with no mapping.
    Cpu(CpuError),
}

impl std::fmt::Display for MachineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cpu(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for MachineError {}

impl From<CpuError> for MachineError {
    fn from(e: CpuError) -> Self {
        Self::Cpu(e)
    }
}

/// Machine-agnostic interface for emulated systems.
///
/// The frontend is a pure presentation shell: it drives whole frames,
/// translates host input events into button IDs, and blits the rendered
/// framebuffer. It knows nothing about the hardware behind the trait.
pub trait Machine {
    /// Native display resolution as (width, height) in pixels.
    fn display_size(&self) -> (u32, u32);

    /// Run one frame of emulation (advance the clock by one frame's worth
    /// of cycles). A fatal CPU error aborts the frame and surfaces.
    fn run_frame(&mut self) -> Result<(), MachineError>;

    /// Render the current video state into an RGB24 pixel buffer.
    ///
    /// The buffer must be at least `width * height * 3` bytes (from
    /// `display_size()`), left-to-right, top-to-bottom, 3 bytes per pixel.
    fn render_frame(&self, buffer: &mut [u8]);

    /// Handle an input event. `button` is a machine-defined ID from
    /// `input_map()`. Called per-event, not per-frame; each call latches
    /// the button state so that `run_frame()` sees the accumulated input.
    fn set_input(&mut self, button: u8, pressed: bool);

    /// Get the list of input buttons this machine accepts.
    fn input_map(&self) -> &[InputButton];

    /// Reset the machine to its initial power-on state.
    fn reset(&mut self);

    /// Nominal frame rate, for wall-clock pacing in the frontend.
    fn frame_rate_hz(&self) -> f64;
}

//! Oversampling debounce filter for the meter pulse line.
//!
//! The reed switch is sampled once per tick.  Each sample is shifted into
//! a 32-bit history register, most recent bit lowest.  The filter arms only
//! after 32 consecutive HIGH (idle) samples and fires on the third
//! consecutive LOW (active) sample after arming.
//!
//! ```text
//!   history == 0xFFFF_FFFF          history & 0b111 == 0
//!  ┌──────┐ ───────────────────────▶ ┌──────┐ ─────────────────────┐
//!  │ Idle │                          │ Busy │                      │
//!  └──────┘ ◀─────────────────────── └──────┘    emit PulseEvent ◀─┘
//! ```
//!
//! Two presses can therefore never be closer than
//! [`MIN_EVENT_SPACING_TICKS`] ticks apart.

/// Tick period of the sampler (1 kHz).
pub const SAMPLE_PERIOD_US: u64 = 1_000;

/// History value meaning "idle for the whole window".
const IDLE_HISTORY: u32 = u32::MAX;

/// Low-order bits that must all be zero to confirm an active level.
const CONFIRM_MASK: u32 = 0b111;

/// Samples in the idle window (width of the history register).
pub const IDLE_WINDOW_TICKS: u32 = u32::BITS;

/// Consecutive active samples needed to confirm a press.
pub const CONFIRM_TICKS: u32 = CONFIRM_MASK.count_ones();

/// Shortest possible spacing between two emitted events, in ticks.
pub const MIN_EVENT_SPACING_TICKS: u32 = IDLE_WINDOW_TICKS + CONFIRM_TICKS;

/// Shift register of the most recent raw samples; bit 0 is the newest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SampleHistory(u32);

impl SampleHistory {
    pub const fn new() -> Self {
        Self(0)
    }

    /// Shift in one raw sample, discarding the oldest.
    pub fn push(&mut self, high: bool) {
        self.0 = (self.0 << 1) | u32::from(high);
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    /// Every sample in the window was HIGH.
    pub fn is_idle(self) -> bool {
        self.0 == IDLE_HISTORY
    }

    /// The newest [`CONFIRM_TICKS`] samples were all LOW.
    pub fn is_settled_low(self) -> bool {
        self.0 & CONFIRM_MASK == 0
    }
}

/// Whether the filter is waiting for the line to recover or is armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterState {
    /// Not armed; waiting for a full window of idle samples.
    #[default]
    Idle,
    /// Armed after a clean idle window; waiting for a settled LOW.
    Busy,
}

/// Debounce state machine fed one raw sample per tick.
#[derive(Debug, Clone, Default)]
pub struct EdgeFilter {
    history: SampleHistory,
    state: FilterState,
}

impl EdgeFilter {
    pub const fn new() -> Self {
        Self {
            history: SampleHistory::new(),
            state: FilterState::Idle,
        }
    }

    /// Feed one raw sample (`true` = HIGH/idle, `false` = LOW/active).
    ///
    /// Returns `true` exactly on the tick that confirms a press.
    pub fn sample(&mut self, high: bool) -> bool {
        self.history.push(high);

        if self.state == FilterState::Idle && self.history.is_idle() {
            self.state = FilterState::Busy;
        }

        if self.state == FilterState::Busy && self.history.is_settled_low() {
            self.state = FilterState::Idle;
            return true;
        }

        false
    }

    pub fn state(&self) -> FilterState {
        self.state
    }

    pub fn history(&self) -> SampleHistory {
        self.history
    }
}

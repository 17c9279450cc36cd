// poem/rotation.rs
//
// Fade state machine that cycles two-line windows of the active poem:
// FadeIn -> Display -> FadeOut -> (advance by two) -> FadeIn, forever.

use serde::{Deserialize, Serialize};

/// Lines shown at once.
pub const WINDOW: usize = 2;

/// Current phase of the poem overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadePhase {
    #[default]
    FadeIn,
    Display,
    FadeOut,
}

/// Phase durations in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FadeTimings {
    pub fade_ms: f64,
    pub display_ms: f64,
}

impl Default for FadeTimings {
    fn default() -> Self {
        Self {
            fade_ms: 500.0,
            display_ms: 3000.0,
        }
    }
}

/// Shared rotation state for the poem overlay.
#[derive(Debug, Clone)]
pub struct PoemRotation {
    timings: FadeTimings,
    index: usize,
    phase: FadePhase,
    progress: f32,
    phase_start_ms: f64,
}

impl PoemRotation {
    pub fn new(timings: FadeTimings, now_ms: f64) -> Self {
        Self {
            timings,
            index: 0,
            phase: FadePhase::FadeIn,
            progress: 0.0,
            phase_start_ms: now_ms,
        }
    }

    /// Restart from the first line pair, fading in.
    pub fn reset(&mut self, now_ms: f64) {
        self.index = 0;
        self.phase = FadePhase::FadeIn;
        self.progress = 0.0;
        self.phase_start_ms = now_ms;
    }

    fn duration(&self, phase: FadePhase) -> f64 {
        match phase {
            FadePhase::FadeIn | FadePhase::FadeOut => self.timings.fade_ms,
            FadePhase::Display => self.timings.display_ms,
        }
    }

    /// Advance the machine to `now_ms`. `line_count` is the length of the
    /// active poem; the index wraps against it when a fade-out completes.
    /// At most one phase transition happens per call.
    pub fn update(&mut self, now_ms: f64, line_count: usize) {
        let elapsed = (now_ms - self.phase_start_ms).max(0.0);
        let duration = self.duration(self.phase);
        self.progress = if duration > 0.0 {
            (elapsed / duration).clamp(0.0, 1.0) as f32
        } else {
            1.0
        };

        if self.progress < 1.0 {
            return;
        }

        self.phase = match self.phase {
            FadePhase::FadeIn => FadePhase::Display,
            FadePhase::Display => FadePhase::FadeOut,
            FadePhase::FadeOut => {
                self.index += WINDOW;
                if self.index >= line_count {
                    self.index = 0;
                }
                FadePhase::FadeIn
            }
        };
        self.progress = 0.0;
        self.phase_start_ms = now_ms;
    }

    /// Overlay opacity in [0, 1].
    pub fn opacity(&self) -> f32 {
        match self.phase {
            FadePhase::FadeIn => self.progress,
            FadePhase::Display => 1.0,
            FadePhase::FadeOut => 1.0 - self.progress,
        }
    }

    /// The line pair currently shown. An index left past the end by a
    /// shorter poem falls back to the first pair.
    pub fn visible_lines<'a, T>(&self, lines: &'a [T]) -> &'a [T] {
        let start = if self.index < lines.len() { self.index } else { 0 };
        let end = (start + WINDOW).min(lines.len());
        &lines[start..end]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }
}

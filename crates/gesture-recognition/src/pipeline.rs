//! Interactive sample capture.
//!
//! A [`CaptureSession`] owns a [`Normalizer`] and a [`DatasetWriter`]. Each
//! capture request runs detect → crop → center → re-detect on one frame and,
//! if that succeeds, appends a labeled sample. At most one capture is in
//! flight; a request that arrives while one is running is dropped.

use std::cell::{Cell, RefCell};

use gesture_core::{Frame, LandmarkDetector};
use gesture_dataset::{validate_label, DatasetError, DatasetWriter, Sample, SampleError};
use gesture_normalize::{NormalizeError, Normalizer};
use serde::Serialize;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Keyboard-style control input for [`CaptureSession::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlCommand {
    /// Capture the current frame.
    Capture,
    /// Stop the loop.
    Quit,
}

/// Result of one capture request.
#[derive(Clone, Debug, PartialEq)]
pub enum CaptureOutcome {
    /// A sample was appended to the dataset.
    Recorded(Sample),
    /// Another capture was in flight; the request was dropped.
    Busy,
    /// The frame did not yield a usable hand; nothing was written.
    Skipped(NormalizeError),
}

/// Counters for a capture session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CaptureStats {
    pub frames: usize,
    pub requests: usize,
    pub recorded: usize,
    pub busy: usize,
    pub no_hand: usize,
    pub failed: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GateState {
    Idle,
    Capturing,
}

/// Two-state reentrancy guard: `Idle` or `Capturing`.
#[derive(Debug)]
pub struct CaptureGate {
    state: Cell<GateState>,
}

impl Default for CaptureGate {
    fn default() -> Self {
        Self {
            state: Cell::new(GateState::Idle),
        }
    }
}

impl CaptureGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_capturing(&self) -> bool {
        self.state.get() == GateState::Capturing
    }

    /// Move to `Capturing` if idle. The gate returns to `Idle` when the
    /// ticket is dropped.
    pub fn try_enter(&self) -> Option<CaptureTicket<'_>> {
        match self.state.get() {
            GateState::Capturing => None,
            GateState::Idle => {
                self.state.set(GateState::Capturing);
                Some(CaptureTicket { gate: self })
            }
        }
    }
}

/// Proof that a capture is in flight.
#[must_use = "the gate reopens as soon as the ticket is dropped"]
#[derive(Debug)]
pub struct CaptureTicket<'a> {
    gate: &'a CaptureGate,
}

impl Drop for CaptureTicket<'_> {
    fn drop(&mut self) {
        self.gate.state.set(GateState::Idle);
    }
}

/// Errors that end a capture session. Per-frame normalization failures are
/// not errors; they surface as [`CaptureOutcome::Skipped`].
#[derive(thiserror::Error, Debug)]
pub enum CaptureError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Sample(#[from] SampleError),
}

/// Capture loop state: normalizer, dataset sink, current label and gate.
pub struct CaptureSession<D> {
    normalizer: RefCell<Normalizer<D>>,
    writer: RefCell<DatasetWriter>,
    label: String,
    gate: CaptureGate,
    stats: Cell<CaptureStats>,
}

impl<D: LandmarkDetector> CaptureSession<D> {
    pub fn new(
        normalizer: Normalizer<D>,
        writer: DatasetWriter,
        label: impl Into<String>,
    ) -> Result<Self, CaptureError> {
        let label = label.into();
        validate_label(&label)?;
        Ok(Self {
            normalizer: RefCell::new(normalizer),
            writer: RefCell::new(writer),
            label,
            gate: CaptureGate::new(),
            stats: Cell::new(CaptureStats::default()),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Label used for samples captured from now on.
    pub fn set_label(&mut self, label: impl Into<String>) -> Result<(), CaptureError> {
        let label = label.into();
        validate_label(&label)?;
        log::info!("capture label set to {label:?}");
        self.label = label;
        Ok(())
    }

    pub fn gate(&self) -> &CaptureGate {
        &self.gate
    }

    pub fn stats(&self) -> CaptureStats {
        self.stats.get()
    }

    /// Capture one frame.
    ///
    /// Returns [`CaptureOutcome::Busy`] without touching the detector if a
    /// capture is already running. Dataset write failures are returned as
    /// errors; everything else is an outcome.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip_all))]
    pub fn capture(&self, frame: &Frame) -> Result<CaptureOutcome, CaptureError> {
        self.bump(|s| s.requests += 1);
        let Some(_ticket) = self.gate.try_enter() else {
            log::debug!("capture already in progress, request dropped");
            self.bump(|s| s.busy += 1);
            return Ok(CaptureOutcome::Busy);
        };
        let Ok(mut normalizer) = self.normalizer.try_borrow_mut() else {
            self.bump(|s| s.busy += 1);
            return Ok(CaptureOutcome::Busy);
        };

        let hand = match normalizer.detect_and_normalize(frame) {
            Ok(hand) => hand,
            Err(err) => {
                log::debug!("frame dropped: {err}");
                self.bump(|s| {
                    if err.is_normalization_failure() {
                        s.failed += 1;
                    } else {
                        s.no_hand += 1;
                    }
                });
                return Ok(CaptureOutcome::Skipped(err));
            }
        };
        drop(normalizer);

        let Ok(mut writer) = self.writer.try_borrow_mut() else {
            self.bump(|s| s.busy += 1);
            return Ok(CaptureOutcome::Busy);
        };
        let sample = writer.append_landmarks(&hand.landmarks, &self.label)?;
        self.bump(|s| s.recorded += 1);
        log::info!(
            "recorded {:?} sample #{} ({}x{} px hand)",
            self.label,
            writer.rows_written(),
            hand.crop.width,
            hand.crop.height
        );
        Ok(CaptureOutcome::Recorded(sample))
    }

    /// Drive the capture loop over `frames`.
    ///
    /// After each frame arrives, `poll` is asked for a command. `Capture`
    /// captures that frame, `Quit` ends the loop. The loop also ends when
    /// `frames` is exhausted.
    pub fn run<I, P>(&self, frames: I, mut poll: P) -> Result<CaptureStats, CaptureError>
    where
        I: IntoIterator<Item = Frame>,
        P: FnMut(&Frame) -> Option<ControlCommand>,
    {
        for frame in frames {
            self.bump(|s| s.frames += 1);
            match poll(&frame) {
                Some(ControlCommand::Capture) => {
                    self.capture(&frame)?;
                }
                Some(ControlCommand::Quit) => {
                    log::info!("capture loop stopped");
                    break;
                }
                None => {}
            }
        }
        Ok(self.stats())
    }

    pub fn into_parts(self) -> (Normalizer<D>, DatasetWriter) {
        (self.normalizer.into_inner(), self.writer.into_inner())
    }

    fn bump(&self, f: impl FnOnce(&mut CaptureStats)) {
        let mut stats = self.stats.get();
        f(&mut stats);
        self.stats.set(stats);
    }
}

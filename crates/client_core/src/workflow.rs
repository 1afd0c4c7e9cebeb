//! Navigation capability shared by the submission and report sides.

/// The two user-facing views. Control moves Submission -> Report on a
/// successful submission and Report -> Submission when no usable result is
/// stored or the user starts over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Submission,
    Report,
}

/// Injected navigation capability. The core never drives a router directly;
/// the host decides what a view transition means.
pub trait Navigator: Send + Sync {
    fn go_to(&self, view: View);
}

//! Tracing macros that vanish when the `tracing` feature is off.
//!
//! With the feature enabled, `trace_span!` opens an info span and
//! `trace_event!` records an info event carrying key measurements such as
//! surface size or the located score.

/// Opens an info-level span around a stage such as `correlate` or `run_job`.
///
/// Expands to `tracing::info_span!` with the `tracing` feature and to a
/// `NoopSpan` guard without it.
#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

/// Records an info-level event with named measurements.
///
/// Without the `tracing` feature the values are still evaluated, then
/// dropped.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
}

pub(crate) use trace_event;
pub(crate) use trace_span;

/// Stand-in guard so `trace_span!(..).entered()` compiles without tracing.
///
/// Call sites write `let _span = trace_span!(..).entered();` under either
/// configuration.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Returns the guard unchanged, like `Span::entered`.
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}

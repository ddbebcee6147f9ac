//! Structured logging shims.
//!
//! With the `tracing` feature the macros forward to [`tracing`]. Without it
//! they expand to an empty block, so call sites stay unconditional, including in
//! expression position such as a match arm.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {{}};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use {debug, trace};

#[cfg(test)]
mod tests {
    use super::{debug, trace};

    #[test]
    fn shims_are_expressions() {
        let missing: Option<u32> = None;
        match missing {
            Some(_) => {}
            None => debug!(frame = "a", "missing frame"),
        }
        let () = trace!(x = 1.0, "move");
    }
}

//! Call-stack snapshots
//!
//! Capturing records raw frames only. Symbol names and source locations are
//! resolved the first time a snapshot is formatted and cached afterwards, so
//! creating an error never pays for symbolization.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use backtrace::{Backtrace, BacktraceFrame};

/// Maximum number of application frames kept per snapshot
pub const MAX_DEPTH: usize = 32;

/// Extra raw frames recorded for the unwinder, the constructors, and the
/// runtime, all of which are dropped on resolution
pub const FRAMEWORK_ALLOWANCE: usize = 16;

/// Symbol prefixes belonging to the runtime rather than application code
const RUNTIME_PREFIXES: &[&str] = &[
    "std::",
    "core::",
    "alloc::",
    "backtrace::",
    "test::",
    "__rust",
    "_Unwind",
    "rust_begin_unwind",
    "__libc_start",
    "_start",
    "start_thread",
];

/// Symbol prefixes of the error constructors themselves
const FRAMEWORK_PREFIXES: &[&str] = &["faultline_core::", "faultline_code::"];

/// Unresolved call-stack snapshot
#[derive(Clone)]
pub struct Stack {
    frames: Vec<BacktraceFrame>,
    resolved: OnceLock<Vec<StackFrame>>,
}

/// One resolved application frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    /// Demangled function name without the trailing hash
    pub function: String,
    /// Source file, when debug info is available
    pub file: Option<PathBuf>,
    /// Source line, when debug info is available
    pub line: Option<u32>,
}

impl Stack {
    /// Record the current call stack
    ///
    /// At most [`MAX_DEPTH`] application frames survive resolution. Runtime
    /// and framework frames are recorded too, within
    /// [`FRAMEWORK_ALLOWANCE`], and filtered out when the snapshot is
    /// resolved.
    #[inline(never)]
    pub fn capture() -> Self {
        let limit = MAX_DEPTH + FRAMEWORK_ALLOWANCE;
        let mut frames = Vec::with_capacity(limit);

        backtrace::trace(|frame| {
            frames.push(BacktraceFrame::from(frame.clone()));
            frames.len() < limit
        });

        Self {
            frames,
            resolved: OnceLock::new(),
        }
    }

    /// Number of raw frames recorded, including those dropped on resolution
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Resolved application frames, innermost call first
    pub fn frames(&self) -> &[StackFrame] {
        self.resolved.get_or_init(|| resolve(&self.frames))
    }
}

fn resolve(frames: &[BacktraceFrame]) -> Vec<StackFrame> {
    let mut trace = Backtrace::from(frames.to_vec());
    trace.resolve();

    trace
        .frames()
        .iter()
        .flat_map(BacktraceFrame::symbols)
        .filter_map(|symbol| {
            let function = format!("{:#}", symbol.name()?);

            is_application_frame(&function).then(|| StackFrame {
                function,
                file: symbol.filename().map(Path::to_path_buf),
                line: symbol.lineno(),
            })
        })
        .take(MAX_DEPTH)
        .collect()
}

/// Whether a demangled symbol belongs to the code that created the error
fn is_application_frame(function: &str) -> bool {
    let name = function.trim_start_matches('<');

    if RUNTIME_PREFIXES.iter().any(|prefix| name.starts_with(prefix)) {
        return false;
    }

    // Unit tests of the framework crates capture from inside the framework
    if cfg!(test) && name.contains("::tests::") {
        return true;
    }

    !FRAMEWORK_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

impl fmt::Debug for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack").field("depth", &self.depth()).finish_non_exhaustive()
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.function)?;

        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, " — {}:{line}", file.display()),
            (Some(file), None) => write!(f, " — {}", file.display()),
            _ => Ok(()),
        }
    }
}

/// One frame per line, indented for nesting under an error message
impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in self.frames() {
            write!(f, "\n      {frame}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline(never)]
    fn capture_here() -> Stack {
        Stack::capture()
    }

    #[inline(never)]
    fn recurse(depth: usize) -> Stack {
        let stack = if depth == 0 { Stack::capture() } else { recurse(depth - 1) };
        std::hint::black_box(stack)
    }

    #[test]
    fn capture_is_bounded() {
        let stack = recurse(MAX_DEPTH * 2);
        assert_eq!(stack.depth(), MAX_DEPTH + FRAMEWORK_ALLOWANCE);
        assert_eq!(stack.frames().len(), MAX_DEPTH);
    }

    #[test]
    fn framework_frames_do_not_use_the_budget() {
        let stack = recurse(MAX_DEPTH + 8);
        let frames = stack.frames();

        assert_eq!(frames.len(), MAX_DEPTH, "frames: {frames:?}");
        assert!(frames.iter().all(|f| f.function.contains("recurse")), "frames: {frames:?}");
    }

    #[test]
    fn resolution_keeps_the_caller() {
        let stack = capture_here();
        let frames = stack.frames();

        assert!(
            frames.iter().any(|f| f.function.contains("capture_here")),
            "frames: {frames:?}"
        );
    }

    #[test]
    fn resolution_drops_runtime_frames() {
        let stack = capture_here();

        for frame in stack.frames() {
            assert!(!frame.function.starts_with("std::"), "{}", frame.function);
            assert!(!frame.function.starts_with("backtrace::"), "{}", frame.function);
        }
    }

    #[test]
    fn resolution_is_memoized() {
        let stack = capture_here();
        let first = stack.frames().as_ptr();
        let second = stack.frames().as_ptr();
        assert_eq!(first, second);
    }

    #[test]
    fn framework_frames_are_omitted() {
        assert!(!is_application_frame("faultline_core::error::Error::new"));
        assert!(!is_application_frame("<faultline_core::error::Error as core::fmt::Display>::fmt"));
        assert!(!is_application_frame("faultline_code::wrap::wrap_database_error"));
        assert!(!is_application_frame("core::ops::function::FnOnce::call_once"));
        assert!(is_application_frame("faultline_core::stack::tests::capture_here"));
        assert!(is_application_frame("billing::invoices::load"));
    }

    #[test]
    fn frame_display() {
        let frame = StackFrame {
            function: "billing::invoices::load".to_owned(),
            file: Some(PathBuf::from("src/invoices.rs")),
            line: Some(42),
        };
        assert_eq!(frame.to_string(), "billing::invoices::load — src/invoices.rs:42");

        let bare = StackFrame {
            function: "billing::invoices::load".to_owned(),
            file: None,
            line: None,
        };
        assert_eq!(bare.to_string(), "billing::invoices::load");
    }
}

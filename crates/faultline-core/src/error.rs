use std::{error::Error as StdError, fmt};

use crate::{Code, chain, report::Report, stack::Stack};

/// Boxed error accepted as the cause of a chain node
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Borrowed view of a node's cause
pub type Cause<'a> = &'a (dyn StdError + Send + Sync + 'static);

/// A node in an error chain
///
/// Every node carries a message and optionally owns the error it was
/// created from, a code, and a stack snapshot taken where the node was
/// built. Nodes are immutable once constructed.
///
/// `Display` renders the message of the whole chain (`outer: inner: root`),
/// while the alternate form (`{:#}`) and `Debug` add one entry per node
/// with its code and stack.
pub struct Error {
    message: String,
    code: Code,
    cause: Option<BoxError>,
    stack: Option<Stack>,
}

impl Error {
    /// Root error with a stack snapshot
    #[inline(never)]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 0,
            cause: None,
            stack: Some(Stack::capture()),
        }
    }

    /// Root error carrying `code`, with a stack snapshot
    ///
    /// The code does not need to be registered; registration only matters
    /// when the code is resolved to a status or message.
    #[inline(never)]
    pub fn with_code(code: Code, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            cause: None,
            stack: Some(Stack::capture()),
        }
    }

    /// Wrap `cause` with context, taking a new stack snapshot here
    #[inline(never)]
    pub fn wrap(cause: impl Into<BoxError>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 0,
            cause: Some(cause.into()),
            stack: Some(Stack::capture()),
        }
    }

    /// Wrap `cause` with context without capturing a stack
    pub fn annotate(cause: impl Into<BoxError>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 0,
            cause: Some(cause.into()),
            stack: None,
        }
    }

    /// Wrap `cause` with a code and context, taking a new stack snapshot here
    #[inline(never)]
    pub fn wrap_with_code(cause: impl Into<BoxError>, code: Code, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            cause: Some(cause.into()),
            stack: Some(Stack::capture()),
        }
    }

    /// Message of the whole chain, each level separated by `": "`
    ///
    /// Rendered on every call.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Message of this node alone
    pub fn own_message(&self) -> &str {
        &self.message
    }

    /// Code carried by this node, ignoring the rest of the chain
    pub fn own_code(&self) -> Option<Code> {
        (self.code != 0).then_some(self.code)
    }

    /// Effective code of the chain: the outermost coded node's code, or 0
    pub fn code(&self) -> Code {
        chain::get_code(self)
    }

    /// Whether any node in the chain carries `code`
    pub fn is_code(&self, code: Code) -> bool {
        chain::is_code(self, code)
    }

    /// Stack snapshot taken when this node was built
    pub fn stack(&self) -> Option<&Stack> {
        self.stack.as_ref()
    }

    /// The error this node wraps
    pub fn cause(&self) -> Option<Cause<'_>> {
        self.cause.as_deref()
    }

    /// Iterate this node and every cause below it, outermost first
    pub fn chain(&self) -> chain::Chain<'_> {
        chain::Chain::new(self)
    }

    /// The innermost error of the chain
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        chain::root_cause(self)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return fmt::Display::fmt(&Report::new(self), f);
        }

        f.write_str(&self.message)?;

        if let Some(cause) = &self.cause {
            write!(f, ": {cause}")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Report::new(self), f)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_deref().map(|cause| cause as &(dyn StdError + 'static))
    }
}

/// Root error with a formatted message and a stack snapshot
///
/// ```
/// let id = 7;
/// let err = faultline_core::fault!("invoice {id} is locked");
/// assert_eq!(err.message(), "invoice 7 is locked");
/// ```
#[macro_export]
macro_rules! fault {
    ($($arg:tt)+) => {
        $crate::Error::new(::std::format!($($arg)+))
    };
}

/// Root error carrying a code, with a formatted message
///
/// ```
/// let err = faultline_core::coded!(100404, "user {} not found", 42);
/// assert_eq!(err.code(), 100404);
/// assert_eq!(err.message(), "user 42 not found");
/// ```
#[macro_export]
macro_rules! coded {
    ($code:expr, $($arg:tt)+) => {
        $crate::Error::with_code($code, ::std::format!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync + 'static>() {}

    #[test]
    fn errors_cross_threads() {
        assert_send_sync::<Error>();
    }

    #[test]
    fn plain_message_is_unchanged() {
        let err = Error::new("connection refused");
        assert_eq!(err.message(), "connection refused");
        assert_eq!(err.to_string(), "connection refused");
        assert!(err.cause().is_none());
        assert!(err.stack().is_some());
        assert_eq!(err.own_code(), None);
    }

    #[test]
    fn wrapped_message_joins_the_chain() {
        let root = Error::new("connection refused");
        let middle = Error::wrap(root, "load invoice");
        let outer = Error::annotate(middle, "render page");

        assert_eq!(outer.message(), "render page: load invoice: connection refused");
        assert_eq!(outer.own_message(), "render page");
    }

    #[test]
    fn wrap_captures_a_new_stack_and_annotate_does_not() {
        let wrapped = Error::wrap(std::io::Error::other("disk full"), "write report");
        let annotated = Error::annotate(std::io::Error::other("disk full"), "write report");

        assert!(wrapped.stack().is_some());
        assert!(annotated.stack().is_none());
        assert_eq!(annotated.message(), "write report: disk full");
    }

    #[test]
    fn foreign_causes_are_rendered() {
        let err = Error::wrap("socket closed", "publish event");
        assert_eq!(err.message(), "publish event: socket closed");
    }

    #[test]
    fn code_zero_means_no_code() {
        let err = Error::with_code(0, "nothing");
        assert_eq!(err.own_code(), None);
        assert_eq!(err.code(), 0);
    }

    #[test]
    fn coded_wrap_keeps_the_cause() {
        let err = Error::wrap_with_code(Error::new("timeout"), 100_101, "database query failed");

        assert_eq!(err.own_code(), Some(100_101));
        assert_eq!(err.message(), "database query failed: timeout");
        assert_eq!(err.cause().map(ToString::to_string).as_deref(), Some("timeout"));
    }

    #[test]
    fn macros_format_messages() {
        let table = "invoices";
        let err = fault!("table {table} missing");
        assert_eq!(err.message(), "table invoices missing");

        let err = coded!(42, "{} rows", 3);
        assert_eq!(err.code(), 42);
        assert_eq!(err.message(), "3 rows");
    }

    #[test]
    fn source_exposes_the_cause() {
        let err = Error::wrap(Error::with_code(7, "inner"), "outer");
        let source = err.source().unwrap();
        let inner = source.downcast_ref::<Error>().unwrap();
        assert_eq!(inner.own_code(), Some(7));
    }

    #[test]
    fn alternate_display_is_verbose() {
        let err = Error::wrap_with_code(Error::new("timeout"), 100_101, "database query failed");
        let verbose = format!("{err:#}");

        assert!(verbose.starts_with("database query failed: timeout"));
        assert!(verbose.contains("[100101] database query failed"));
        assert_eq!(format!("{err:?}"), verbose);
    }
}

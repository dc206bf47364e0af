use std::{error::Error as StdError, fmt};

use crate::{Error, chain::Chain};

/// Verbose rendering of an error chain
///
/// The first line is the error's message. Each node of the chain follows on
/// its own numbered line, prefixed with `[code]` when it carries one and
/// trailed by its stack snapshot:
///
/// ```text
/// database query failed: connection refused
///   0: [100101] database query failed
///       billing::invoices::load — src/invoices.rs:42
///   1: connection refused
/// ```
pub struct Report<'a> {
    head: &'a (dyn StdError + 'static),
}

impl<'a> Report<'a> {
    pub fn new(head: &'a (dyn StdError + 'static)) -> Self {
        Self { head }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head)?;

        for (depth, node) in Chain::new(self.head).enumerate() {
            write!(f, "\n  {depth}: ")?;

            let Some(node) = node.downcast_ref::<Error>() else {
                write!(f, "{node}")?;
                continue;
            };

            if let Some(code) = node.own_code() {
                write!(f, "[{code}] ")?;
            }
            f.write_str(node.own_message())?;

            if let Some(stack) = node.stack() {
                write!(f, "{stack}")?;
            }
        }

        Ok(())
    }
}

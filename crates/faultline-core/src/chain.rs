//! Walking error chains
//!
//! Every lookup starts at the outermost node (the most recent wrap) and
//! follows [`source`](std::error::Error::source) towards the root, stopping
//! at the first match. Any error type can be walked; nodes that are not
//! [`Error`] values simply carry no code and no stack.

use std::{error::Error as StdError, iter::FusedIterator};

use crate::{Code, Error, stack::Stack};

/// Iterator over an error and its causes, outermost first
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn StdError + 'static)>,
}

impl<'a> Chain<'a> {
    pub fn new(head: &'a (dyn StdError + 'static)) -> Self {
        Self { next: Some(head) }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn StdError + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

impl FusedIterator for Chain<'_> {}

/// Code carried by a single node
///
/// This is the one capability check used by every code lookup.
pub fn code_of(node: &(dyn StdError + 'static)) -> Option<Code> {
    node.downcast_ref::<Error>().and_then(Error::own_code)
}

/// Code of the outermost coded node, or 0 when no node carries one
pub fn get_code(err: &(dyn StdError + 'static)) -> Code {
    Chain::new(err).find_map(code_of).unwrap_or(0)
}

/// Whether any node in the chain carries exactly `code`
///
/// Always false for 0, which is never a code.
pub fn is_code(err: &(dyn StdError + 'static), code: Code) -> bool {
    code != 0 && Chain::new(err).filter_map(code_of).any(|found| found == code)
}

/// First node of type `T`
pub fn find<'a, T: StdError + 'static>(err: &'a (dyn StdError + 'static)) -> Option<&'a T> {
    Chain::new(err).find_map(|node| node.downcast_ref::<T>())
}

/// Whether some node of type `T` equals `target`
pub fn contains<T: StdError + PartialEq + 'static>(err: &(dyn StdError + 'static), target: &T) -> bool {
    Chain::new(err).any(|node| node.downcast_ref::<T>() == Some(target))
}

/// Innermost node of the chain
pub fn root_cause<'a>(err: &'a (dyn StdError + 'static)) -> &'a (dyn StdError + 'static) {
    Chain::new(err).last().unwrap_or(err)
}

/// Stack of the outermost node that captured one
pub fn stack_trace<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a Stack> {
    Chain::new(err).find_map(|node| node.downcast_ref::<Error>()?.stack())
}

use serde::Deserialize;

/// Replacement or addition for one entry of the code table
///
/// ```toml
/// [[codes]]
/// code = 100404
/// status = 404
/// message = "Resource not found"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodeOverride {
    pub code: u32,
    /// HTTP status returned for the code
    pub status: u16,
    /// Message sent to API consumers
    pub message: String,
}

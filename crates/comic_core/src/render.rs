use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::ResultCollection;

const INDENT: &[u8] = b"    ";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render the collection as a 4-space indented JSON array, in collection order.
pub fn render_index(collection: &ResultCollection) -> Result<Vec<u8>, RenderError> {
    let mut buffer = Vec::with_capacity(collection.len() * 512);
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    collection.comics().serialize(&mut serializer)?;
    Ok(buffer)
}

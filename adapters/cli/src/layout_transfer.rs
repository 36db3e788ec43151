use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use seatmap_core::{CanvasDimensions, LayoutSnapshot, ValueError};
use thiserror::Error;

const SNAPSHOT_DOMAIN: &str = "seatmap";
const SNAPSHOT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded snapshot payload.
pub(crate) const SNAPSHOT_HEADER: &str = "seatmap:v1";
/// Delimiter used to separate the prefix, canvas dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Encodes the snapshot into a single-line string suitable for sharing.
pub(crate) fn encode(snapshot: &LayoutSnapshot) -> Result<String, LayoutTransferError> {
    let json = serde_json::to_vec(snapshot).map_err(LayoutTransferError::InvalidPayload)?;
    let encoded = STANDARD_NO_PAD.encode(json);
    Ok(format!(
        "{SNAPSHOT_HEADER}:{}:{encoded}",
        snapshot.map.dimensions
    ))
}

/// Decodes a snapshot from the provided string representation.
///
/// The dimensions segment of the header are authoritative for the decoded map.
pub(crate) fn decode(value: &str) -> Result<LayoutSnapshot, LayoutTransferError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LayoutTransferError::EmptyPayload);
    }

    let mut parts = trimmed.splitn(4, FIELD_DELIMITER);
    let domain = parts.next().unwrap_or_default();
    let version = parts.next().ok_or(LayoutTransferError::MissingVersion)?;
    let dimensions = parts.next().ok_or(LayoutTransferError::MissingDimensions)?;
    let payload = parts.next().ok_or(LayoutTransferError::MissingPayload)?;

    if domain != SNAPSHOT_DOMAIN {
        return Err(LayoutTransferError::InvalidPrefix(domain.to_owned()));
    }
    if version != SNAPSHOT_VERSION {
        return Err(LayoutTransferError::UnsupportedVersion(version.to_owned()));
    }

    let dimensions = dimensions
        .parse::<CanvasDimensions>()
        .map_err(LayoutTransferError::InvalidDimensions)?;
    let bytes = STANDARD_NO_PAD
        .decode(payload.as_bytes())
        .map_err(LayoutTransferError::InvalidEncoding)?;
    let mut snapshot: LayoutSnapshot =
        serde_json::from_slice(&bytes).map_err(LayoutTransferError::InvalidPayload)?;
    snapshot.map.dimensions = dimensions;
    Ok(snapshot)
}

/// Errors that can occur while encoding or decoding layout transfer strings.
#[derive(Debug, Error)]
pub(crate) enum LayoutTransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("layout string was empty")]
    EmptyPayload,
    /// The encoded snapshot did not contain a version segment.
    #[error("layout string is missing the version")]
    MissingVersion,
    /// The encoded snapshot did not include canvas dimensions.
    #[error("layout string is missing the canvas dimensions")]
    MissingDimensions,
    /// The encoded snapshot did not include the payload segment.
    #[error("layout string is missing the payload")]
    MissingPayload,
    /// The encoded snapshot used an unexpected prefix segment.
    #[error("layout prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The encoded snapshot used an unsupported version identifier.
    #[error("layout version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The canvas dimensions could not be parsed.
    #[error("could not parse canvas dimensions: {0}")]
    InvalidDimensions(#[source] ValueError),
    /// The base64 payload could not be decoded.
    #[error("could not decode layout payload: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The payload could not be serialised or deserialised.
    #[error("could not parse layout payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
}

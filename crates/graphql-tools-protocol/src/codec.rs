use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// The version of the field layout shared with the control plane. Bumped on any incompatible
/// change to a message.
pub const PROTOCOL_VERSION: u32 = 1;

/// A message that can cross the process boundary.
pub trait Message: Serialize + DeserializeOwned {
    /// The name of the message kind, written in the envelope and checked on decode.
    const KIND: &'static str;
}

/// The input text could not be decoded into the requested message, or a message could not be
/// serialized.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("the input is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("the input is not a valid message envelope: {0}")]
    InvalidEnvelope(#[source] serde_json::Error),
    #[error("expected a {expected} message, got a {found} message")]
    UnexpectedKind { expected: &'static str, found: String },
    #[error("unsupported protocol version {found} for {kind}")]
    UnsupportedVersion { kind: &'static str, found: u32 },
    #[error("invalid {kind} message: {source}")]
    InvalidMessage {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not serialize {kind} message: {source}")]
    Serialize {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Serialize)]
struct EnvelopeRef<'a, M> {
    kind: &'static str,
    version: u32,
    message: &'a M,
}

#[derive(Deserialize)]
struct Envelope {
    kind: String,
    version: u32,
    message: serde_json::Value,
}

/// Serialize a message to its base64 text representation.
pub fn encode<M: Message>(message: &M) -> Result<String, FormatError> {
    let envelope = EnvelopeRef {
        kind: M::KIND,
        version: PROTOCOL_VERSION,
        message,
    };

    let bytes = serde_json::to_vec(&envelope).map_err(|source| FormatError::Serialize { kind: M::KIND, source })?;

    Ok(STANDARD.encode(bytes))
}

/// Decode a message of kind `M` from its base64 text representation.
///
/// Surrounding whitespace is ignored. Unknown fields are ignored, missing required fields are
/// an error.
pub fn decode<M: Message>(text: &str) -> Result<M, FormatError> {
    let bytes = STANDARD.decode(text.trim())?;
    let envelope: Envelope = serde_json::from_slice(&bytes).map_err(FormatError::InvalidEnvelope)?;

    if envelope.kind != M::KIND {
        return Err(FormatError::UnexpectedKind {
            expected: M::KIND,
            found: envelope.kind,
        });
    }

    if envelope.version != PROTOCOL_VERSION {
        return Err(FormatError::UnsupportedVersion {
            kind: M::KIND,
            found: envelope.version,
        });
    }

    serde_json::from_value(envelope.message).map_err(|source| FormatError::InvalidMessage { kind: M::KIND, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiffInput, StitchingInput};

    fn raw(json: &str) -> String {
        STANDARD.encode(json)
    }

    #[test]
    fn rejects_invalid_base64() {
        let error = decode::<DiffInput>("not base64!").unwrap_err();
        assert!(matches!(error, FormatError::InvalidBase64(_)), "{error}");
    }

    #[test]
    fn rejects_truncated_input() {
        let encoded = encode(&DiffInput {
            old_schema: "type Query { a: Int }".to_owned(),
            new_schema: "type Query { b: Int }".to_owned(),
            shared_directive_definitions: None,
            rules: Vec::new(),
        })
        .unwrap();

        // Cut on a 4-byte boundary so that the base64 itself stays valid.
        let truncated = &encoded[..(encoded.len() / 2) / 4 * 4];
        let error = decode::<DiffInput>(truncated).unwrap_err();

        assert!(matches!(error, FormatError::InvalidEnvelope(_)), "{error}");
    }

    #[test]
    fn rejects_other_message_kinds() {
        let encoded = encode(&StitchingInput { subschemas: Vec::new() }).unwrap();
        let error = decode::<DiffInput>(&encoded).unwrap_err();

        assert_eq!(error.to_string(), "expected a DiffInput message, got a StitchingInput message");
    }

    #[test]
    fn rejects_other_versions() {
        let text = raw(r#"{"kind":"StitchingInput","version":2,"message":{"subschemas":[]}}"#);
        let error = decode::<StitchingInput>(&text).unwrap_err();

        assert!(matches!(error, FormatError::UnsupportedVersion { found: 2, .. }), "{error}");
    }

    #[test]
    fn missing_required_fields_are_an_error() {
        let text = raw(r#"{"kind":"DiffInput","version":1,"message":{"oldSchema":"type Query { a: Int }"}}"#);
        let error = decode::<DiffInput>(&text).unwrap_err();

        assert!(error.to_string().contains("newSchema"), "{error}");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let text = raw(
            r#"{"kind":"DiffInput","version":1,"extra":true,"message":{"oldSchema":"","newSchema":"","futureField":[1,2]}}"#,
        );
        let input = decode::<DiffInput>(&text).unwrap();

        assert_eq!(input.old_schema, "");
        assert!(input.rules.is_empty());
        assert!(input.shared_directive_definitions.is_none());
    }

    #[test]
    fn trailing_newline_is_accepted() {
        let encoded = encode(&StitchingInput { subschemas: Vec::new() }).unwrap();
        let decoded = decode::<StitchingInput>(&format!("{encoded}\n")).unwrap();

        assert!(decoded.subschemas.is_empty());
    }
}

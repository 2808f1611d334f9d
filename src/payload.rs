//! Request bodies as seen by controllers.
//!
//! A controller declares up front whether it wants the raw body
//! ([`PayloadKind::Binary`]) or form-encoded key/value pairs
//! ([`PayloadKind::Form`]). The dispatcher reads the body accordingly.

use bytes::Bytes;

/// The body representation a controller expects.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PayloadKind {
    #[default]
    Binary,
    Form,
}

/// A request body handed to [`Controller::create`](crate::Controller::create)
/// and [`Controller::edit`](crate::Controller::edit).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Payload {
    Binary(Bytes),
    /// Query-string pairs first, then body pairs, in arrival order.
    Form(Vec<(String, String)>),
}

impl Payload {
    pub fn empty(kind: PayloadKind) -> Self {
        match kind {
            PayloadKind::Binary => Self::Binary(Bytes::new()),
            PayloadKind::Form => Self::Form(Vec::new()),
        }
    }

    /// Raw bytes of a binary payload. Form payloads have none.
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Binary(bytes) => bytes,
            Self::Form(_) => &[],
        }
    }

    /// First value of the form field `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        match self {
            Self::Binary(_) => None,
            Self::Form(pairs) => pairs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
        }
    }
}

/// Why a request body could not be turned into a [`Payload`].
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("failed to read request body: {0}")]
    Read(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("form data is not valid UTF-8")]
    NotUtf8,

    #[error("invalid percent escape at byte {0}")]
    BadEscape(usize),
}

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Builds the payload for a controller of the given kind.
///
/// Form payloads merge the query string with the body. The body only
/// contributes when the content type is absent or form-encoded.
pub(crate) fn read_payload<E>(
    kind: PayloadKind,
    content_type: Option<&str>,
    query: Option<&str>,
    body: Result<Bytes, E>,
) -> Result<Payload, PayloadError>
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let body = body.map_err(|e| PayloadError::Read(e.into()))?;

    match kind {
        PayloadKind::Binary => Ok(Payload::Binary(body)),
        PayloadKind::Form => {
            let mut pairs = Vec::new();
            if let Some(query) = query {
                pairs.extend(parse_form(query.as_bytes())?);
            }
            if is_form(content_type) {
                pairs.extend(parse_form(&body)?);
            }
            Ok(Payload::Form(pairs))
        }
    }
}

fn is_form(content_type: Option<&str>) -> bool {
    content_type.is_none_or(|ct| {
        ct.split(';')
            .next()
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
    })
}

fn parse_form(raw: &[u8]) -> Result<Vec<(String, String)>, PayloadError> {
    let text = std::str::from_utf8(raw).map_err(|_| PayloadError::NotUtf8)?;

    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(PayloadError::BadEscape(i));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    Ok(url::form_urlencoded::parse(bytes).into_owned().collect())
}

use std::fmt;

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_UNAUTHORIZED: u16 = 401;
pub const STATUS_CONFLICT: u16 = 409;
pub const STATUS_UNSUPPORTED_MEDIA_TYPE: u16 = 415;
pub const STATUS_TOO_MANY_REQUESTS: u16 = 429;
pub const STATUS_INTERNAL_SERVER_ERROR: u16 = 500;
pub const STATUS_SERVICE_UNAVAILABLE: u16 = 503;

/// A fixed set of HTTP statuses a contract case accepts.
///
/// The remote service does not pin down whether a validation failure surfaces
/// as a client or a server error, so cases compare against sets rather than
/// exact codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSet {
    codes: &'static [u16],
}

impl StatusSet {
    pub const fn new(codes: &'static [u16]) -> Self {
        Self { codes }
    }

    pub fn contains(&self, status: u16) -> bool {
        self.codes.contains(&status)
    }

    pub fn codes(&self) -> &'static [u16] {
        self.codes
    }
}

impl fmt::Display for StatusSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .codes
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{{joined}}}")
    }
}

pub const ACCEPTED: StatusSet = StatusSet::new(&[STATUS_OK]);
pub const UNAUTHORIZED: StatusSet = StatusSet::new(&[STATUS_UNAUTHORIZED]);
pub const HEALTHY: StatusSet = StatusSet::new(&[STATUS_OK]);
pub const VALIDATION_REJECTED: StatusSet =
    StatusSet::new(&[STATUS_BAD_REQUEST, STATUS_INTERNAL_SERVER_ERROR]);
pub const PROCESSED_OR_UNAUTHORIZED: StatusSet =
    StatusSet::new(&[STATUS_OK, STATUS_UNAUTHORIZED]);
pub const CONTENT_TYPE_HANDLED: StatusSet = StatusSet::new(&[
    STATUS_OK,
    STATUS_BAD_REQUEST,
    STATUS_UNAUTHORIZED,
    STATUS_UNSUPPORTED_MEDIA_TYPE,
]);
pub const CONCURRENT_RESOLVED: StatusSet = StatusSet::new(&[
    STATUS_OK,
    STATUS_UNAUTHORIZED,
    STATUS_TOO_MANY_REQUESTS,
    STATUS_INTERNAL_SERVER_ERROR,
]);
pub const DUPLICATE_HANDLED: StatusSet =
    StatusSet::new(&[STATUS_OK, STATUS_CONFLICT, STATUS_INTERNAL_SERVER_ERROR]);
pub const INJECTION_REJECTED: StatusSet = StatusSet::new(&[
    STATUS_BAD_REQUEST,
    STATUS_UNAUTHORIZED,
    STATUS_INTERNAL_SERVER_ERROR,
]);
pub const SPECIAL_CHARACTERS_HANDLED: StatusSet =
    StatusSet::new(&[STATUS_OK, STATUS_BAD_REQUEST, STATUS_UNAUTHORIZED]);

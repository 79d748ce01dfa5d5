use hwl_types::Hospital;

/// Success status reported back to the transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Ok,
    Created,
    NoContent,
}

/// What an operation hands back to the transport: a status and an optional
/// body. No body means "status only".
#[derive(Clone, Debug, PartialEq)]
pub struct Reply<R> {
    pub status: Status,
    pub body: Option<R>,
}

impl<R> Reply<R> {
    pub fn ok(body: R) -> Self {
        Self {
            status: Status::Ok,
            body: Some(body),
        }
    }

    pub fn created(body: R) -> Self {
        Self {
            status: Status::Created,
            body: Some(body),
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: Status::NoContent,
            body: None,
        }
    }

    /// The body, if the operation produced one.
    pub fn into_body(self) -> Option<R> {
        self.body
    }
}

/// Result of a mutation callback passed to [`Worklist::apply_update`].
///
/// `persist` set to `Some` asks the protocol to write that hospital back;
/// `None` skips the write.
///
/// [`Worklist::apply_update`]: crate::Worklist::apply_update
#[derive(Clone, Debug)]
pub struct Mutation<R> {
    pub persist: Option<Hospital>,
    pub response: Option<R>,
    pub status: Status,
}

impl<R> Mutation<R> {
    /// Read-only outcome: respond with `body`, write nothing.
    pub fn read(body: R) -> Self {
        Self {
            persist: None,
            response: Some(body),
            status: Status::Ok,
        }
    }

    /// Persist `hospital` and respond with `body`.
    pub fn write(hospital: Hospital, body: R) -> Self {
        Self {
            persist: Some(hospital),
            response: Some(body),
            status: Status::Ok,
        }
    }

    /// Persist `hospital` and respond with no body.
    pub fn write_no_content(hospital: Hospital) -> Self {
        Self {
            persist: Some(hospital),
            response: None,
            status: Status::NoContent,
        }
    }
}

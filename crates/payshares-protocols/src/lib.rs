//! Wire records for the Payshares federation and compliance protocols.
//!
//! The centerpiece is [`FlexValue`], a string field whose JSON encoding may
//! be a bare unsigned integer or a quoted string. Federation memos and
//! compliance routes both use it, so the rest of a program only ever sees a
//! `String`.
//!
//! # Modules
//!
//! - [`flex`] — the integer-or-string codec
//! - [`federation`] — `name`/`forward`/`id` response bodies
//! - [`compliance`] — auth request, response and attachment records

pub mod compliance;
pub mod error;
pub mod federation;
pub mod flex;

pub use compliance::{
    Attachment, AuthData, AuthRequest, AuthResponse, AuthStatus, Operation, Route, SenderInfo,
    Transaction,
};
pub use error::ProtocolError;
pub use federation::{IdResponse, Memo, NameResponse};
pub use flex::FlexValue;

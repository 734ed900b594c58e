//! Wire contracts shared between the document chat frontend and its backend.

pub mod domain;

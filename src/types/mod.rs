//! Types which do not belong to a more specific module.

pub mod err;

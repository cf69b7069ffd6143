//! Generic structures, suitable for usecases beyond the library.

pub mod bounded_queue;
pub mod index_heap;
pub mod luby;
pub mod minimal_pcg;

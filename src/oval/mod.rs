/// OVAL domain - the document model and the index/resolve/walk services
///
/// Pure logic only: nothing in here performs I/O.
pub mod domain;
pub mod services;

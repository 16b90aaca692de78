//! Vacant-classroom service: fetches the weekly course schedule of every
//! self-study room from the campus information system, resolves which rooms
//! are vacant at the current (or a user-chosen) time, and serves the result
//! through a filter/sort/preset query API.

pub mod db;
pub mod refresh;
pub mod server;
pub mod types;
pub mod upstream;
pub mod vacancy;

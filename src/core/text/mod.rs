//! Text helpers (ANSI skipping, width calculations, truncation and padding).
//!
//! These helpers are pure (string in/string out) so both the surface renderer and the modal
//! chrome can measure themed output without knowing which escape codes a theme emits.

pub mod ansi;
pub mod utils;
pub mod width;

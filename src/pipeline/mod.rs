//! Pipeline stages for timetable generation.
//!
//! Each submodule implements exactly one transformation step.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ parse ──▶ matcher ──▶ grid ──▶ render / html
//! (path/URL) (tables)   (records)  (Form B)    (6×6)    (PDF / HTML)
//! ```
//!
//! 1. [`input`]     — load each document, check extension, magic bytes and size
//! 2. [`extract`]   — find ruled tables on every page and flatten them into rows
//! 3. [`parse`]     — map row positions to typed records; [`normalize`] cleans
//!    day names and time ranges on the way
//! 4. [`matcher`]   — keep faculty entries whose code appears on Form B
//! 5. [`grid`]      — place entries into the fixed day × slot grid
//! 6. [`render`]    — draw the grid to PDF via pdfium; [`html`] is the
//!    native-library-free alternative

pub mod extract;
pub mod grid;
pub mod html;
pub mod input;
pub mod matcher;
pub mod normalize;
pub mod parse;
pub mod render;

//! Image annotation editor and grid compositor for safety flash reports.
//!
//! The crate compiles to WebAssembly for the browser editor and natively for
//! the `flash` command-line tool. Everything except [`render`] and the browser
//! [`engine::Engine`] is plain Rust with no DOM dependency: the host forwards
//! pointer, wheel, touch and key events to an [`engine::EditorSession`] and
//! carries out the [`engine::Action`]s it returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Per-slot editor session and the browser engine |
//! | [`transform`] | Image placement, cover-fit, zoom and pan |
//! | [`doc`] | Annotation types and the ordered annotation store |
//! | [`hit`] | Annotation bounds and topmost-hit lookup |
//! | [`input`] | Tools, buttons and the gesture state machine states |
//! | [`viewport`] | Client-to-canvas pointer mapping |
//! | [`broadcast`] | Toolbar snapshots and per-frame coalescing |
//! | [`text`] | Text metrics estimates and word wrap |
//! | [`overlay`] | Render geometry: safe zone, text blocks, backdrops |
//! | [`render`] | Canvas 2D drawing (feature `web`) |
//! | [`assets`] | Icon asset table and loader |
//! | [`state`] | Persisted per-slot state and lenient recovery |
//! | [`config`] | Host-supplied editor configuration |
//! | [`grid`] | Grid layout catalog |
//! | [`compose`] | Grid compositor and grid session |
//! | [`consts`] | Shared numeric constants |

pub mod assets;
pub mod broadcast;
pub mod compose;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod grid;
pub mod hit;
pub mod input;
pub mod overlay;
#[cfg(feature = "web")]
pub mod render;
pub mod state;
pub mod text;
pub mod transform;
pub mod viewport;

/// Route `log` records to the browser console.
///
/// Safe to call more than once; later calls are ignored.
#[cfg(feature = "web")]
pub fn init_logging(level: log::Level) {
    if let Err(e) = console_log::init_with_level(level) {
        log::debug!("console logger already installed: {e}");
    }
}

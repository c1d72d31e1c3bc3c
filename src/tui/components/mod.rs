//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `Navbar`: Title and compile button
//! - `StatusBar`: Echoes the status message
//! - `Preview`: Transient wrapper over the compiled payload and a decode cache
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `Editor`: LaTeX text buffer with cursor, scroll and highlighting
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as "props", not by reaching into the
//! App. Children never own copies of App state: the editor reports changes
//! upward and the compile action lives in one place.
//!
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! StatusBar::new(app.status_message.clone()).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs         (this file)
//! ├── navbar.rs      (Title + compile button)
//! ├── status_bar.rs  (Bottom status line)
//! ├── preview.rs     (Compiled PDF card / placeholder)
//! └── editor/        (Text buffer, cursor, highlighting)
//! ```

pub mod editor;
mod navbar;
pub mod preview;
mod status_bar;

pub use editor::{Editor, EditorEvent};
pub use navbar::Navbar;
pub use preview::{Preview, PreviewState};
pub use status_bar::StatusBar;

//! # Core Application Logic
//!
//! Texide's business logic. It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O in the reducer. │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │    TUI     │          │  compile   │
//!             │  Adapter   │          │  backend   │
//!             │ (ratatui)  │          │ (reqwest)  │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct: source text, compiled artifact, status
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`artifact`]: Decoding and inspecting the base64 PDF payload
//! - [`document`]: Loading/saving `.tex` files and exporting PDFs
//! - [`config`]: `~/.texide/config.toml` and its resolution

pub mod action;
pub mod artifact;
pub mod config;
pub mod document;
pub mod state;

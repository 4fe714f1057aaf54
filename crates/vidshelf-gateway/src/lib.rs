//! HTTP gateway for the vidshelf video catalog.
//!
//! Exposes the catalog over a small JSON API:
//!
//! | Method | Path | Purpose |
//! |---|---|---|
//! | GET | `/ping` | health check |
//! | GET | `/videos?q=` | list videos, optionally filtered by title |
//! | POST | `/videos` | create a video |
//! | PUT | `/videos/{id}` | partially update a video |
//! | DELETE | `/videos/{id}` | delete a video |

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;

//! Session domain module.
//!
//! This module contains the session, image and report models and the
//! in-memory store that owns them.
//!
//! # Module Structure
//!
//! - `model`: Session entity, dashboard summary and active view (`Session`, `SessionSummary`, `ActiveView`)
//! - `image`: Workshop image and its analysis state machine (`WorkshopImage`, `ImageStatus`)
//! - `report`: Synthesized report (`Report`)
//! - `store`: Id-keyed in-memory store (`SessionStore`)

mod image;
mod model;
mod report;
mod store;
mod store_test;

pub use image::{ImageStatus, WorkshopImage};
pub use model::{ActiveView, Session, SessionSummary};
pub use report::Report;
pub use store::SessionStore;

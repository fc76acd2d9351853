//! Domain layer: entities, repository contracts and in-process state.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`history`] - Bounded stack of recently shortened URLs
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click processing worker
//!
//! # Click Processing Flow
//!
//! 1. The redirect handler resolves the link and answers immediately
//! 2. A [`click_event::ClickEvent`] is pushed onto a bounded channel
//! 3. [`click_worker::run_click_worker`] persists it with retry
//! 4. [`repositories::StatsRepository::record_click`] updates the link counters

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod history;
pub mod repositories;

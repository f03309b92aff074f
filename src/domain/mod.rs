//! Domain layer containing business entities and ports.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures ([`entities::Link`], [`entities::SpecialCode`])
//! - [`repositories`] - Storage trait definitions
//! - [`notification_sink`] - Outbound notification port
//! - [`notify_event`] - Notification event model
//! - [`notify_worker`] - Asynchronous notification delivery
//!
//! # Notification Flow
//!
//! 1. The redirect handler resolves a code
//! 2. A [`notify_event::NotifyEvent`] is pushed onto a bounded channel (never blocking)
//! 3. [`notify_worker::run_notify_worker`] checks the opt-in directory
//! 4. Opted-in codes are delivered through a [`notification_sink::NotificationSink`]

pub mod entities;
pub mod notification_sink;
pub mod notify_event;
pub mod notify_worker;
pub mod repositories;

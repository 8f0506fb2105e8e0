//! Missive - a conversational message drafting skill.
//!
//! Missive owns the per-user, multi-turn state machine that turns a
//! first utterance plus follow-up answers into a fully-addressed,
//! user-confirmed email, SMS, or phone call, ready to hand to a
//! delivery channel. Speech recognition, intent arbitration, dialog
//! rendering, contact lookup, and actual transmission belong to the
//! hosting framework and are reached through ports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

//! Strategy Intake - Conversational Intake Engine
//!
//! This crate implements a scripted strategy-intake conversation with
//! best-effort AI augmentation and best-effort persistence sync.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

//! seg-marquee library crate.
//!
//! This module exposes the internal components for integration testing.

pub mod cli;
pub mod config;
pub mod display_loop;
pub mod framer;
pub mod input;
pub mod marquee;
pub mod normalize;
pub mod terminal;
pub mod title;
pub mod transliterate;

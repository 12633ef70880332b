//! # DzīvotViegli Telegram Bot
//!
//! A Telegram bot that triages a self-reported health complaint and points
//! the user at the right specialist, local hospital contacts, and map and
//! taxi links for Liepāja.

pub mod actions;
pub mod bot;
pub mod config;
pub mod dialogue;
pub mod flow;
pub mod localization;
pub mod resources;
pub mod specialist;

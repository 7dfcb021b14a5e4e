//! Client for the private "InnerTube" JSON API behind the YouTube Music
//! web application.
//!
//! The upstream API is undocumented and its response schema varies with
//! account state, locale and feature rollout. Responses are therefore kept
//! as untyped JSON trees and normalized with a tolerant path navigator
//! ([`nav`]) instead of being deserialized into rigid structs.
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[macro_use]
extern crate log;

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod nav;
pub mod pagination;
pub mod parse;
pub mod protocol;
pub mod secrets;
pub mod util;

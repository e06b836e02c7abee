//! # renderall-dispatch
//!
//! The response-rendering service. Build a [`Render`] once from
//! [`Options`](renderall_core::Options), then call [`Render::json`],
//! [`Render::jsonp`], [`Render::data`] or [`Render::html`] once per response,
//! or [`Render::render`] with a custom [`Engine`](renderall_renderer::Engine).

pub mod render;

pub use render::{http_error, Render};

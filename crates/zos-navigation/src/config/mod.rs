//! Navigator configuration
//!
//! Presentations and transition resolvers reach a navigator only through a
//! [`NavigatorConfig`], declared once with [`NavigatorConfigBuilder`].

mod builder;
#[allow(clippy::module_inception)]
mod config;

pub use builder::NavigatorConfigBuilder;
pub use config::{NavigatorConfig, PresentationFn};

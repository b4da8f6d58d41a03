//! # Form Rendering Helpers
//!
//! The frontend describes each form control as a [`Field`], threads it
//! through the [`filters`] its page templates apply, and renders the widget
//! HTML here. Keeping the helpers in the core gives every frontend page the
//! same widget markup and escaping rules.

pub mod fields;
pub mod filters;

pub use fields::{Choice, Field, Widget};

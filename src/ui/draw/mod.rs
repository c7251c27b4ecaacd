//! UI drawing module
//!
//! This module is organized into focused submodules:
//! - `components`: Reusable UI components (header, search bar, status line, footer)
//! - `modals`: Modal overlays (sample viewer, URL input)
//! - `panels`: Main panels (catalog list, conversion form)
//! - `styling`: Color schemes and style constants

mod components;
mod modals;
mod panels;
mod styling;

pub use components::{render_footer, render_header, render_search_bar, render_status_bar};
pub use modals::{render_sample_modal, render_url_input_modal};
pub use panels::{render_catalog_panel, render_convert_panel};

pub mod section;

pub use section::{
    ServiceRecord, add_section, find_section_bounds, remove_section, render_section, splice,
    update_section,
};

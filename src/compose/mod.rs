//! Element composition.
//!
//! Chart components let callers swap a nested element (a bar, a tooltip, an
//! axis line) while the parent still injects computed layout props. This
//! module models the element tree and the prop-merging rules.

mod clone_element;
mod element;

pub use clone_element::{ElementCloner, clone_element, merge_props};
pub use element::{CLASS_NAME, Callback, Element, PropValue, Props, props_shallow_eq};

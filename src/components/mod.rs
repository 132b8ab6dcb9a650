pub mod templates;

pub use templates::{TemplateData, TemplateSet, Value, TEMPLATE_NAMES};

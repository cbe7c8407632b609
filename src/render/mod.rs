pub mod escape;
pub mod html;
pub mod terminal;

pub use escape::{escape_html, escape_value};
pub use html::{ColumnStrategy, TableRenderer};

//! Tag-based textual dump format for the octree
//!
//! Preorder, tab-indented `<node>`/`<line>` elements; indentation depth
//! mirrors tree depth one-for-one. Note that the label escape table maps
//! `>` to `&lt;` and `<` to `&gt;` - reversed from conventional markup
//! escaping. The mapping is the defined contract of the format and the
//! parser inverts exactly that table.

pub mod parser;
pub mod serializer;

pub use parser::{parse_xml, XmlError};
pub use serializer::{serialize_xml, write_xml};

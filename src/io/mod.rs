// Input/Output: parsing and serialization

pub mod xml;

// Re-export main types and functions
pub use xml::{parse_xml, serialize_xml, write_xml, XmlError};

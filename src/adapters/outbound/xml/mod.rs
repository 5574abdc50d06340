pub mod oval_xml_parser;

pub use oval_xml_parser::OvalXmlParser;

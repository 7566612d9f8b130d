//! Parsers for the text designers type into layer names.
//!
//! - [`name`]: the `<tag>id[ns:key="value"]` grammar of ordinary layers
//! - [`config`]: `key="value"` entries of the configuration group
//!
//! ```
//! use strata::parser::parse_layer_name;
//!
//! let parsed = parse_layer_name("<a>cta[attr:href=\"/signup\"]").unwrap();
//! assert_eq!(parsed.tag, "a");
//! assert_eq!(parsed.id, "cta");
//! assert_eq!(parsed.attributes["attr:href"], "/signup");
//! ```

pub mod config;
pub mod name;

pub use config::{parse_entry, Configuration};
pub use name::{parse_layer_name, ParsedLayerName, DEFAULT_TAG};

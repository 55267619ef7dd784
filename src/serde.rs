//! Serde support, enabled with the `serde` feature.
//!
//! A [CompiledFormat] serializes as its canonical format string, so
//! configuration files can carry formats like `"u1s6f32r43"` and have them
//! compiled on load. [crate::Value] and the field types derive their impls.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::format::CompiledFormat;

impl Serialize for CompiledFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CompiledFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let format = String::deserialize(deserializer)?;
        CompiledFormat::compile(&format).map_err(de::Error::custom)
    }
}

//! Layering of `.extdep` configuration files.
//!
//! Files are merged as YAML values before deserialization, so a local
//! file can override a single field of a declared dependency:
//!
//! - mappings merge key by key
//! - sequences such as `strategies` are replaced whole
//! - `null` removes the inherited key (`zlib: null` drops a dependency)
//! - anything else in the overlay wins

use serde_yaml::{Mapping, Value};

/// Merge `overlay` onto `base`, returning the combined value.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            Value::Mapping(merge_mappings(base_map, overlay_map))
        }
        (_, overlay) => overlay.clone(),
    }
}

fn merge_mappings(base: &Mapping, overlay: &Mapping) -> Mapping {
    let mut merged = base.clone();
    for (key, value) in overlay {
        if value.is_null() {
            merged.remove(key);
            continue;
        }
        let combined = match base.get(key) {
            Some(inherited) => deep_merge(inherited, value),
            None => value.clone(),
        };
        merged.insert(key.clone(), combined);
    }
    merged
}

/// Merge config values in priority order; the last one wins.
pub fn merge_configs(configs: &[Value]) -> Value {
    configs
        .iter()
        .fold(Value::Mapping(Mapping::new()), |acc, config| {
            deep_merge(&acc, config)
        })
}

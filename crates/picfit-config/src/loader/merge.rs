//! Value-tree merge for layered config.

use serde_json::Value;

/// Merge `overlay` into `base`, overlay winning.
///
/// Objects merge per key, recursively; every other pairing replaces the
/// base value wholesale, so arrays and scalars never splice.
pub(super) fn merge_values(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(base_value) => merge_values(base_value, overlay_value),
                    None => {
                        base_map.insert(key.clone(), overlay_value.clone());
                    }
                }
            }
        }
        (base_slot, overlay_value) => *base_slot = overlay_value.clone(),
    }
}

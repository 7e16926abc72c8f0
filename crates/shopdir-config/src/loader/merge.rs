//! JSON merge helper for layered configuration.

use serde_json::Value;

/// Merge `overlay` into `base`: objects merge key by key, anything else
/// (scalars and arrays) is replaced wholesale.
pub(super) fn merge_json_values(base: &mut Value, overlay: &Value) {
    let (Value::Object(base_map), Value::Object(overlay_map)) = (&mut *base, overlay) else {
        *base = overlay.clone();
        return;
    };
    for (key, value) in overlay_map {
        match base_map.get_mut(key) {
            Some(existing) => merge_json_values(existing, value),
            None => {
                base_map.insert(key.clone(), value.clone());
            }
        }
    }
}

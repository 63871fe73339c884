use uuid::Uuid;

/// Generates a prefixed, URL-safe identifier such as `cmp_3f2a…`.
pub fn prefixed_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

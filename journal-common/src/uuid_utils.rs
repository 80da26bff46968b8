//! UUID utilities

use uuid::Uuid;

/// Generate a new UUIDv4
pub fn generate() -> Uuid {
    Uuid::new_v4()
}

/// Short form of an id for log lines (first 8 hex digits)
pub fn short(id: &Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(generate(), generate());
    }

    #[test]
    fn test_short_is_prefix_of_simple_form() {
        let id = generate();
        let s = short(&id);
        assert_eq!(s.len(), 8);
        assert!(id.simple().to_string().starts_with(&s));
    }
}

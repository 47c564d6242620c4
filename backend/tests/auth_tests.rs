//! Tests for role parsing and account validation rules

use shared::models::Role;
use shared::validation::{validate_email, validate_password};

mod role_parsing {
    use super::*;

    #[test]
    fn known_roles_round_trip() {
        assert_eq!(Role::parse("admin"), Role::Admin);
        assert_eq!(Role::parse("staff"), Role::Staff);
        assert_eq!(Role::parse(Role::Admin.as_str()), Role::Admin);
    }

    #[test]
    fn unknown_role_never_grants_admin() {
        // A malformed row must degrade to the least privileged role
        assert_eq!(Role::parse("superuser"), Role::Staff);
        assert_eq!(Role::parse(""), Role::Staff);
        assert_eq!(Role::parse("ADMIN"), Role::Staff);
    }

    #[test]
    fn only_admin_passes_the_admin_check() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Staff.is_admin());
    }
}

mod account_validation {
    use super::*;

    #[test]
    fn email_needs_at_sign_and_domain() {
        assert!(validate_email("kasir@mangiyan.id").is_ok());
        assert!(validate_email("kasir").is_err());
        assert!(validate_email("a@b").is_err());
    }

    #[test]
    fn password_minimum_length_is_eight() {
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("1234567").is_err());
    }
}

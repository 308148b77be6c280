//! Domain-level constants.

// =============================================================================
// Gender
// =============================================================================

/// Value and label of the male gender option
pub const GENDER_MALE: &str = "Male";

/// Value and label of the female gender option
pub const GENDER_FEMALE: &str = "Female";

/// All gender values, in display order
pub const GENDERS: &[&str] = &[GENDER_MALE, GENDER_FEMALE];

// =============================================================================
// Persistence
// =============================================================================

/// Table name of the user entity (non-pluralized)
pub const USER_TABLE: &str = "user";

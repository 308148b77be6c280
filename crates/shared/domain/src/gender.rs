//! Gender selection options.

use serde::{Deserialize, Serialize};

use crate::constants::GENDERS;

/// One entry of a gender dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderOption {
    pub value: String,
    pub label: String,
    pub is_selected: bool,
}

/// Build the gender options, marking the one equal to `selected` (exact match).
pub fn gender_options(selected: Option<&str>) -> Vec<GenderOption> {
    GENDERS
        .iter()
        .map(|gender| GenderOption {
            value: gender.to_string(),
            label: gender.to_string(),
            is_selected: selected == Some(*gender),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{GENDER_FEMALE, GENDER_MALE};

    fn selection(options: &[GenderOption]) -> Vec<(&str, bool)> {
        options
            .iter()
            .map(|o| (o.value.as_str(), o.is_selected))
            .collect()
    }

    #[test]
    fn test_female_selected() {
        let options = gender_options(Some("Female"));
        assert_eq!(
            selection(&options),
            vec![(GENDER_MALE, false), (GENDER_FEMALE, true)]
        );
    }

    #[test]
    fn test_nothing_selected() {
        let options = gender_options(None);
        assert_eq!(options.len(), 2);
        assert!(options.iter().all(|o| !o.is_selected));
        assert!(options.iter().all(|o| o.value == o.label));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let options = gender_options(Some("male"));
        assert!(options.iter().all(|o| !o.is_selected));
    }

    #[test]
    fn test_serializes_field_names() {
        let json = serde_json::to_value(&gender_options(Some("Male"))[0]).unwrap();
        assert_eq!(json["value"], "Male");
        assert_eq!(json["label"], "Male");
        assert_eq!(json["is_selected"], true);
    }
}

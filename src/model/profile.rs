use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of characteristic slots a fresh form starts with
pub const INITIAL_CHARACTERISTICS: usize = 2;
/// Maximum number of characteristic slots
pub const MAX_CHARACTERISTICS: usize = 5;
/// Per-characteristic character limit
pub const CHARACTERISTIC_CHAR_LIMIT: usize = 50;

pub const MIN_BUDGET: u32 = 5;
/// Upper end of the slider; the prompt reads it as "£250+"
pub const MAX_BUDGET: u32 = 250;
pub const BUDGET_STEP: u32 = 5;

pub const MIN_BIRTH_YEAR: i32 = 1900;

/// Recipient gender category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    PreferNotToSay,
}

impl Gender {
    pub const ALL: [Gender; 4] = [
        Gender::Male,
        Gender::Female,
        Gender::Other,
        Gender::PreferNotToSay,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
            Gender::PreferNotToSay => "Prefer not to say",
        }
    }

    /// Next option in selector order (wraps)
    pub fn next(self) -> Gender {
        let idx = Self::ALL.iter().position(|g| *g == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous option in selector order (wraps)
    pub fn prev(self) -> Gender {
        let idx = Self::ALL.iter().position(|g| *g == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Parse a CLI-style value (case-insensitive, spaces/underscores allowed)
    pub fn parse(s: &str) -> Option<Gender> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "male" | "m" => Some(Gender::Male),
            "female" | "f" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            "prefer-not-to-say" | "unspecified" | "none" => Some(Gender::PreferNotToSay),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which slider thumb is being moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Thumb {
    Min,
    Max,
}

/// Budget range in whole pounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: u32,
    pub max: u32,
}

impl Default for BudgetRange {
    fn default() -> Self {
        BudgetRange {
            min: MIN_BUDGET,
            max: MAX_BUDGET,
        }
    }
}

fn round_to_step(value: u32) -> u32 {
    ((value + BUDGET_STEP / 2) / BUDGET_STEP) * BUDGET_STEP
}

impl BudgetRange {
    /// Apply a requested (min, max) pair from the slider, keeping both
    /// values in bounds, step-aligned, and at least one step apart where
    /// possible. The thumb being moved gives way to the other one.
    pub fn adjust(self, new_min: u32, new_max: u32, active: Thumb) -> BudgetRange {
        let mut min = new_min.clamp(MIN_BUDGET, MAX_BUDGET - BUDGET_STEP);
        let mut max = new_max.clamp(MIN_BUDGET + BUDGET_STEP, MAX_BUDGET);

        min = round_to_step(min);
        max = round_to_step(max);

        if min + BUDGET_STEP > max {
            match active {
                Thumb::Min => min = max.saturating_sub(BUDGET_STEP),
                Thumb::Max => max = min + BUDGET_STEP,
            }
        }

        min = min.max(MIN_BUDGET);
        max = max.min(MAX_BUDGET);
        if min > max {
            match active {
                Thumb::Min => min = max,
                Thumb::Max => max = min,
            }
        }

        BudgetRange { min, max }
    }

    /// Move one thumb by a signed number of steps
    pub fn step(self, thumb: Thumb, steps: i32) -> BudgetRange {
        let delta = steps * BUDGET_STEP as i32;
        match thumb {
            Thumb::Min => {
                let min = (self.min as i32 + delta).max(0) as u32;
                self.adjust(min, self.max, thumb)
            }
            Thumb::Max => {
                let max = (self.max as i32 + delta).max(0) as u32;
                self.adjust(self.min, max, thumb)
            }
        }
    }

    /// Human wording used in the prompt and the form label
    pub fn describe(self) -> String {
        if self.min == self.max {
            if self.max >= MAX_BUDGET {
                format!("£{}+", MAX_BUDGET)
            } else {
                format!("around £{}", self.min)
            }
        } else if self.max >= MAX_BUDGET {
            format!("from £{} to £{}+", self.min, MAX_BUDGET)
        } else {
            format!("from £{} to £{}", self.min, self.max)
        }
    }
}

/// A form field that can carry a validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Characteristic(usize),
    BirthYear,
    Location,
    Budget,
}

/// Per-field validation messages, in form order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(|s| s.as_str())
    }

    pub fn remove(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (_, message)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw form contents, as typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    pub characteristics: Vec<String>,
    pub gender: Gender,
    pub birth_year: String,
    pub location: String,
    pub budget: BudgetRange,
    pub occasion: String,
}

impl Default for ProfileDraft {
    fn default() -> Self {
        ProfileDraft {
            characteristics: vec![String::new(); INITIAL_CHARACTERISTICS],
            gender: Gender::default(),
            birth_year: String::new(),
            location: String::new(),
            budget: BudgetRange::default(),
            occasion: String::new(),
        }
    }
}

impl ProfileDraft {
    /// Replace a characteristic. Values over the character limit are rejected.
    pub fn set_characteristic(&mut self, index: usize, value: impl Into<String>) -> bool {
        let value = value.into();
        if value.chars().count() > CHARACTERISTIC_CHAR_LIMIT {
            return false;
        }
        match self.characteristics.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn add_characteristic(&mut self) -> bool {
        if self.characteristics.len() >= MAX_CHARACTERISTICS {
            return false;
        }
        self.characteristics.push(String::new());
        true
    }

    /// Only slots added beyond the initial ones can be removed
    pub fn remove_characteristic(&mut self, index: usize) -> bool {
        if index < INITIAL_CHARACTERISTICS || index >= self.characteristics.len() {
            return false;
        }
        self.characteristics.remove(index);
        true
    }

    /// Check every field and produce a validated profile
    pub fn validate(&self, current_year: i32) -> Result<RecipientProfile, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self
            .characteristics
            .first()
            .is_none_or(|c| c.trim().is_empty())
        {
            errors.insert(
                Field::Characteristic(0),
                "Please provide at least one detail about them.",
            );
        }
        for (i, c) in self.characteristics.iter().enumerate() {
            if c.chars().count() > CHARACTERISTIC_CHAR_LIMIT {
                errors.insert(
                    Field::Characteristic(i),
                    format!(
                        "Detail #{} exceeds {} characters.",
                        i + 1,
                        CHARACTERISTIC_CHAR_LIMIT
                    ),
                );
            }
        }

        let birth_year = self.birth_year.trim();
        let mut year = None;
        if !birth_year.is_empty() {
            match birth_year.parse::<i32>() {
                Ok(y) if (MIN_BIRTH_YEAR..=current_year).contains(&y) => year = Some(y),
                _ => errors.insert(
                    Field::BirthYear,
                    format!(
                        "Please enter a valid year ({}-{}).",
                        MIN_BIRTH_YEAR, current_year
                    ),
                ),
            }
        }

        if self.location.trim().is_empty() {
            errors.insert(Field::Location, "Please enter their location.");
        }

        let budget = self.budget;
        if budget.min < MIN_BUDGET || budget.max > MAX_BUDGET {
            errors.insert(
                Field::Budget,
                format!("Budget must be between £{} and £{}.", MIN_BUDGET, MAX_BUDGET),
            );
        } else if budget.min > budget.max {
            errors.insert(
                Field::Budget,
                "Minimum budget cannot be greater than maximum budget.",
            );
        } else if budget.min % BUDGET_STEP != 0 || budget.max % BUDGET_STEP != 0 {
            errors.insert(
                Field::Budget,
                format!("Budget must be in steps of £{}.", BUDGET_STEP),
            );
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let occasion = self.occasion.trim();
        Ok(RecipientProfile {
            characteristics: self
                .characteristics
                .iter()
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
            gender: self.gender,
            birth_year: year,
            location: self.location.trim().to_string(),
            budget,
            occasion: (!occasion.is_empty()).then(|| occasion.to_string()),
        })
    }
}

/// A validated recipient description, ready to be sent to the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientProfile {
    pub characteristics: Vec<String>,
    pub gender: Gender,
    pub birth_year: Option<i32>,
    pub location: String,
    pub budget: BudgetRange,
    pub occasion: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn valid_draft() -> ProfileDraft {
        let mut draft = ProfileDraft::default();
        draft.set_characteristic(0, "Loves gardening");
        draft.location = "Leeds".into();
        draft
    }

    #[test]
    fn default_draft_shape() {
        let draft = ProfileDraft::default();
        assert_eq!(draft.characteristics.len(), INITIAL_CHARACTERISTICS);
        assert_eq!(draft.gender, Gender::PreferNotToSay);
        assert_eq!(draft.budget, BudgetRange { min: 5, max: 250 });
    }

    #[test]
    fn valid_draft_produces_trimmed_profile() {
        let mut draft = valid_draft();
        draft.set_characteristic(1, "   ");
        draft.add_characteristic();
        draft.set_characteristic(2, "  Big sci-fi fan ");
        draft.birth_year = "1990".into();
        draft.occasion = "  ".into();

        let profile = draft.validate(2025).unwrap();
        assert_eq!(
            profile.characteristics,
            vec!["Loves gardening".to_string(), "Big sci-fi fan".to_string()]
        );
        assert_eq!(profile.birth_year, Some(1990));
        assert_eq!(profile.location, "Leeds");
        assert_eq!(profile.occasion, None);
    }

    #[test]
    fn empty_first_characteristic_fails() {
        let mut draft = valid_draft();
        draft.set_characteristic(0, "  ");
        draft.set_characteristic(1, "Second is not enough");
        let errors = draft.validate(2025).unwrap_err();
        assert_eq!(
            errors.get(Field::Characteristic(0)),
            Some("Please provide at least one detail about them.")
        );
    }

    #[test]
    fn birth_year_rules() {
        for bad in ["abc", "1899", "2026", "19.5"] {
            let mut draft = valid_draft();
            draft.birth_year = bad.into();
            let errors = draft.validate(2025).unwrap_err();
            assert_eq!(
                errors.get(Field::BirthYear),
                Some("Please enter a valid year (1900-2025)."),
                "year {bad:?}"
            );
        }
        let mut draft = valid_draft();
        draft.birth_year = "1900".into();
        assert_eq!(draft.validate(2025).unwrap().birth_year, Some(1900));
        draft.birth_year = "2025".into();
        assert_eq!(draft.validate(2025).unwrap().birth_year, Some(2025));
    }

    #[test]
    fn empty_location_fails() {
        let mut draft = valid_draft();
        draft.location = " ".into();
        let errors = draft.validate(2025).unwrap_err();
        assert_eq!(errors.get(Field::Location), Some("Please enter their location."));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn inverted_budget_fails() {
        let mut draft = valid_draft();
        draft.budget = BudgetRange { min: 100, max: 50 };
        let errors = draft.validate(2025).unwrap_err();
        assert_eq!(
            errors.get(Field::Budget),
            Some("Minimum budget cannot be greater than maximum budget.")
        );
    }

    #[test]
    fn out_of_bounds_budget_message_wins() {
        let mut draft = valid_draft();
        draft.budget = BudgetRange { min: 300, max: 260 };
        let errors = draft.validate(2025).unwrap_err();
        assert_eq!(
            errors.get(Field::Budget),
            Some("Budget must be between £5 and £250.")
        );
    }

    #[test]
    fn unaligned_budget_fails() {
        let mut draft = valid_draft();
        draft.budget = BudgetRange { min: 7, max: 50 };
        let errors = draft.validate(2025).unwrap_err();
        assert_eq!(errors.get(Field::Budget), Some("Budget must be in steps of £5."));
    }

    #[test]
    fn multiple_errors_are_collected_in_form_order() {
        let draft = ProfileDraft::default();
        let errors = draft.validate(2025).unwrap_err();
        let fields: Vec<Field> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec![Field::Characteristic(0), Field::Location]);
        assert_eq!(
            errors.to_string(),
            "Please provide at least one detail about them.\nPlease enter their location."
        );
    }

    #[test]
    fn characteristic_limit_is_enforced_on_input() {
        let mut draft = ProfileDraft::default();
        let long = "x".repeat(CHARACTERISTIC_CHAR_LIMIT + 1);
        assert!(!draft.set_characteristic(0, long));
        assert!(draft.set_characteristic(0, "x".repeat(CHARACTERISTIC_CHAR_LIMIT)));
        // Multi-byte characters count once
        assert!(draft.set_characteristic(1, "é".repeat(CHARACTERISTIC_CHAR_LIMIT)));
    }

    #[test]
    fn overlong_characteristic_fails_validation() {
        let mut draft = valid_draft();
        draft.characteristics[1] = "y".repeat(CHARACTERISTIC_CHAR_LIMIT + 1);
        let errors = draft.validate(2025).unwrap_err();
        assert_eq!(
            errors.get(Field::Characteristic(1)),
            Some("Detail #2 exceeds 50 characters.")
        );
    }

    #[test]
    fn add_and_remove_characteristics() {
        let mut draft = ProfileDraft::default();
        assert!(!draft.remove_characteristic(1));
        while draft.add_characteristic() {}
        assert_eq!(draft.characteristics.len(), MAX_CHARACTERISTICS);
        draft.set_characteristic(3, "keep me");
        assert!(draft.remove_characteristic(2));
        assert_eq!(draft.characteristics.len(), MAX_CHARACTERISTICS - 1);
        assert_eq!(draft.characteristics[2], "keep me");
        assert!(!draft.remove_characteristic(10));
    }

    #[test]
    fn adjust_rounds_and_clamps() {
        let b = BudgetRange::default();
        assert_eq!(b.adjust(12, 248, Thumb::Min), BudgetRange { min: 10, max: 250 });
        assert_eq!(b.adjust(0, 999, Thumb::Max), BudgetRange { min: 5, max: 250 });
        assert_eq!(b.adjust(13, 100, Thumb::Min), BudgetRange { min: 15, max: 100 });
    }

    #[test]
    fn adjust_keeps_thumbs_a_step_apart() {
        let b = BudgetRange { min: 50, max: 60 };
        // Moving min onto max pins min one step below
        assert_eq!(b.adjust(60, 60, Thumb::Min), BudgetRange { min: 55, max: 60 });
        // Moving max onto min pushes max one step above
        assert_eq!(b.adjust(50, 50, Thumb::Max), BudgetRange { min: 50, max: 55 });
        // At the top the max thumb cannot go past the bound
        let top = BudgetRange { min: 245, max: 250 };
        assert_eq!(top.adjust(250, 250, Thumb::Min), BudgetRange { min: 245, max: 250 });
    }

    #[test]
    fn adjust_result_is_always_valid() {
        let mut b = BudgetRange::default();
        for (i, (lo, hi)) in [(0, 0), (300, 2), (125, 125), (7, 9), (249, 251)]
            .into_iter()
            .enumerate()
        {
            let thumb = if i % 2 == 0 { Thumb::Min } else { Thumb::Max };
            b = b.adjust(lo, hi, thumb);
            assert!(MIN_BUDGET <= b.min && b.min <= b.max && b.max <= MAX_BUDGET, "{b:?}");
            assert_eq!(b.min % BUDGET_STEP, 0);
            assert_eq!(b.max % BUDGET_STEP, 0);
        }
    }

    #[test]
    fn step_moves_one_thumb() {
        let b = BudgetRange { min: 20, max: 100 };
        assert_eq!(b.step(Thumb::Min, 1), BudgetRange { min: 25, max: 100 });
        assert_eq!(b.step(Thumb::Max, -2), BudgetRange { min: 20, max: 90 });
        let floor = BudgetRange { min: 5, max: 100 };
        assert_eq!(floor.step(Thumb::Min, -1), floor);
    }

    #[test]
    fn describe_budget() {
        assert_eq!(BudgetRange { min: 5, max: 250 }.describe(), "from £5 to £250+");
        assert_eq!(BudgetRange { min: 20, max: 60 }.describe(), "from £20 to £60");
        assert_eq!(BudgetRange { min: 40, max: 40 }.describe(), "around £40");
        assert_eq!(BudgetRange { min: 250, max: 250 }.describe(), "£250+");
    }

    #[test]
    fn gender_cycle_and_parse() {
        assert_eq!(Gender::Male.next(), Gender::Female);
        assert_eq!(Gender::PreferNotToSay.next(), Gender::Male);
        assert_eq!(Gender::Male.prev(), Gender::PreferNotToSay);
        assert_eq!(Gender::parse("Prefer not to say"), Some(Gender::PreferNotToSay));
        assert_eq!(Gender::parse("FEMALE"), Some(Gender::Female));
        assert_eq!(Gender::parse("robot"), None);
        assert_eq!(Gender::Other.to_string(), "Other");
    }
}

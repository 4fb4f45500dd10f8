use crate::model::{MAX_BUDGET, RecipientProfile};

const NOT_SPECIFIED: &str = "Not specified";

/// "34 years old (born 1990)", or "Not specified" without a birth year
pub fn age_details(birth_year: Option<i32>, current_year: i32) -> String {
    match birth_year {
        Some(year) => format!("{} years old (born {})", current_year - year, year),
        None => NOT_SPECIFIED.to_string(),
    }
}

fn characteristics_list(characteristics: &[String]) -> String {
    let lines: Vec<String> = characteristics
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(|c| format!("- {}", c))
        .collect();
    if lines.is_empty() {
        format!("- {}", NOT_SPECIFIED)
    } else {
        lines.join("\n")
    }
}

/// Build the natural-language request sent to the model
pub fn build_prompt(profile: &RecipientProfile, current_year: i32) -> String {
    let occasion = profile.occasion.as_deref().unwrap_or(NOT_SPECIFIED);
    let example_occasion = profile.occasion.as_deref().unwrap_or("next adventure");

    format!(
        r#"You are Esme, a friendly and insightful gift recommendation expert.
Your task is to suggest 5 personalized gifts based on the information provided.
Use Google Search to find relevant, trendy, and location-specific ideas.
The budget is specified in GBP. If the upper budget is £{max}+, it means £{max} or more.

Information about the recipient:
- Key characteristics/interests:
{characteristics}
- Gender: {gender}
- Age/Year of Birth: {age}
- Location: {location}
- Budget (GBP): {budget}
- Occasion: {occasion}

Respond with a JSON array where each object represents a gift and has the following structure:
{{
  "name": "Name of the gift",
  "reason": "Why this gift is suitable, linking back to the provided characteristics, location, occasion and current trends. Be concise and thoughtful.",
  "price": "Estimated price range in GBP, e.g., ~£25, £50-£75, Free, Varies, Low Cost. This should respect the provided budget."
}}

Example of a JSON object in the array (assuming a characteristic like 'loves hiking' was provided and budget £50-£100):
{{
  "name": "A high-quality, lightweight daypack for hiking",
  "reason": "Perfect for someone who loves hiking, as mentioned. This supports their hobby and encourages outdoor adventures near {location}. Great for their {example_occasion}.",
  "price": "~£60-£100"
}}

Ensure your reasoning is concise and directly relates to the recipient's profile.
Focus on thoughtful and unique ideas. If budget is low, suggest thoughtful, low-cost, or experience-based gifts.
If specific interests or hobbies are mentioned in the characteristics, try to relate a suggestion to them. If an occasion is mentioned, tailor the gift to it.
Provide a price estimate for each gift in GBP, respecting the user's budget range.
Output up to 5 gift suggestions in the JSON array.
"#,
        max = MAX_BUDGET,
        characteristics = characteristics_list(&profile.characteristics),
        gender = profile.gender.label(),
        age = age_details(profile.birth_year, current_year),
        location = profile.location,
        budget = profile.budget.describe(),
        occasion = occasion,
        example_occasion = example_occasion,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BudgetRange, Gender};

    fn profile() -> RecipientProfile {
        RecipientProfile {
            characteristics: vec!["Loves hiking".into(), "Big sci-fi fan".into()],
            gender: Gender::Female,
            birth_year: Some(1990),
            location: "Edinburgh".into(),
            budget: BudgetRange { min: 20, max: 60 },
            occasion: Some("Birthday".into()),
        }
    }

    #[test]
    fn prompt_includes_profile_details() {
        let prompt = build_prompt(&profile(), 2025);
        assert!(prompt.contains("- Loves hiking\n- Big sci-fi fan"));
        assert!(prompt.contains("- Gender: Female"));
        assert!(prompt.contains("- Age/Year of Birth: 35 years old (born 1990)"));
        assert!(prompt.contains("- Location: Edinburgh"));
        assert!(prompt.contains("- Budget (GBP): from £20 to £60"));
        assert!(prompt.contains("- Occasion: Birthday"));
        assert!(prompt.contains("Great for their Birthday."));
        assert!(prompt.contains("If the upper budget is £250+, it means £250 or more."));
        assert!(prompt.contains("\"name\": \"Name of the gift\""));
    }

    #[test]
    fn prompt_fills_in_unspecified_fields() {
        let mut p = profile();
        p.birth_year = None;
        p.occasion = None;
        p.characteristics.clear();
        p.budget = BudgetRange { min: 5, max: 250 };
        let prompt = build_prompt(&p, 2025);
        assert!(prompt.contains("- Key characteristics/interests:\n- Not specified\n"));
        assert!(prompt.contains("- Age/Year of Birth: Not specified"));
        assert!(prompt.contains("- Occasion: Not specified"));
        assert!(prompt.contains("Great for their next adventure."));
        assert!(prompt.contains("- Budget (GBP): from £5 to £250+"));
    }
}

//! Small text normalization helpers shared across domains.

/// Title-cases a city name for storage and comparison: trims, lowercases,
/// then uppercases the first letter of each whitespace-separated word.
/// `"  new   delhi "` becomes `"New Delhi"`.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

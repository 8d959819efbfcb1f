//! Deterministic keyword rules mapping merchant descriptions to categories.
//!
//! Covers the obvious cases without any model. Table order matters: the
//! first category with a matching keyword wins, so e.g. "spotify" resolves
//! to Entertainment even though Subscriptions also lists it.

/// Category assigned when nothing matches.
pub const MISCELLANEOUS: &str = "Miscellaneous";

/// Candidate labels handed to the zero-shot classifier fallback.
pub const CANDIDATE_LABELS: [&str; 9] = [
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Subscriptions",
    "Healthcare",
    "ATM/Cash",
    "Transfer",
    "Groceries",
];

/// Ordered rule table: (category, keyword substrings matched against the
/// lowercased description).
const RULES: &[(&str, &[&str])] = &[
    (
        "Food & Dining",
        &[
            "mcdonald", "tim horton", "burger king", "kfc", "subway", "pizza",
            "starbucks", "coffee", "restaurant", "cafe", "diner", "wendy",
            "taco bell", "popeyes", "a&w", "dairy queen", "harveys",
            "resto", "bistro", "grill", "kitchen", "bar & grill",
            "arby", "yogurt", "poke",
        ],
    ),
    (
        "Transportation",
        &[
            "uber", "lyft", "taxi", "gas", "petro", "shell", "esso", "parking",
            "transit", "go train", "ttc", "presto", "via rail",
        ],
    ),
    (
        "Shopping",
        &[
            "amazon", "walmart", "target", "costco", "canadian tire", "home depot",
            "loblaws", "shoppers", "best buy", "future shop",
        ],
    ),
    (
        "Entertainment",
        &["netflix", "spotify", "movie", "cinema", "theatre", "concert"],
    ),
    (
        "Subscriptions",
        &[
            "spotify", "netflix", "apple music", "subscription", "monthly fee",
            "gym membership", "planet fitness",
        ],
    ),
    (
        "Transfer",
        &["trsf", "transfer", "e-transfer", "interac", "payment to"],
    ),
    ("ATM/Cash", &["atm", "cash withdrawal", "bank machine"]),
    (
        "Healthcare",
        &[
            "pharmacy", "shoppers drug", "medical", "doctor", "hospital",
            "dental", "clinic", "health",
        ],
    ),
    (
        "Groceries",
        &[
            "loblaws", "metro", "sobeys", "food basics", "no frills",
            "supermarket", "grocery", "fresh",
        ],
    ),
];

/// First rule-table category whose keyword appears in the description, if
/// any. Matching is case-insensitive substring.
pub fn rule_category(description: &str) -> Option<&'static str> {
    let desc = description.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| desc.contains(k)))
        .map(|(category, _)| *category)
}

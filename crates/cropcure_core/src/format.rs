//! Turns raw class identifiers into display names.

/// Compound phrases left behind by the dataset's folder naming.
const REDUNDANT_PHRASES: [(&str, &str); 3] = [
    ("Tomato Tomato", "Tomato"),
    ("Potato Potato", "Potato"),
    ("Pepper bell", "Bell Pepper"),
];

/// Format a raw identifier such as `Potato___Late_blight` as
/// `Potato - Late Blight`.
pub fn format_class_name(raw: &str) -> String {
    let mut name = raw
        .replace("___", " - ")
        .replace("__", " - ")
        .replace('_', " ");
    for (phrase, replacement) in REDUNDANT_PHRASES {
        name = name.replace(phrase, replacement);
    }
    title_case(name.trim())
}

/// Uppercase the first cased letter of every run of cased letters and
/// lowercase the rest. Uncased scripts pass through untouched.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_cased = false;
    for c in text.chars() {
        let cased = c.is_uppercase() || c.is_lowercase();
        if cased {
            if previous_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
        } else {
            out.push(c);
        }
        previous_cased = cased;
    }
    out
}

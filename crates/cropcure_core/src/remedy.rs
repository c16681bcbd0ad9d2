//! Keyword lookups for cure tips and status icons.
//!
//! Both tables are scanned in declared order and the first keyword found as a
//! substring of the lowercased identifier wins. Order matters: the spider
//! mite class contains "spotted" and therefore resolves to the `spot` tip
//! before `mite` is reached.

use crate::catalog::Localized;
use crate::language::Language;

/// Tip used when no keyword matches.
pub const HEALTHY_TIP: Localized = Localized {
    en: "✅ Keep monitoring. No action needed.",
    ta: "✅ தொடர்ந்து கண்காணிக்கவும். எச்சரிக்கை தேவையில்லை.",
    hi: "✅ निगरानी रखें। कोई कार्य आवश्यक नहीं।",
};

pub const TIPS: [(&str, Localized); 7] = [
    ("healthy", HEALTHY_TIP),
    (
        "blight",
        Localized {
            en: "🧪 Apply fungicide. Avoid overhead watering.",
            ta: "🧪 பூஞ்சைக் கொல்லி தெளிக்கவும். மேல் நீர்பாய்வு தவிர்க்கவும்.",
            hi: "🧪 फफूंदनाशक छिड़कें। ऊपर से सिंचाई न करें।",
        },
    ),
    (
        "virus",
        Localized {
            en: "🛑 Remove infected plants. Use resistant varieties.",
            ta: "🛑 பாதிக்கப்பட்டவை அகற்றவும். எதிர்ப்பு வகைகள் பயன்படுத்தவும்.",
            hi: "🛑 संक्रमित पौधों को हटाएं। प्रतिरोधी किस्में लगाएं।",
        },
    ),
    (
        "bacterial",
        Localized {
            en: "🧼 Remove debris. Use copper sprays.",
            ta: "🧼 பசைகள் அகற்றவும். காப்பர் ஸ்ப்ரே பயன்படுத்தவும்.",
            hi: "🧼 मलबा हटाएं। कॉपर स्प्रे का उपयोग करें।",
        },
    ),
    (
        "spot",
        Localized {
            en: "🌿 Improve airflow. Use organic spray.",
            ta: "🌿 காற்றோட்டம் மேம்படுத்தவும். இயற்கை ஸ்ப்ரே பயன்படுத்தவும்.",
            hi: "🌿 वायु प्रवाह सुधारें। जैविक स्प्रे का उपयोग करें।",
        },
    ),
    (
        "mold",
        Localized {
            en: "💧 Reduce humidity. Space plants well.",
            ta: "💧 ஈரப்பதம் குறைக்கவும். இடைவெளி வைக்கவும்.",
            hi: "💧 नमी कम करें। पौधों के बीच दूरी रखें।",
        },
    ),
    (
        "mite",
        Localized {
            en: "🪲 Use miticides. Remove webbing.",
            ta: "🪲 மைடிசைடு தெளிக்கவும். வலை அகற்றவும்.",
            hi: "🪲 माइटिसाइड का उपयोग करें। जाल हटाएं।",
        },
    ),
];

pub const DEFAULT_ICON: &str = "🌿";

pub const ICONS: [(&str, &str); 5] = [
    ("healthy", "🟢"),
    ("blight", "🍂"),
    ("virus", "🧬"),
    ("bacterial", "🦠"),
    ("mite", "🪳"),
];

fn first_match<T: Copy>(identifier: &str, table: &[(&str, T)]) -> Option<T> {
    let lowered = identifier.to_lowercase();
    table
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|&(_, value)| value)
}

/// Cure tip for a class identifier.
pub fn resolve_tip(identifier: &str, lang: Language) -> &'static str {
    first_match(identifier, &TIPS)
        .unwrap_or(HEALTHY_TIP)
        .get(lang)
}

/// Status icon for a class identifier.
pub fn resolve_icon(identifier: &str) -> &'static str {
    first_match(identifier, &ICONS).unwrap_or(DEFAULT_ICON)
}

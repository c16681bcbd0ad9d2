//! The fixed class taxonomy.
//!
//! One record per class, ordered exactly as the classifier emits its scores.
//! The record position is the model output index, so reordering entries
//! mislabels every prediction. [`Catalog::validate`] guards the invariants at
//! startup.

use crate::error::ConfigurationError;
use crate::format::format_class_name;
use crate::language::{LANGUAGES, Language};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashSet;

/// Number of classes the classifier was trained on.
pub const NUM_CLASSES: usize = 15;

/// Shown when a class has no description.
pub const DESCRIPTION_FALLBACK: &str = "Info not available.";

/// Text in every supported language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Localized {
    pub en: &'static str,
    pub ta: &'static str,
    pub hi: &'static str,
}

impl Localized {
    pub const fn get(&self, lang: Language) -> &'static str {
        match lang {
            Language::English => self.en,
            Language::Tamil => self.ta,
            Language::Hindi => self.hi,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassEntry {
    /// Position in the classifier output.
    pub index: usize,
    /// Canonical identifier, e.g. `Potato___Late_blight`.
    pub identifier: &'static str,
    /// Translated class names. The English slot is the identifier itself.
    pub names: Localized,
    pub descriptions: Localized,
}

impl ClassEntry {
    pub fn formatted_name(&self) -> String {
        format_class_name(self.identifier)
    }
}

const fn entry(
    index: usize,
    identifier: &'static str,
    ta_name: &'static str,
    hi_name: &'static str,
    descriptions: [&'static str; 3],
) -> ClassEntry {
    ClassEntry {
        index,
        identifier,
        names: Localized {
            en: identifier,
            ta: ta_name,
            hi: hi_name,
        },
        descriptions: Localized {
            en: descriptions[0],
            ta: descriptions[1],
            hi: descriptions[2],
        },
    }
}

static ENTRIES: [ClassEntry; NUM_CLASSES] = [
    entry(
        0,
        "Pepper__bell___Bacterial_spot",
        "மிளகாய் பாக்டீரியா புள்ளி",
        "मिर्च बैक्टीरियल स्पॉट",
        [
            "Causes leaf and fruit lesions.",
            "இலை மற்றும் பழங்களில் புள்ளிகள் ஏற்படுகின்றன.",
            "पत्तियों और फलों पर धब्बे होते हैं।",
        ],
    ),
    entry(
        1,
        "Pepper__bell___healthy",
        "மிளகாய் ஆரோக்கியம்",
        "मिर्च स्वस्थ",
        [
            "This is a healthy leaf.",
            "இது ஒரு ஆரோக்கியமான இலை.",
            "यह एक स्वस्थ पत्ता है।",
        ],
    ),
    entry(
        2,
        "Potato___Early_blight",
        "உருளைக்கிழங்கு ஆரம்ப ப்ளைட்",
        "आलू प्रारंभिक झुलसा",
        [
            "Fungal disease with concentric rings.",
            "மையக் கோடுகள் கொண்ட பூஞ்சை நோய்.",
            "केंद्रित छल्लों वाला फंगल रोग।",
        ],
    ),
    entry(
        3,
        "Potato___healthy",
        "உருளைக்கிழங்கு ஆரோக்கியம்",
        "आलू स्वस्थ",
        [
            "This potato leaf is healthy.",
            "இது ஆரோக்கியமான உருளைக்கிழங்கு இலை.",
            "यह आलू का पत्ता स्वस्थ है।",
        ],
    ),
    entry(
        4,
        "Potato___Late_blight",
        "உருளைக்கிழங்கு தாமத ப்ளைட்",
        "आलू देर से झुलसा",
        [
            "Severe leaf rot, fast spreading.",
            "தீவிர இலை அழுகல், விரைவில் பரவும்.",
            "गंभीर पत्ती सड़न, तेजी से फैलता है।",
        ],
    ),
    entry(
        5,
        "Tomato_Target_Spot",
        "தக்காளி இலக்கு புள்ளி",
        "टमाटर लक्ष्य धब्बा",
        [
            "Necrotic rings on leaves.",
            "இலைகளில் வறண்ட வட்டங்கள்.",
            "पत्तियों पर मृत ऊतक वाले वलय।",
        ],
    ),
    entry(
        6,
        "Tomato_Tomato_mosaic_virus",
        "தக்காளி மோசைக் வைரஸ்",
        "टमाटर मोज़ेक वायरस",
        [
            "Causes leaf discoloration and stunting.",
            "இலை வண்ணமாற்றம் மற்றும் வளர்ச்சி தடுப்பு.",
            "पत्तियों का रंग बदलना और वृद्धि रुकना।",
        ],
    ),
    entry(
        7,
        "Tomato_Tomato_YellowLeaf_Curl_Virus",
        "தக்காளி மஞ்சள் இலை சுருள் வைரஸ்",
        "टमाटर पीली पत्ती कर्ल वायरस",
        [
            "Yellowing and curling of leaves.",
            "இலைகள் மஞ்சள்படுதல் மற்றும் சுருக்கம்.",
            "पत्तियों का पीला होना और मुड़ना।",
        ],
    ),
    entry(
        8,
        "Tomato_Bacterial_spot",
        "தக்காளி பாக்டீரியா புள்ளி",
        "टमाटर बैक्टीरियल स्पॉट",
        [
            "Dark water-soaked lesions on leaves.",
            "இலைகளில் இருண்ட நீர் புள்ளிகள்.",
            "पत्तियों पर गहरे पानी जैसे धब्बे।",
        ],
    ),
    entry(
        9,
        "Tomato_Early_blight",
        "தக்காளி ஆரம்ப ப்ளைட்",
        "टमाटर प्रारंभिक झुलसा",
        [
            "Dark spots with concentric rings.",
            "மைய கோடுகளுடன் இருண்ட புள்ளிகள்.",
            "केंद्रित वलयों के साथ गहरे धब्बे।",
        ],
    ),
    entry(
        10,
        "Tomato_healthy",
        "தக்காளி ஆரோக்கியம்",
        "टमाटर स्वस्थ",
        [
            "This tomato leaf is healthy.",
            "இது ஆரோக்கியமான தக்காளி இலை.",
            "यह टमाटर का पत्ता स्वस्थ है।",
        ],
    ),
    entry(
        11,
        "Tomato_Late_blight",
        "தக்காளி தாமத ப்ளைட்",
        "टमाटर देर से झुलसा",
        [
            "Rapid leaf rot in humid areas.",
            "ஈரப்பதமான இடங்களில் விரைவாக இலை அழுகல்.",
            "नमी में तेज पत्ती सड़न।",
        ],
    ),
    entry(
        12,
        "Tomato_Leaf_Mold",
        "தக்காளி இலை பூஞ்சை",
        "टमाटर पत्तियों पर फफूंदी",
        [
            "Yellow spots with fuzzy mold.",
            "மஞ்சள் புள்ளிகளுடன் பூஞ்சை.",
            "पीले धब्बों के साथ फफूंदी।",
        ],
    ),
    entry(
        13,
        "Tomato_Septoria_leaf_spot",
        "தக்காளி செப்டோரியா இலை புள்ளி",
        "टमाटर सेप्टोरिया पत्ती धब्बा",
        [
            "Gray centers with brown borders.",
            "சாம்பல் நடு மற்றும் பழுப்பு விளிம்பு.",
            "भूरे किनारे वाले ग्रे केंद्र।",
        ],
    ),
    entry(
        14,
        "Tomato_Spider_mites_Two_spotted_spider_mite",
        "தக்காளி இரண்டு புள்ளி இலை ஊசிகள்",
        "टमाटर स्पाइडर माइट्स",
        [
            "Webbing and speckled leaves.",
            "வலை மற்றும் புள்ளியுள்ள இலைகள்.",
            "जाले और धब्बेदार पत्ते।",
        ],
    ),
];

static BUILTIN: Lazy<Catalog> = Lazy::new(|| Catalog::from_entries(ENTRIES.to_vec()));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<ClassEntry>,
}

impl Catalog {
    /// The compiled-in taxonomy. Not validated; see [`Catalog::load_validated`].
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// The compiled-in taxonomy after passing [`Catalog::validate`].
    pub fn load_validated() -> Result<&'static Catalog, ConfigurationError> {
        let catalog = Self::builtin();
        catalog.validate()?;
        tracing::debug!("class catalog validated: {} classes", catalog.len());
        Ok(catalog)
    }

    pub fn from_entries(entries: Vec<ClassEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ClassEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ClassEntry> {
        self.entries.get(index)
    }

    /// Exact identifier match.
    pub fn find(&self, identifier: &str) -> Option<&ClassEntry> {
        self.entries.iter().find(|e| e.identifier == identifier)
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.identifier)
    }

    /// Check cardinality, ordering, uniqueness and completeness of every
    /// localized text.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.entries.len() != NUM_CLASSES {
            return Err(ConfigurationError::CatalogSize {
                expected: NUM_CLASSES,
                found: self.entries.len(),
            });
        }
        let mut seen = HashSet::with_capacity(self.entries.len());
        for (position, entry) in self.entries.iter().enumerate() {
            if entry.index != position {
                return Err(ConfigurationError::MisplacedEntry {
                    position,
                    index: entry.index,
                });
            }
            if !seen.insert(entry.identifier) {
                return Err(ConfigurationError::DuplicateIdentifier(
                    entry.identifier.to_string(),
                ));
            }
            for lang in LANGUAGES {
                for (field, text) in [
                    ("name", entry.names.get(lang)),
                    ("description", entry.descriptions.get(lang)),
                ] {
                    if text.trim().is_empty() {
                        return Err(ConfigurationError::MissingText {
                            identifier: entry.identifier.to_string(),
                            language: lang.code(),
                            field,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Compare an externally supplied label list (one per model output) with
    /// the catalog order.
    pub fn check_labels<S: AsRef<str>>(&self, labels: &[S]) -> Result<(), ConfigurationError> {
        if labels.len() != self.entries.len() {
            return Err(ConfigurationError::LabelCount {
                expected: self.entries.len(),
                found: labels.len(),
            });
        }
        for (index, (label, entry)) in labels.iter().zip(&self.entries).enumerate() {
            if label.as_ref() != entry.identifier {
                return Err(ConfigurationError::LabelMismatch {
                    index,
                    expected: entry.identifier.to_string(),
                    found: label.as_ref().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Description of a class, or [`DESCRIPTION_FALLBACK`] for identifiers
    /// outside the catalog.
    pub fn describe(&self, identifier: &str, lang: Language) -> &'static str {
        self.find(identifier)
            .map(|e| e.descriptions.get(lang))
            .unwrap_or(DESCRIPTION_FALLBACK)
    }
}

//! Localized class names.

use crate::catalog::Catalog;
use crate::error::ConfigurationError;
use crate::format::format_class_name;
use crate::language::Language;

/// Translate a canonical identifier.
///
/// The default language returns the identifier unchanged, even when it is not
/// in the catalog; callers format it separately. Other languages require an
/// exact catalog match.
pub fn translate_class<'a>(
    catalog: &Catalog,
    identifier: &'a str,
    lang: Language,
) -> Result<&'a str, ConfigurationError> {
    if lang.is_default() {
        return Ok(identifier);
    }
    let entry = catalog
        .find(identifier)
        .ok_or_else(|| ConfigurationError::UnknownIdentifier(identifier.to_string()))?;
    Ok(entry.names.get(lang))
}

/// Translate by selector label, e.g. `"தமிழ்"`.
pub fn translate_class_by_label<'a>(
    catalog: &Catalog,
    identifier: &'a str,
    label: &str,
) -> Result<&'a str, ConfigurationError> {
    let lang = Language::from_label(label)?;
    translate_class(catalog, identifier, lang)
}

/// Translated and formatted name as shown to the user.
pub fn display_name(
    catalog: &Catalog,
    identifier: &str,
    lang: Language,
) -> Result<String, ConfigurationError> {
    translate_class(catalog, identifier, lang).map(format_class_name)
}

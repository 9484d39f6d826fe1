use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Presentation settings handed to renderers.
///
/// Aggregation never formats; it only produces the numbers these options are applied to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FormatOptions {
    pub grouping_separator: char,
    pub decimal_separator: char,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::for_locale("en")
    }
}

impl FormatOptions {
    /// Separators for a locale tag. Only the language part is looked at; unknown
    /// languages get the English separators.
    pub fn for_locale(locale: &str) -> Self {
        let lang = locale
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let (grouping_separator, decimal_separator) = match lang.as_str() {
            "de" | "es" | "it" | "nl" | "pt" | "da" | "id" | "tr" => ('.', ','),
            "fr" | "ru" | "pl" | "cs" | "sv" | "fi" | "nb" | "uk" => ('\u{a0}', ','),
            _ => (',', '.'),
        };
        Self {
            grouping_separator,
            decimal_separator,
        }
    }
}

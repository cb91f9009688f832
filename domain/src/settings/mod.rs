//! UI settings and translation lookup
//!
//! An explicit, passed-down configuration value; there is no ambient
//! singleton. The presentation layer threads [`UiSettings`] into every
//! renderer; [`translate`] is a pure lookup with English fallback.

use serde::{Deserialize, Serialize};

/// Display language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "hi" | "hindi" => Ok(Language::Hi),
            other => Err(format!("Unknown language: {}", other)),
        }
    }
}

/// Console color theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

/// Settings threaded through the presentation layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub language: Language,
    pub theme: Theme,
}

/// (key, English, Hindi)
const STRINGS: &[(&str, &str, &str)] = &[
    ("case_type", "Case type", "मामले का प्रकार"),
    ("summary", "Summary", "सारांश"),
    ("urgency", "Urgency", "तात्कालिकता"),
    ("timeframe", "Estimated timeframe", "अनुमानित समय-सीमा"),
    ("prerequisites", "Prerequisites", "पूर्व-आवश्यकताएँ"),
    ("recommendations", "Recommendations", "सिफ़ारिशें"),
    ("next_steps", "Next steps", "अगले कदम"),
    (
        "fir_notice",
        "This matter may require filing an FIR at your local police station.",
        "इस मामले में आपके स्थानीय थाने में FIR दर्ज कराने की आवश्यकता हो सकती है।",
    ),
    ("efiling_guide", "How to file online (e-Daakhil)", "ऑनलाइन शिकायत कैसे दर्ज करें (ई-दाखिल)"),
    (
        "lawyer_cta",
        "Connect with a verified lawyer to take this forward.",
        "आगे बढ़ने के लिए किसी सत्यापित वकील से जुड़ें।",
    ),
    (
        "helpline_question",
        "Have you already registered a complaint with the National Consumer Helpline (1915)?",
        "क्या आपने राष्ट्रीय उपभोक्ता हेल्पलाइन (1915) में शिकायत दर्ज कराई है?",
    ),
    (
        "path_question",
        "How would you like to proceed?",
        "आप कैसे आगे बढ़ना चाहेंगे?",
    ),
    ("initial_report", "Case Analysis", "मामले का विश्लेषण"),
    ("detailed_report", "Detailed Case Analysis", "विस्तृत मामला विश्लेषण"),
    ("authority", "Authority", "प्राधिकरण"),
    ("legal_provisions", "Legal provisions", "कानूनी प्रावधान"),
    ("action_plan", "Action plan", "कार्य योजना"),
    ("timeline", "Timeline", "समय-सीमा"),
    ("cost", "Estimated cost", "अनुमानित लागत"),
    ("success_factors", "Success factors", "सफलता के कारक"),
    ("assessment", "Final assessment", "अंतिम आकलन"),
];

/// Look up a UI string. Unknown keys return an empty string; missing Hindi
/// entries fall back to English.
pub fn translate(language: Language, key: &str) -> &'static str {
    let Some(entry) = STRINGS.iter().find(|(k, _, _)| *k == key) else {
        return "";
    };
    match language {
        Language::En => entry.1,
        Language::Hi => {
            if entry.2.is_empty() {
                entry.1
            } else {
                entry.2
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_en_and_hi() {
        assert_eq!(translate(Language::En, "summary"), "Summary");
        assert_eq!(translate(Language::Hi, "summary"), "सारांश");
    }

    #[test]
    fn test_unknown_key_is_empty() {
        assert_eq!(translate(Language::En, "nope"), "");
    }

    #[test]
    fn test_language_parse() {
        assert_eq!("hi".parse::<Language>().unwrap(), Language::Hi);
        assert_eq!("English".parse::<Language>().unwrap(), Language::En);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_settings_default() {
        let settings = UiSettings::default();
        assert_eq!(settings.language, Language::En);
        assert_eq!(settings.theme, Theme::Light);
    }
}

//! Supported interface languages.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub const ALL: [Self; 2] = [Self::En, Self::Zh];

    /// BCP 47 language tag.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Zh => "zh",
        }
    }

    /// Parses a language tag. Region subtags are ignored, so `zh-CN` is `Zh`.
    ///
    /// ```
    /// use actionboard::i18n::Locale;
    ///
    /// assert_eq!(Locale::from_code("zh-CN"), Some(Locale::Zh));
    /// assert_eq!(Locale::from_code("fr"), None);
    /// ```
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let language = code.split(['-', '_']).next().unwrap_or(code);
        Self::ALL
            .into_iter()
            .find(|locale| locale.code().eq_ignore_ascii_case(language.trim()))
    }

    /// The locale after this one, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::En => Self::Zh,
            Self::Zh => Self::En,
        }
    }

    pub(crate) const fn source(self) -> &'static str {
        match self {
            Self::En => include_str!("../../locales/en.toml"),
            Self::Zh => include_str!("../../locales/zh.toml"),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

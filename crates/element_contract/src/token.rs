//! Closed token sets used for variants, sizes, and themes.

/// Enum whose variants map one-to-one onto attribute tokens.
///
/// Parsing is lenient: [`TokenEnum::parse_or_default`] falls back to the `Default` variant
/// for anything it does not recognise so a bad attribute never leaves a component
/// unrendered.
pub trait TokenEnum: Copy + Default + PartialEq + 'static {
    /// Every variant, in declaration order.
    const ALL: &'static [Self];
    /// Token of every variant, in declaration order.
    const TOKENS: &'static [&'static str];

    /// Attribute token of this variant.
    fn token(self) -> &'static str;

    /// Looks up a variant by token.
    fn from_token(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|variant| variant.token() == raw)
    }

    /// Looks up a variant by token, falling back to `Default`.
    fn parse_or_default(raw: Option<&str>) -> Self {
        raw.and_then(Self::from_token).unwrap_or_default()
    }
}

/// Top-level color theme selected by the `data-theme` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Theme {
    /// Light surfaces.
    Light,
    /// Dark surfaces.
    #[default]
    Dark,
}

impl TokenEnum for Theme {
    const ALL: &'static [Self] = &[Self::Light, Self::Dark];
    const TOKENS: &'static [&'static str] = &["light", "dark"];

    fn token(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn theme_tokens_parse_with_dark_fallback() {
        assert_eq!(Theme::parse_or_default(Some("light")), Theme::Light);
        assert_eq!(Theme::parse_or_default(Some("sepia")), Theme::Dark);
        assert_eq!(Theme::parse_or_default(None), Theme::Dark);
        assert_eq!(
            Theme::ALL.iter().map(|t| t.token()).collect::<Vec<_>>(),
            Theme::TOKENS.to_vec()
        );
    }
}

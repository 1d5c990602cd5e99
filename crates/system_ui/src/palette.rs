//! Theme token tables.
//!
//! Components never hard-code colors: every value is a [`TokenRef`] naming a page-level
//! variable plus the built-in fallback used when the page does not define it.

use element_contract::{Theme, TokenEnum};
use element_runtime::{StyleRule, TokenRef};

use crate::tokens::Tone;

/// Background/foreground pair of one tone under one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneColors {
    /// Fill color.
    pub background: TokenRef,
    /// Text and icon color.
    pub foreground: TokenRef,
}

/// Neutral surface colors of one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceColors {
    /// Card and panel fill.
    pub background: TokenRef,
    /// Hairline borders.
    pub border: TokenRef,
    /// Primary text.
    pub text: TokenRef,
    /// Secondary text.
    pub muted: TokenRef,
}

/// Brand accent.
pub const BRAND: TokenRef = TokenRef::new("color-primary-600", "#7c3aed");
/// Brand accent on hover.
pub const BRAND_HOVER: TokenRef = TokenRef::new("color-primary-700", "#6d28d9");
/// Focus ring.
pub const FOCUS_RING: TokenRef = TokenRef::new("color-primary-400", "#a78bfa");

/// Small spacing step.
pub const SPACE_SM: TokenRef = TokenRef::new("spacing-sm", "0.5rem");
/// Medium spacing step.
pub const SPACE_MD: TokenRef = TokenRef::new("spacing-md", "1rem");
/// Large spacing step.
pub const SPACE_LG: TokenRef = TokenRef::new("spacing-lg", "1.5rem");
/// Default corner radius.
pub const RADIUS_MD: TokenRef = TokenRef::new("border-radius-md", "0.375rem");
/// Large corner radius.
pub const RADIUS_LG: TokenRef = TokenRef::new("border-radius-lg", "0.75rem");
/// Fast transition duration.
pub const TRANSITION_FAST: TokenRef = TokenRef::new("transition-duration-fast", "150ms");

/// Colors of `tone` under `theme`.
pub const fn tone_colors(tone: Tone, theme: Theme) -> ToneColors {
    let (background, foreground) = match (tone, theme) {
        (Tone::Success, Theme::Light) => (
            TokenRef::new("color-success-100", "#dcfce7"),
            TokenRef::new("color-success-800", "#166534"),
        ),
        (Tone::Success, Theme::Dark) => (
            TokenRef::new("color-success-900", "#14532d"),
            TokenRef::new("color-success-200", "#bbf7d0"),
        ),
        (Tone::Warning, Theme::Light) => (
            TokenRef::new("color-warning-100", "#fef3c7"),
            TokenRef::new("color-warning-800", "#92400e"),
        ),
        (Tone::Warning, Theme::Dark) => (
            TokenRef::new("color-warning-900", "#78350f"),
            TokenRef::new("color-warning-200", "#fde68a"),
        ),
        (Tone::Danger, Theme::Light) => (
            TokenRef::new("color-danger-100", "#fee2e2"),
            TokenRef::new("color-danger-800", "#991b1b"),
        ),
        (Tone::Danger, Theme::Dark) => (
            TokenRef::new("color-danger-900", "#7f1d1d"),
            TokenRef::new("color-danger-200", "#fecaca"),
        ),
        (Tone::Info, Theme::Light) => (
            TokenRef::new("color-info-100", "#dbeafe"),
            TokenRef::new("color-info-800", "#1e40af"),
        ),
        (Tone::Info, Theme::Dark) => (
            TokenRef::new("color-info-900", "#1e3a8a"),
            TokenRef::new("color-info-200", "#bfdbfe"),
        ),
        (Tone::Default, Theme::Light) => (
            TokenRef::new("color-neutral-100", "#f3f4f6"),
            TokenRef::new("color-neutral-800", "#1f2937"),
        ),
        (Tone::Default, Theme::Dark) => (
            TokenRef::new("color-neutral-800", "#1f2937"),
            TokenRef::new("color-neutral-200", "#e5e7eb"),
        ),
    };
    ToneColors {
        background,
        foreground,
    }
}

/// Neutral surface of `theme`.
pub const fn surface(theme: Theme) -> SurfaceColors {
    match theme {
        Theme::Light => SurfaceColors {
            background: TokenRef::new("color-surface-light", "#ffffff"),
            border: TokenRef::new("color-neutral-200", "#e5e7eb"),
            text: TokenRef::new("color-neutral-900", "#111827"),
            muted: TokenRef::new("color-neutral-500", "#6b7280"),
        },
        Theme::Dark => SurfaceColors {
            background: TokenRef::new("color-surface-dark", "rgba(30, 41, 59, 0.6)"),
            border: TokenRef::new("color-neutral-700", "#374151"),
            text: TokenRef::new("color-neutral-50", "#f9fafb"),
            muted: TokenRef::new("color-neutral-400", "#9ca3af"),
        },
    }
}

/// Host selector matching `theme`. Dark is the default theme, so it also matches hosts
/// without the attribute.
pub fn theme_host(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => ":host([data-theme=\"light\"])",
        Theme::Dark => ":host",
    }
}

/// Tone rules for classes `{prefix}{tone}` under both themes.
///
/// `light_default` selects which theme applies without a `data-theme` attribute.
pub fn tone_rules(prefix: &str, light_default: bool) -> Vec<StyleRule> {
    let mut rules = Vec::new();
    let (base, overlay, overlay_host) = if light_default {
        (Theme::Light, Theme::Dark, ":host([data-theme=\"dark\"])")
    } else {
        (Theme::Dark, Theme::Light, ":host([data-theme=\"light\"])")
    };
    for tone in Tone::ALL {
        let class = format!(".{prefix}{}", tone.token());
        let colors = tone_colors(*tone, base);
        rules.push(
            StyleRule::new(class.clone())
                .decl("background", colors.background)
                .decl("color", colors.foreground),
        );
        let colors = tone_colors(*tone, overlay);
        rules.push(
            StyleRule::new(format!("{overlay_host} {class}"))
                .decl("background", colors.background)
                .decl("color", colors.foreground),
        );
    }
    rules
}

/// Surface rules for `selector` under both themes (dark unless the host says light).
pub fn surface_rules(selector: &str) -> Vec<StyleRule> {
    [Theme::Dark, Theme::Light]
        .into_iter()
        .map(|theme| {
            let colors = surface(theme);
            StyleRule::new(format!("{} {selector}", theme_host(theme)))
                .decl("background", colors.background)
                .decl("border-color", colors.border)
                .decl("color", colors.text)
        })
        .collect()
}

//! Closed token sets for component variants, sizes, and states.
//!
//! Every enum maps one-to-one onto the attribute tokens the components accept. Unknown
//! tokens fall back to the `Default` variant at render time.

use element_contract::TokenEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Semantic color family shared by badges, metric cards, and status badges.
pub enum Tone {
    /// Positive state.
    Success,
    /// Needs attention.
    Warning,
    /// Failure or critical state.
    Danger,
    /// Informational.
    Info,
    /// Neutral.
    #[default]
    Default,
}

impl TokenEnum for Tone {
    const ALL: &'static [Self] = &[
        Self::Success,
        Self::Warning,
        Self::Danger,
        Self::Info,
        Self::Default,
    ];
    const TOKENS: &'static [&'static str] = &["success", "warning", "danger", "info", "default"];

    fn token(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Info => "info",
            Self::Default => "default",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Three-step size scale used by badges, buttons, and the logo.
pub enum Size {
    /// Small.
    Sm,
    /// Medium.
    #[default]
    Md,
    /// Large.
    Lg,
}

impl TokenEnum for Size {
    const ALL: &'static [Self] = &[Self::Sm, Self::Md, Self::Lg];
    const TOKENS: &'static [&'static str] = &["sm", "md", "lg"];

    fn token(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Icon box sizes.
pub enum IconSize {
    /// 1rem.
    Xs,
    /// 1.25rem.
    Sm,
    /// 1.5rem.
    #[default]
    Md,
    /// 2rem.
    Lg,
    /// 2.5rem.
    Xl,
}

impl IconSize {
    /// Edge length of the icon box.
    pub const fn rem(self) -> &'static str {
        match self {
            Self::Xs => "1rem",
            Self::Sm => "1.25rem",
            Self::Md => "1.5rem",
            Self::Lg => "2rem",
            Self::Xl => "2.5rem",
        }
    }
}

impl TokenEnum for IconSize {
    const ALL: &'static [Self] = &[Self::Xs, Self::Sm, Self::Md, Self::Lg, Self::Xl];
    const TOKENS: &'static [&'static str] = &["xs", "sm", "md", "lg", "xl"];

    fn token(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Icon stroke color.
pub enum IconColor {
    /// Brand color.
    Primary,
    /// Success color.
    Success,
    /// Warning color.
    Warning,
    /// Danger color.
    Danger,
    /// Muted text color.
    Muted,
    /// Inherits the surrounding text color.
    #[default]
    Inherit,
}

impl TokenEnum for IconColor {
    const ALL: &'static [Self] = &[
        Self::Primary,
        Self::Success,
        Self::Warning,
        Self::Danger,
        Self::Muted,
        Self::Inherit,
    ];
    const TOKENS: &'static [&'static str] =
        &["primary", "success", "warning", "danger", "muted", "inherit"];

    fn token(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Muted => "muted",
            Self::Inherit => "inherit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Typography role of `sh-text`.
pub enum TextKind {
    /// Heading rendered with the configured level.
    Title,
    /// Body paragraph.
    #[default]
    Paragraph,
}

impl TokenEnum for TextKind {
    const ALL: &'static [Self] = &[Self::Title, Self::Paragraph];
    const TOKENS: &'static [&'static str] = &["title", "paragraph"];

    fn token(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Paragraph => "paragraph",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Heading level used when `sh-text` renders a title.
pub enum HeadingLevel {
    /// `h1`.
    #[default]
    H1,
    /// `h2`.
    H2,
    /// `h3`.
    H3,
    /// `h4`.
    H4,
    /// `h5`.
    H5,
    /// `h6`.
    H6,
}

impl TokenEnum for HeadingLevel {
    const ALL: &'static [Self] = &[Self::H1, Self::H2, Self::H3, Self::H4, Self::H5, Self::H6];
    const TOKENS: &'static [&'static str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

    fn token(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Native input type of `sh-input`.
pub enum InputType {
    /// Free text.
    #[default]
    Text,
    /// Numeric.
    Number,
    /// Email address, validated on demand.
    Email,
    /// Masked password.
    Password,
    /// Phone number.
    Tel,
}

impl TokenEnum for InputType {
    const ALL: &'static [Self] = &[
        Self::Text,
        Self::Number,
        Self::Email,
        Self::Password,
        Self::Tel,
    ];
    const TOKENS: &'static [&'static str] = &["text", "number", "email", "password", "tel"];

    fn token(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Email => "email",
            Self::Password => "password",
            Self::Tel => "tel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Field size of `sh-input`.
pub enum FieldSize {
    /// Compact.
    Small,
    /// Standard.
    #[default]
    Medium,
    /// Large.
    Large,
}

impl TokenEnum for FieldSize {
    const ALL: &'static [Self] = &[Self::Small, Self::Medium, Self::Large];
    const TOKENS: &'static [&'static str] = &["small", "medium", "large"];

    fn token(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Visual emphasis of `sh-button`.
pub enum ButtonVariant {
    /// Filled brand button.
    #[default]
    Primary,
    /// Outlined button.
    Secondary,
    /// Borderless button.
    Ghost,
    /// Destructive action.
    Danger,
}

impl TokenEnum for ButtonVariant {
    const ALL: &'static [Self] = &[Self::Primary, Self::Secondary, Self::Ghost, Self::Danger];
    const TOKENS: &'static [&'static str] = &["primary", "secondary", "ghost", "danger"];

    fn token(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Ghost => "ghost",
            Self::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Native `type` of the inner button.
pub enum ButtonType {
    /// Plain button.
    #[default]
    Button,
    /// Form submit.
    Submit,
    /// Form reset.
    Reset,
}

impl TokenEnum for ButtonType {
    const ALL: &'static [Self] = &[Self::Button, Self::Submit, Self::Reset];
    const TOKENS: &'static [&'static str] = &["button", "submit", "reset"];

    fn token(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Submit => "submit",
            Self::Reset => "reset",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Inner spacing of `sh-card`.
pub enum Padding {
    /// No padding.
    None,
    /// Small.
    Sm,
    /// Medium.
    #[default]
    Md,
    /// Large.
    Lg,
}

impl TokenEnum for Padding {
    const ALL: &'static [Self] = &[Self::None, Self::Sm, Self::Md, Self::Lg];
    const TOKENS: &'static [&'static str] = &["none", "sm", "md", "lg"];

    fn token(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Stock availability shown by `sh-status-badge`.
pub enum StockStatus {
    /// Available.
    #[default]
    InStock,
    /// Running low.
    LowStock,
    /// Depleted.
    OutOfStock,
    /// Reorder required.
    RestockNeeded,
}

impl StockStatus {
    /// Default label, badge tone, and whether the indicator pulses.
    pub const fn presentation(self) -> (&'static str, Tone, bool) {
        match self {
            Self::InStock => ("En stock", Tone::Success, true),
            Self::LowStock => ("Stock faible", Tone::Warning, true),
            Self::OutOfStock => ("Rupture", Tone::Danger, false),
            Self::RestockNeeded => ("À réapprovisionner", Tone::Info, true),
        }
    }
}

impl TokenEnum for StockStatus {
    const ALL: &'static [Self] = &[
        Self::InStock,
        Self::LowStock,
        Self::OutOfStock,
        Self::RestockNeeded,
    ];
    const TOKENS: &'static [&'static str] =
        &["in-stock", "low-stock", "out-of-stock", "restock-needed"];

    fn token(self) -> &'static str {
        match self {
            Self::InStock => "in-stock",
            Self::LowStock => "low-stock",
            Self::OutOfStock => "out-of-stock",
            Self::RestockNeeded => "restock-needed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Inventory level of a stock item card.
pub enum StockLevel {
    /// Within target range.
    #[default]
    Optimal,
    /// Below target.
    Low,
    /// Close to depletion.
    Critical,
    /// Depleted.
    OutOfStock,
    /// Above target.
    Overstocked,
}

impl StockLevel {
    /// Availability shown by the nested status badge.
    pub const fn status(self) -> StockStatus {
        match self {
            Self::Optimal | Self::Overstocked => StockStatus::InStock,
            Self::Low => StockStatus::LowStock,
            Self::Critical => StockStatus::RestockNeeded,
            Self::OutOfStock => StockStatus::OutOfStock,
        }
    }
}

impl TokenEnum for StockLevel {
    const ALL: &'static [Self] = &[
        Self::Optimal,
        Self::Low,
        Self::Critical,
        Self::OutOfStock,
        Self::Overstocked,
    ];
    const TOKENS: &'static [&'static str] =
        &["optimal", "low", "critical", "out-of-stock", "overstocked"];

    fn token(self) -> &'static str {
        match self {
            Self::Optimal => "optimal",
            Self::Low => "low",
            Self::Critical => "critical",
            Self::OutOfStock => "out-of-stock",
            Self::Overstocked => "overstocked",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Direction of a metric trend.
pub enum Trend {
    /// Rising.
    #[default]
    Increase,
    /// Falling.
    Decrease,
}

impl TokenEnum for Trend {
    const ALL: &'static [Self] = &[Self::Increase, Self::Decrease];
    const TOKENS: &'static [&'static str] = &["increase", "decrease"];

    fn token(self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Risk accent of `sh-stat-card`.
pub enum RiskLevel {
    /// No accent.
    #[default]
    Default,
    /// Critical.
    Critical,
    /// High.
    High,
    /// Medium.
    Medium,
    /// Low.
    Low,
}

impl TokenEnum for RiskLevel {
    const ALL: &'static [Self] = &[
        Self::Default,
        Self::Critical,
        Self::High,
        Self::Medium,
        Self::Low,
    ];
    const TOKENS: &'static [&'static str] = &["default", "critical", "high", "medium", "low"];

    fn token(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Depletion risk forecast by `sh-stock-prediction-card`.
pub enum PredictionRisk {
    /// Depletion within days.
    Critical,
    /// Depletion within a week or two.
    High,
    /// Worth watching.
    Medium,
    /// No depletion expected.
    #[default]
    Low,
}

impl PredictionRisk {
    /// Badge label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critique",
            Self::High => "Élevé",
            Self::Medium => "Modéré",
            Self::Low => "Faible",
        }
    }

    /// Accent tone.
    pub const fn tone(self) -> Tone {
        match self {
            Self::Critical => Tone::Danger,
            Self::High | Self::Medium => Tone::Warning,
            Self::Low => Tone::Success,
        }
    }
}

impl TokenEnum for PredictionRisk {
    const ALL: &'static [Self] = &[Self::Critical, Self::High, Self::Medium, Self::Low];
    const TOKENS: &'static [&'static str] = &["critical", "high", "medium", "low"];

    fn token(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Severity of an alert banner.
pub enum Severity {
    /// Critical.
    #[default]
    Critical,
    /// Warning.
    Warning,
    /// Informational.
    Info,
}

impl Severity {
    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }
}

impl TokenEnum for Severity {
    const ALL: &'static [Self] = &[Self::Critical, Self::Warning, Self::Info];
    const TOKENS: &'static [&'static str] = &["critical", "warning", "info"];

    fn token(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

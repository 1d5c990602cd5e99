//! StockHub component catalogue built on the element runtime.
//!
//! Components are grouped the way the design system names them: [`atoms`] render plain
//! markup, [`molecules`] compose atoms, and [`organisms`] assemble page sections. Each module
//! exposes its tag as `TAG` and a `definition()` constructor; [`define_all`] registers the
//! whole catalogue. The [`host`] module mounts registered elements inside a Leptos view.
//!
//! Visual constants live in [`palette`] and reach the stylesheet as CSS custom properties
//! with fallbacks, so pages can re-theme through [`element_runtime::ThemeTokens`] without
//! touching component code.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod atoms;
pub mod host;
pub mod icon;
pub mod molecules;
pub mod organisms;
pub mod palette;
pub mod tokens;

use element_contract::{PropertyDescriptor, Theme};
use element_runtime::{ElementRegistry, RegistryError};

pub use host::{use_element_runtime, ElementHost, ElementRuntimeContext, ElementRuntimeProvider};
pub use icon::IconName;

/// Document-level rules that scoped component stylesheets cannot express.
pub const GLOBAL_CSS: &str = "\
@keyframes sh-spin { from { transform: rotate(0deg); } to { transform: rotate(360deg); } }
@keyframes sh-pulse { 0%, 100% { opacity: 1; } 50% { opacity: 0.4; } }
@media (max-width: 639px) { sh-button[hide-text-mobile] .button-text { display: none; } }
";

/// Registers every catalogue element.
///
/// Fails on the first tag already present in `registry`.
pub fn define_all(registry: &mut ElementRegistry) -> Result<(), RegistryError> {
    atoms::define(registry)?;
    molecules::define(registry)?;
    organisms::define(registry)
}

/// Registry holding the full catalogue.
pub fn catalogue() -> Result<ElementRegistry, RegistryError> {
    let mut registry = ElementRegistry::new();
    define_all(&mut registry)?;
    Ok(registry)
}

/// `theme` property shared by themed components, reflected to `data-theme`.
pub(crate) fn theme_property() -> PropertyDescriptor {
    PropertyDescriptor::token::<Theme>("theme")
        .attribute("data-theme")
        .reflect()
}

/// Convenience imports for pages mounting catalogue elements.
pub mod prelude {
    pub use crate::host::{
        use_element_runtime, ElementHost, ElementRuntimeContext, ElementRuntimeProvider,
    };
    pub use crate::icon::IconName;
    pub use crate::tokens::{
        ButtonVariant, FieldSize, PredictionRisk, RiskLevel, Severity, Size, StockLevel,
        StockStatus, Tone, Trend,
    };
    pub use crate::{atoms, catalogue, define_all, molecules, organisms, GLOBAL_CSS};
    pub use element_runtime::{DispatchedEvent, ElementRuntime, RuntimeConfig, ThemeTokens};
}

//! Leaf components with no nested custom elements.

pub mod badge;
pub mod input;
pub mod logo;
pub mod text;

use element_runtime::{ElementRegistry, RegistryError};

/// Registers every atom plus `sh-icon`, which atoms and molecules share.
pub fn define(registry: &mut ElementRegistry) -> Result<(), RegistryError> {
    registry.define(crate::icon::definition())?;
    registry.define(badge::definition())?;
    registry.define(input::definition())?;
    registry.define(logo::definition())?;
    registry.define(text::definition())?;
    Ok(())
}

//! Composite components built from atoms.

pub mod button;
pub mod card;
pub mod metric_card;
pub mod quantity_input;
pub mod search_input;
pub mod stat_card;
pub mod status_badge;
pub mod stock_item_card;

use element_runtime::{ElementRegistry, RegistryError};

/// Registers every molecule.
pub fn define(registry: &mut ElementRegistry) -> Result<(), RegistryError> {
    registry.define(button::definition())?;
    registry.define(card::definition())?;
    registry.define(metric_card::definition())?;
    registry.define(quantity_input::definition())?;
    registry.define(search_input::definition())?;
    registry.define(stat_card::definition())?;
    registry.define(status_badge::definition())?;
    registry.define(stock_item_card::definition())?;
    Ok(())
}

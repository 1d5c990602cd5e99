//! Page-level sections composed from molecules.

pub mod footer;
pub mod header;
pub mod ia_alert_banner;
pub mod page_header;
pub mod stock_card;
pub mod stock_prediction_card;

use element_runtime::{ElementRegistry, RegistryError};

/// Registers every organism.
pub fn define(registry: &mut ElementRegistry) -> Result<(), RegistryError> {
    registry.define(footer::definition())?;
    registry.define(header::definition())?;
    registry.define(ia_alert_banner::definition())?;
    registry.define(page_header::definition())?;
    registry.define(stock_card::definition())?;
    registry.define(stock_prediction_card::definition())?;
    Ok(())
}

//! Effects - side effects declared by the reducer

use crate::state::PanelId;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch current weather on behalf of one panel instance
    FetchWeather { panel: PanelId, code: String },
}

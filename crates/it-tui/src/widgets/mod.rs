//! UI Widgets

mod combatants;
mod intake;
mod messages;
mod timeline;

pub use combatants::CombatantListWidget;
pub use intake::IntakeWidget;
pub use messages::MessagesWidget;
pub use timeline::TimelineWidget;

/// Optional side effects a history row can trigger.
pub mod capabilities;
/// Inline rename state machine.
pub mod edit;
/// Event and snapshot contracts shared with the rendering layer.
pub mod events;
pub mod item;
pub mod menu;
pub mod selection;
pub mod sidebar;

pub use capabilities::ItemCapabilities;
pub use edit::{DescriptionEditController, EditSession};
pub use events::{
    ActivationEvent, ActivationOutcome, CommitOutcome, DeleteRequested, EditKey, ItemProps,
    ItemView, MenuAction,
};
pub use item::{DEFAULT_ROUTE_PREFIX, ItemEnvironment, ListItemController};
pub use menu::MenuVisibilityController;
pub use selection::SelectionGate;
pub use sidebar::HistorySidebar;

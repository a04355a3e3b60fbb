pub mod dropdown;
pub mod hover_glow;
pub mod slider;

pub use dropdown::{Dropdown, DropdownItem, ItemTone, MenuAlign, MenuPlacement};
pub use hover_glow::{Bounds, HoverGlow, Point, RadialGlow};
pub use slider::{SegmentedSlider, SliderOption, SliderPosition, SliderSegment};

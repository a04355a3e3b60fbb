use serde::Serialize;

pub const DEFAULT_GLOW_RADIUS: f32 = 100.0;
pub const DEFAULT_GLOW_COLOR: &str = "#B15ACD";
/// Gradient stop where the glow color has faded to transparent.
pub const GLOW_FADE_STOP: f32 = 0.8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Screen-space rectangle of the hovered element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Radial glow to paint behind the container's content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadialGlow {
    pub radius: f32,
    pub center: Point,
    pub color: String,
    pub fade_stop: f32,
}

impl RadialGlow {
    pub fn css_background(&self) -> String {
        format!(
            "radial-gradient({}px circle at {}px {}px, {}, transparent {}%)",
            self.radius,
            self.center.x,
            self.center.y,
            self.color,
            (self.fade_stop * 100.0).round()
        )
    }
}

/// Pointer-tracked glow around a bordered container.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverGlow {
    radius: f32,
    color: String,
    visible: bool,
    pointer: Point,
}

impl Default for HoverGlow {
    fn default() -> Self {
        Self::new(DEFAULT_GLOW_RADIUS, DEFAULT_GLOW_COLOR)
    }
}

impl HoverGlow {
    pub fn new(radius: f32, color: impl Into<String>) -> Self {
        Self {
            radius: radius.max(0.0),
            color: color.into(),
            visible: false,
            pointer: Point::default(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn mouse_enter(&mut self) {
        self.visible = true;
    }

    pub fn mouse_leave(&mut self) {
        self.visible = false;
    }

    /// Stores the pointer relative to the element's top-left corner.
    pub fn mouse_move(&mut self, client: Point, bounds: Bounds) {
        self.pointer = Point::new(client.x - bounds.left, client.y - bounds.top);
    }

    /// Radius collapses to zero while the pointer is outside.
    pub fn glow(&self) -> RadialGlow {
        RadialGlow {
            radius: if self.visible { self.radius } else { 0.0 },
            center: self.pointer,
            color: self.color.clone(),
            fade_stop: GLOW_FADE_STOP,
        }
    }
}

/// Open/closed state of one item's overflow menu.
///
/// A collapsed container forces the menu shut and keeps it shut until the
/// container expands again. Re-expanding leaves it closed; only an explicit
/// trigger reopens it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuVisibilityController {
    open: bool,
    container_open: bool,
}

impl Default for MenuVisibilityController {
    fn default() -> Self {
        Self {
            open: false,
            container_open: true,
        }
    }
}

impl MenuVisibilityController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_container_open(&self) -> bool {
        self.container_open
    }

    /// Opening is refused while the container is collapsed.
    pub fn set_open(&mut self, open: bool) {
        if open && !self.container_open {
            tracing::trace!("ignoring menu open while its container is collapsed");
            return;
        }
        self.open = open;
    }

    pub fn toggle(&mut self) {
        self.set_open(!self.open);
    }

    pub fn on_container_visibility_changed(&mut self, container_open: bool) {
        self.container_open = container_open;
        if !container_open && self.open {
            tracing::trace!("closing menu because its container collapsed");
            self.open = false;
        }
    }
}

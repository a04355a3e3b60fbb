use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SliderPosition {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderOption<T> {
    pub value: T,
    pub text: String,
}

impl<T> SliderOption<T> {
    pub fn new(value: T, text: impl Into<String>) -> Self {
        Self {
            value,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderSegment<'a, T> {
    pub position: SliderPosition,
    pub option: &'a SliderOption<T>,
    pub selected: bool,
}

/// Two- or three-way segmented control.
///
/// The right segment doubles as the fallback: it is highlighted whenever
/// neither the left nor the middle value matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedSlider<T> {
    left: SliderOption<T>,
    middle: Option<SliderOption<T>>,
    right: SliderOption<T>,
}

impl<T: PartialEq + Clone> SegmentedSlider<T> {
    pub fn new(left: SliderOption<T>, right: SliderOption<T>) -> Self {
        Self {
            left,
            middle: None,
            right,
        }
    }

    pub fn with_middle(mut self, middle: SliderOption<T>) -> Self {
        self.middle = Some(middle);
        self
    }

    pub fn has_middle(&self) -> bool {
        self.middle.is_some()
    }

    pub fn selected_position(&self, selected: &T) -> SliderPosition {
        if *selected == self.left.value {
            return SliderPosition::Left;
        }

        match &self.middle {
            Some(middle) if *selected == middle.value => SliderPosition::Middle,
            _ => SliderPosition::Right,
        }
    }

    pub fn segments(&self, selected: &T) -> Vec<SliderSegment<'_, T>> {
        let active = self.selected_position(selected);
        let mut segments = Vec::with_capacity(3);

        segments.push(SliderSegment {
            position: SliderPosition::Left,
            option: &self.left,
            selected: active == SliderPosition::Left,
        });
        if let Some(middle) = &self.middle {
            segments.push(SliderSegment {
                position: SliderPosition::Middle,
                option: middle,
                selected: active == SliderPosition::Middle,
            });
        }
        segments.push(SliderSegment {
            position: SliderPosition::Right,
            option: &self.right,
            selected: active == SliderPosition::Right,
        });

        segments
    }

    /// Value behind a clicked segment; `None` for a middle click on a two-way slider.
    pub fn select(&self, position: SliderPosition) -> Option<T> {
        match position {
            SliderPosition::Left => Some(self.left.value.clone()),
            SliderPosition::Middle => self.middle.as_ref().map(|middle| middle.value.clone()),
            SliderPosition::Right => Some(self.right.value.clone()),
        }
    }
}

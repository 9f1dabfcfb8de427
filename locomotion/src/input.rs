use num_traits::PrimInt;

use crate::types::Vec2;

/// Buttons the controller reads each frame.
///
/// The discriminant is the bit index inside a [`ButtonSet`].
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Run = 0,
    Jump = 1,
    Crouch = 2,
    Slide = 3,
    Climb = 4,
}

impl Button {
    fn mask<T: PrimInt>(self) -> T {
        // NOTE: every button index must stay below the bit width of `T`.
        T::one() << (self as u8 as usize)
    }
}

/// A compact set of buttons backed by a primitive integer.
///
/// Defaults to `u16`, which leaves room for more buttons than the controller uses.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub struct ButtonSet<T: PrimInt = u16> {
    pub bits: T,
}

impl<T: PrimInt> ButtonSet<T> {
    pub fn empty() -> Self {
        Self { bits: T::zero() }
    }

    pub fn insert(&mut self, button: Button) {
        self.bits = self.bits | button.mask();
    }

    pub fn contains(&self, button: Button) -> bool {
        (self.bits & button.mask()) != T::zero()
    }
}

impl<T: PrimInt> FromIterator<Button> for ButtonSet<T> {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        let mut set = Self::empty();
        for b in iter {
            set.insert(b);
        }
        set
    }
}

/// One frame of sampled input.
///
/// Produced by an external input service; the controller only reads it.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputSnapshot {
    /// Forward/back axis in [-1, 1].
    pub vertical: f32,
    /// Right/left axis in [-1, 1].
    pub horizontal: f32,
    /// Look delta (x = yaw input, y = pitch input).
    pub look: Vec2,
    /// Buttons held this frame.
    pub held: ButtonSet,
}

impl InputSnapshot {
    /// Axes clamped to [-1, 1]. Non-finite values read as 0.
    pub fn axes(&self) -> (f32, f32) {
        let clamp = |v: f32| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        (clamp(self.vertical), clamp(self.horizontal))
    }

    #[inline]
    pub fn is_held(&self, button: Button) -> bool {
        self.held.contains(button)
    }

    // Builder helpers, mostly for scripted input.

    pub fn with_axes(mut self, vertical: f32, horizontal: f32) -> Self {
        self.vertical = vertical;
        self.horizontal = horizontal;
        self
    }

    pub fn with_look(mut self, x: f32, y: f32) -> Self {
        self.look = Vec2::new(x, y);
        self
    }

    pub fn holding(mut self, button: Button) -> Self {
        self.held.insert(button);
        self
    }
}

//! One tick's worth of player intent.
//!
//! Movement and turning are "held" flags; `fire`, `reload` and `toggle_map`
//! are edge-triggered and should be true for a single tick per key press.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub fire: bool,
    pub reload: bool,
    pub toggle_map: bool,
}

impl InputState {
    pub fn idle() -> Self {
        Self::default()
    }
}

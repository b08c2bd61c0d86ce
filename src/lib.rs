//! A first-person grid raycaster: DDA walls, billboard sprites, hitscan
//! combat and a terminal front end.

pub mod assets;
pub mod combat;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod frame;
pub mod input;
pub mod levels;
pub mod map;
pub mod movement;
pub mod raycast;
pub mod sprites;

//! Player domain module.

mod players_model;
mod players_traits;

pub use players_model::Player;
pub use players_traits::PlayerRepositoryTrait;

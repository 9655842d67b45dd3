//! Game domain module.

mod games_model;
mod games_traits;

pub use games_model::Game;
pub use games_traits::GameRepositoryTrait;

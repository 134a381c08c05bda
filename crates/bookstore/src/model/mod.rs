//! Pure data structures (DTOs) implementing the [`ActorEntity`](resource_actor::ActorEntity) trait.

pub mod account;
pub mod item;

pub use account::*;
pub use item::*;

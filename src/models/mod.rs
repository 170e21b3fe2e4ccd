//! Row types for the five catalog tables and the shapes they serialize to.

mod favorite;
mod people;
mod planet;
mod user;

pub use favorite::{FavoritePerson, FavoritePlanet, Favorites};
pub use people::{NewPeople, People};
pub use planet::{NewPlanet, Planet, PlanetDetail};
pub use user::{NewUser, User};

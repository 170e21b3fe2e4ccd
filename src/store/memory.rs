//! In-memory catalog with the same constraints as the PostgreSQL schema. Backs the tests.

use super::Catalog;
use crate::error::AppError;
use crate::models::{
    FavoritePerson, FavoritePlanet, NewPeople, NewPlanet, NewUser, People, Planet, User,
};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    planets: Vec<Planet>,
    peoples: Vec<People>,
    favorite_planets: Vec<FavoritePlanet>,
    favorite_persons: Vec<FavoritePerson>,
    next_id: NextIds,
}

/// Per-table SERIAL counters; ids start at 1 and are never reused.
#[derive(Default)]
struct NextIds {
    users: i32,
    planets: i32,
    peoples: i32,
    favorite_planets: i32,
    favorite_persons: i32,
}

fn bump(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

#[derive(Default)]
pub struct MemoryCatalog {
    tables: Mutex<Tables>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.tables().users.clone())
    }

    async fn user(&self, id: i32) -> Result<Option<User>, AppError> {
        Ok(self.tables().users.iter().find(|u| u.id == id).cloned())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.tables().users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, new: &NewUser) -> Result<User, AppError> {
        let mut t = self.tables();
        if t.users.iter().any(|u| u.email == new.email) {
            return Err(AppError::DuplicateValue("email"));
        }
        let user = User {
            id: bump(&mut t.next_id.users),
            name: new.name.clone(),
            email: new.email.clone(),
            password: new.password.clone(),
            is_active: true,
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn list_planets(&self) -> Result<Vec<Planet>, AppError> {
        Ok(self.tables().planets.clone())
    }

    async fn planet(&self, id: i32) -> Result<Option<Planet>, AppError> {
        Ok(self.tables().planets.iter().find(|p| p.id == id).cloned())
    }

    async fn planet_by_name(&self, name: &str) -> Result<Option<Planet>, AppError> {
        Ok(self.tables().planets.iter().find(|p| p.name == name).cloned())
    }

    async fn insert_planet(&self, new: &NewPlanet) -> Result<Planet, AppError> {
        let mut t = self.tables();
        if t.planets.iter().any(|p| p.name == new.name) {
            return Err(AppError::DuplicateValue("name"));
        }
        let planet = Planet {
            id: bump(&mut t.next_id.planets),
            name: new.name.clone(),
            population: new.population,
            diameter: new.diameter,
            climated: new.climated.clone(),
            terrain: new.terrain.clone(),
        };
        t.planets.push(planet.clone());
        Ok(planet)
    }

    async fn list_people(&self) -> Result<Vec<People>, AppError> {
        Ok(self.tables().peoples.clone())
    }

    async fn person(&self, id: i32) -> Result<Option<People>, AppError> {
        Ok(self.tables().peoples.iter().find(|p| p.id == id).cloned())
    }

    async fn person_by_name(&self, name: &str) -> Result<Option<People>, AppError> {
        Ok(self.tables().peoples.iter().find(|p| p.name == name).cloned())
    }

    async fn people_by_planet(&self, planet_id: i32) -> Result<Vec<People>, AppError> {
        Ok(self
            .tables()
            .peoples
            .iter()
            .filter(|p| p.planet_id == Some(planet_id))
            .cloned()
            .collect())
    }

    async fn insert_person(&self, new: &NewPeople) -> Result<People, AppError> {
        let mut t = self.tables();
        if t.peoples.iter().any(|p| p.name == new.name) {
            return Err(AppError::DuplicateValue("name"));
        }
        let person = People {
            id: bump(&mut t.next_id.peoples),
            name: new.name.clone(),
            specie: new.specie.clone(),
            gender: new.gender.clone(),
            height: new.height,
            weight: new.weight,
            age: new.age,
            planet_id: new.planet_id,
        };
        t.peoples.push(person.clone());
        Ok(person)
    }

    async fn favorite_planets_of(&self, user_id: i32) -> Result<Vec<Planet>, AppError> {
        let t = self.tables();
        Ok(t.favorite_planets
            .iter()
            .filter(|f| f.user_id == user_id)
            .filter_map(|f| t.planets.iter().find(|p| p.id == f.planet_id).cloned())
            .collect())
    }

    async fn favorite_persons_of(&self, user_id: i32) -> Result<Vec<People>, AppError> {
        let t = self.tables();
        Ok(t.favorite_persons
            .iter()
            .filter(|f| f.user_id == user_id)
            .filter_map(|f| t.peoples.iter().find(|p| p.id == f.people_id).cloned())
            .collect())
    }

    async fn has_favorite_planet(&self, user_id: i32, planet_id: i32) -> Result<bool, AppError> {
        Ok(self
            .tables()
            .favorite_planets
            .iter()
            .any(|f| f.user_id == user_id && f.planet_id == planet_id))
    }

    async fn has_favorite_person(&self, user_id: i32, people_id: i32) -> Result<bool, AppError> {
        Ok(self
            .tables()
            .favorite_persons
            .iter()
            .any(|f| f.user_id == user_id && f.people_id == people_id))
    }

    async fn add_favorite_planet(&self, user_id: i32, planet_id: i32) -> Result<bool, AppError> {
        let mut t = self.tables();
        if t.favorite_planets
            .iter()
            .any(|f| f.user_id == user_id && f.planet_id == planet_id)
        {
            return Ok(false);
        }
        let id = bump(&mut t.next_id.favorite_planets);
        t.favorite_planets.push(FavoritePlanet {
            id,
            user_id,
            planet_id,
        });
        Ok(true)
    }

    async fn add_favorite_person(&self, user_id: i32, people_id: i32) -> Result<bool, AppError> {
        let mut t = self.tables();
        if t.favorite_persons
            .iter()
            .any(|f| f.user_id == user_id && f.people_id == people_id)
        {
            return Ok(false);
        }
        let id = bump(&mut t.next_id.favorite_persons);
        t.favorite_persons.push(FavoritePerson {
            id,
            user_id,
            people_id,
        });
        Ok(true)
    }

    async fn remove_favorite_planet(&self, user_id: i32, planet_id: i32) -> Result<bool, AppError> {
        let mut t = self.tables();
        let before = t.favorite_planets.len();
        t.favorite_planets
            .retain(|f| !(f.user_id == user_id && f.planet_id == planet_id));
        Ok(t.favorite_planets.len() < before)
    }

    async fn remove_favorite_person(&self, user_id: i32, people_id: i32) -> Result<bool, AppError> {
        let mut t = self.tables();
        let before = t.favorite_persons.len();
        t.favorite_persons
            .retain(|f| !(f.user_id == user_id && f.people_id == people_id));
        Ok(t.favorite_persons.len() < before)
    }
}

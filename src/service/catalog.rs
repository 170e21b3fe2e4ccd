//! Catalog rules on top of a [`Catalog`] store: existence checks, uniqueness, favorites.

use crate::error::{AppError, Kind};
use crate::models::{Favorites, People, Planet, PlanetDetail, User};
use crate::service::RequestValidator;
use crate::store::Catalog;
use serde_json::{Map, Value};

pub struct CatalogService;

impl CatalogService {
    pub async fn create_user(store: &dyn Catalog, body: &Map<String, Value>) -> Result<User, AppError> {
        let new = RequestValidator::new_user(body)?;
        if store.user_by_email(&new.email).await?.is_some() {
            return Err(AppError::DuplicateValue("email"));
        }
        let user = store.insert_user(&new).await?;
        tracing::info!(user_id = user.id, "user created");
        Ok(user)
    }

    pub async fn create_planet(store: &dyn Catalog, body: &Map<String, Value>) -> Result<Planet, AppError> {
        let new = RequestValidator::new_planet(body)?;
        if store.planet_by_name(&new.name).await?.is_some() {
            return Err(AppError::DuplicateValue("name"));
        }
        let planet = store.insert_planet(&new).await?;
        tracing::info!(planet_id = planet.id, name = %planet.name, "planet created");
        Ok(planet)
    }

    pub async fn create_person(store: &dyn Catalog, body: &Map<String, Value>) -> Result<People, AppError> {
        let new = RequestValidator::new_people(body)?;
        if store.person_by_name(&new.name).await?.is_some() {
            return Err(AppError::DuplicateValue("name"));
        }
        if let Some(planet_id) = new.planet_id {
            if store.planet(planet_id).await?.is_none() {
                return Err(AppError::NotFound(Kind::Planet));
            }
        }
        let person = store.insert_person(&new).await?;
        tracing::info!(people_id = person.id, name = %person.name, "person created");
        Ok(person)
    }

    pub async fn planet_detail(store: &dyn Catalog, id: i32) -> Result<PlanetDetail, AppError> {
        let planet = store.planet(id).await?.ok_or(AppError::PlanetNotFound)?;
        let inhabitants = store.people_by_planet(planet.id).await?;
        Ok(PlanetDetail { planet, inhabitants })
    }

    /// The user's bookmarks. 404 when the user has none (including when the user does not exist).
    pub async fn favorites(store: &dyn Catalog, user_id: i32) -> Result<Favorites, AppError> {
        let favorite_planets = store.favorite_planets_of(user_id).await?;
        let favorite_persons = store.favorite_persons_of(user_id).await?;
        if favorite_planets.is_empty() && favorite_persons.is_empty() {
            return Err(AppError::NoFavorites);
        }
        let user = store.user(user_id).await?.ok_or(AppError::NoFavorites)?;
        Ok(Favorites {
            user,
            favorite_planets,
            favorite_persons,
        })
    }

    pub async fn add_favorite_planet(store: &dyn Catalog, planet_id: i32, user_id: i32) -> Result<Planet, AppError> {
        let planet = Self::planet_for_user(store, planet_id, user_id).await?;
        let already = |planet: Planet| AppError::AlreadyFavorite {
            kind: Kind::Planet,
            name: planet.name,
        };
        if store.has_favorite_planet(user_id, planet_id).await? {
            return Err(already(planet));
        }
        if !store.add_favorite_planet(user_id, planet_id).await? {
            return Err(already(planet));
        }
        tracing::info!(user_id, planet_id, "planet bookmarked");
        Ok(planet)
    }

    pub async fn add_favorite_person(store: &dyn Catalog, people_id: i32, user_id: i32) -> Result<People, AppError> {
        let person = Self::person_for_user(store, people_id, user_id).await?;
        let already = |person: People| AppError::AlreadyFavorite {
            kind: Kind::Person,
            name: person.name,
        };
        if store.has_favorite_person(user_id, people_id).await? {
            return Err(already(person));
        }
        if !store.add_favorite_person(user_id, people_id).await? {
            return Err(already(person));
        }
        tracing::info!(user_id, people_id, "person bookmarked");
        Ok(person)
    }

    pub async fn remove_favorite_planet(store: &dyn Catalog, planet_id: i32, user_id: i32) -> Result<Planet, AppError> {
        let planet = Self::planet_for_user(store, planet_id, user_id).await?;
        if !store.remove_favorite_planet(user_id, planet_id).await? {
            return Err(AppError::NotInFavorites(Kind::Planet));
        }
        tracing::info!(user_id, planet_id, "planet removed from favorites");
        Ok(planet)
    }

    pub async fn remove_favorite_person(store: &dyn Catalog, people_id: i32, user_id: i32) -> Result<People, AppError> {
        let person = Self::person_for_user(store, people_id, user_id).await?;
        if !store.remove_favorite_person(user_id, people_id).await? {
            return Err(AppError::NotInFavorites(Kind::Person));
        }
        tracing::info!(user_id, people_id, "person removed from favorites");
        Ok(person)
    }

    /// User first, then target: the order the 404s are reported in.
    async fn planet_for_user(store: &dyn Catalog, planet_id: i32, user_id: i32) -> Result<Planet, AppError> {
        store.user(user_id).await?.ok_or(AppError::NotFound(Kind::User))?;
        store
            .planet(planet_id)
            .await?
            .ok_or(AppError::NotFound(Kind::Planet))
    }

    async fn person_for_user(store: &dyn Catalog, people_id: i32, user_id: i32) -> Result<People, AppError> {
        store.user(user_id).await?.ok_or(AppError::NotFound(Kind::User))?;
        store
            .person(people_id)
            .await?
            .ok_or(AppError::NotFound(Kind::Person))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewPeople, NewPlanet, NewUser};
    use crate::routes::app;
    use crate::state::AppState;
    use crate::store::MemoryCatalog;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Memory store that can be switched into two bad states: every call failing like a lost
    /// connection, or lookups going stale so writes hit the store's own uniqueness checks.
    #[derive(Default)]
    struct FlakyCatalog {
        inner: MemoryCatalog,
        down: AtomicBool,
        stale: AtomicBool,
    }

    impl FlakyCatalog {
        fn up(&self) -> Result<(), AppError> {
            if self.down.load(Ordering::SeqCst) {
                return Err(AppError::Db(sqlx::Error::PoolClosed));
            }
            Ok(())
        }

        fn stale(&self) -> bool {
            self.stale.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Catalog for FlakyCatalog {
        async fn ping(&self) -> Result<(), AppError> {
            self.up()?;
            self.inner.ping().await
        }

        async fn list_users(&self) -> Result<Vec<User>, AppError> {
            self.up()?;
            self.inner.list_users().await
        }

        async fn user(&self, id: i32) -> Result<Option<User>, AppError> {
            self.up()?;
            self.inner.user(id).await
        }

        async fn user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
            self.up()?;
            if self.stale() {
                return Ok(None);
            }
            self.inner.user_by_email(email).await
        }

        async fn insert_user(&self, new: &NewUser) -> Result<User, AppError> {
            self.up()?;
            self.inner.insert_user(new).await
        }

        async fn list_planets(&self) -> Result<Vec<Planet>, AppError> {
            self.up()?;
            self.inner.list_planets().await
        }

        async fn planet(&self, id: i32) -> Result<Option<Planet>, AppError> {
            self.up()?;
            self.inner.planet(id).await
        }

        async fn planet_by_name(&self, name: &str) -> Result<Option<Planet>, AppError> {
            self.up()?;
            if self.stale() {
                return Ok(None);
            }
            self.inner.planet_by_name(name).await
        }

        async fn insert_planet(&self, new: &NewPlanet) -> Result<Planet, AppError> {
            self.up()?;
            self.inner.insert_planet(new).await
        }

        async fn list_people(&self) -> Result<Vec<People>, AppError> {
            self.up()?;
            self.inner.list_people().await
        }

        async fn person(&self, id: i32) -> Result<Option<People>, AppError> {
            self.up()?;
            self.inner.person(id).await
        }

        async fn person_by_name(&self, name: &str) -> Result<Option<People>, AppError> {
            self.up()?;
            if self.stale() {
                return Ok(None);
            }
            self.inner.person_by_name(name).await
        }

        async fn people_by_planet(&self, planet_id: i32) -> Result<Vec<People>, AppError> {
            self.up()?;
            self.inner.people_by_planet(planet_id).await
        }

        async fn insert_person(&self, new: &NewPeople) -> Result<People, AppError> {
            self.up()?;
            self.inner.insert_person(new).await
        }

        async fn favorite_planets_of(&self, user_id: i32) -> Result<Vec<Planet>, AppError> {
            self.up()?;
            self.inner.favorite_planets_of(user_id).await
        }

        async fn favorite_persons_of(&self, user_id: i32) -> Result<Vec<People>, AppError> {
            self.up()?;
            self.inner.favorite_persons_of(user_id).await
        }

        async fn has_favorite_planet(&self, user_id: i32, planet_id: i32) -> Result<bool, AppError> {
            self.up()?;
            if self.stale() {
                return Ok(false);
            }
            self.inner.has_favorite_planet(user_id, planet_id).await
        }

        async fn has_favorite_person(&self, user_id: i32, people_id: i32) -> Result<bool, AppError> {
            self.up()?;
            if self.stale() {
                return Ok(false);
            }
            self.inner.has_favorite_person(user_id, people_id).await
        }

        async fn add_favorite_planet(&self, user_id: i32, planet_id: i32) -> Result<bool, AppError> {
            self.up()?;
            self.inner.add_favorite_planet(user_id, planet_id).await
        }

        async fn add_favorite_person(&self, user_id: i32, people_id: i32) -> Result<bool, AppError> {
            self.up()?;
            self.inner.add_favorite_person(user_id, people_id).await
        }

        async fn remove_favorite_planet(&self, user_id: i32, planet_id: i32) -> Result<bool, AppError> {
            self.up()?;
            self.inner.remove_favorite_planet(user_id, planet_id).await
        }

        async fn remove_favorite_person(&self, user_id: i32, people_id: i32) -> Result<bool, AppError> {
            self.up()?;
            self.inner.remove_favorite_person(user_id, people_id).await
        }
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Padme".into(),
            email: email.into(),
            password: "naboo".into(),
        }
    }

    fn new_planet(name: &str) -> NewPlanet {
        NewPlanet {
            name: name.into(),
            population: 200_000,
            diameter: 10_465,
            climated: "arid".into(),
            terrain: "desert".into(),
        }
    }

    fn new_person(name: &str) -> NewPeople {
        NewPeople {
            name: name.into(),
            specie: "Human".into(),
            gender: "female".into(),
            height: 150,
            weight: 49,
            age: 27,
            planet_id: None,
        }
    }

    async fn call(store: &Arc<FlakyCatalog>, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
        let state = AppState {
            catalog: store.clone(),
        };
        let body = if body.is_null() {
            Body::empty()
        } else {
            Body::from(body.to_string())
        };
        let request = Request::builder().method(method).uri(uri).body(body).unwrap();
        let response = app(state, 64 * 1024).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn unreachable_store_is_not_ready() {
        let store = Arc::new(FlakyCatalog::default());
        store.down.store(true, Ordering::SeqCst);
        let (status, body) = call(&store, "GET", "/ready", Value::Null).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, json!({ "status": "degraded", "database": "unavailable" }));

        let (status, _) = call(&store, "GET", "/health", Value::Null).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn store_failures_hide_their_cause() {
        let store = Arc::new(FlakyCatalog::default());
        store.down.store(true, Ordering::SeqCst);
        for uri in ["/planets", "/peoples/1", "/user/1/favorites"] {
            let (status, body) = call(&store, "GET", uri, Value::Null).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
            assert_eq!(body, json!({ "msg": "Internal server error" }), "{uri}");
        }
        let (status, body) = call(
            &store,
            "POST",
            "/planets",
            json!({ "name": "Alderaan", "population": 1, "diameter": 1, "climated": "x", "terrain": "y" }),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "msg": "Internal server error" }));
    }

    #[tokio::test]
    async fn email_taken_between_check_and_insert() {
        let store = Arc::new(FlakyCatalog::default());
        store.inner.insert_user(&new_user("padme@naboo.gov")).await.unwrap();
        store.stale.store(true, Ordering::SeqCst);
        let (status, body) = call(
            &store,
            "POST",
            "/user",
            json!({ "name": "Amidala", "email": "padme@naboo.gov", "password": "queen" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "msg": "This email is taken; please choose another." }));
        assert_eq!(store.inner.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn name_taken_between_check_and_insert() {
        let store = Arc::new(FlakyCatalog::default());
        store.inner.insert_planet(&new_planet("Naboo")).await.unwrap();
        store.stale.store(true, Ordering::SeqCst);
        let err = CatalogService::create_planet(
            store.as_ref(),
            json!({ "name": "Naboo", "population": 1, "diameter": 1, "climated": "x", "terrain": "y" })
                .as_object()
                .unwrap(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::DuplicateValue("name")));
    }

    #[tokio::test]
    async fn favorite_added_between_check_and_insert() {
        let store = Arc::new(FlakyCatalog::default());
        let user = store.inner.insert_user(&new_user("padme@naboo.gov")).await.unwrap();
        let planet = store.inner.insert_planet(&new_planet("Naboo")).await.unwrap();
        let person = store.inner.insert_person(&new_person("Sabe")).await.unwrap();
        assert!(store.inner.add_favorite_planet(user.id, planet.id).await.unwrap());
        assert!(store.inner.add_favorite_person(user.id, person.id).await.unwrap());
        store.stale.store(true, Ordering::SeqCst);

        let uri = format!("/favorite/planet/{}/{}", planet.id, user.id);
        let (status, body) = call(&store, "POST", &uri, Value::Null).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "msg": "The planet Naboo is already added to favorites" }));

        let uri = format!("/favorite/person/{}/{}", person.id, user.id);
        let (status, body) = call(&store, "POST", &uri, Value::Null).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "msg": "The person Sabe is already added to favorites" }));

        assert_eq!(store.inner.favorite_planets_of(user.id).await.unwrap().len(), 1);
        assert_eq!(store.inner.favorite_persons_of(user.id).await.unwrap().len(), 1);
    }
}

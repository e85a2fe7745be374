use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// Prefix every route is mounted under, matching the public petstore.
pub const BASE_PATH: &str = "/api/v3";

const PET_STATUSES: [&str; 3] = ["available", "pending", "sold"];
const ORDER_STATUSES: [&str; 3] = ["placed", "approved", "delivered"];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub photo_urls: Vec<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ship_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_status: Option<i32>,
}

#[derive(Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct PetFormQuery {
    pub name: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginQuery {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Default)]
pub struct Store {
    pets: HashMap<i64, Pet>,
    orders: HashMap<i64, Order>,
    users: HashMap<String, User>,
    next_id: i64,
    sessions: u64,
}

impl Store {
    /// Keep a client-supplied id and move the counter past it, or allocate
    /// the next free one.
    fn claim_id(&mut self, requested: Option<i64>) -> i64 {
        match requested {
            Some(id) => {
                self.next_id = self.next_id.max(id);
                id
            }
            None => {
                self.next_id += 1;
                self.next_id
            }
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

type ApiResult<T> = Result<T, (StatusCode, &'static str)>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let api = Router::new()
        .route("/pet", post(add_pet).put(update_pet))
        .route("/pet/findByStatus", get(find_pets_by_status))
        .route("/pet/findByTags", get(find_pets_by_tags))
        .route(
            "/pet/{pet_id}",
            get(get_pet).post(update_pet_with_form).delete(delete_pet),
        )
        .route("/store/inventory", get(get_inventory))
        .route("/store/order", post(place_order))
        .route("/store/order/{order_id}", get(get_order).delete(delete_order))
        .route("/user", post(create_user))
        .route("/user/createWithList", post(create_users_with_list))
        .route("/user/login", get(login_user))
        .route("/user/logout", get(logout_user))
        .route(
            "/user/{username}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(db);
    Router::new().nest(BASE_PATH, api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn check_status(status: Option<&str>, allowed: &[&str], message: &'static str) -> ApiResult<()> {
    match status {
        Some(value) if !allowed.contains(&value) => Err((StatusCode::BAD_REQUEST, message)),
        _ => Ok(()),
    }
}

// --- pet ---

async fn add_pet(State(db): State<Db>, Json(mut pet): Json<Pet>) -> ApiResult<Json<Pet>> {
    check_status(pet.status.as_deref(), &PET_STATUSES, "Invalid status value")?;
    let mut store = db.write().await;
    let id = store.claim_id(pet.id);
    pet.id = Some(id);
    store.pets.insert(id, pet.clone());
    tracing::debug!(pet_id = id, "pet added");
    Ok(Json(pet))
}

async fn update_pet(State(db): State<Db>, Json(pet): Json<Pet>) -> ApiResult<Json<Pet>> {
    check_status(pet.status.as_deref(), &PET_STATUSES, "Invalid status value")?;
    let id = pet.id.ok_or((StatusCode::BAD_REQUEST, "Invalid ID supplied"))?;
    let mut store = db.write().await;
    let existing = store
        .pets
        .get_mut(&id)
        .ok_or((StatusCode::NOT_FOUND, "Pet not found"))?;
    *existing = pet.clone();
    Ok(Json(pet))
}

async fn find_pets_by_status(
    State(db): State<Db>,
    Query(query): Query<StatusQuery>,
) -> ApiResult<Json<Vec<Pet>>> {
    let status = query.status.unwrap_or_else(|| "available".to_string());
    check_status(Some(&status), &PET_STATUSES, "Invalid status value")?;
    let store = db.read().await;
    let mut pets: Vec<Pet> = store
        .pets
        .values()
        .filter(|pet| pet.status.as_deref() == Some(status.as_str()))
        .cloned()
        .collect();
    pets.sort_by_key(|pet| pet.id);
    Ok(Json(pets))
}

/// Repeated `tags=` pairs are read as a list; a pet matches if it carries any.
async fn find_pets_by_tags(
    State(db): State<Db>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Json<Vec<Pet>>> {
    let tags: Vec<String> = pairs
        .into_iter()
        .filter(|(key, _)| key == "tags")
        .map(|(_, value)| value)
        .collect();
    if tags.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "No tags provided"));
    }
    let store = db.read().await;
    let mut pets: Vec<Pet> = store
        .pets
        .values()
        .filter(|pet| {
            pet.tags
                .iter()
                .any(|tag| tag.name.as_ref().is_some_and(|name| tags.contains(name)))
        })
        .cloned()
        .collect();
    pets.sort_by_key(|pet| pet.id);
    Ok(Json(pets))
}

async fn get_pet(State(db): State<Db>, Path(pet_id): Path<i64>) -> ApiResult<Json<Pet>> {
    let store = db.read().await;
    store
        .pets
        .get(&pet_id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Pet not found"))
}

async fn update_pet_with_form(
    State(db): State<Db>,
    Path(pet_id): Path<i64>,
    Query(form): Query<PetFormQuery>,
) -> ApiResult<Json<Pet>> {
    check_status(form.status.as_deref(), &PET_STATUSES, "Invalid status value")?;
    let mut store = db.write().await;
    let pet = store
        .pets
        .get_mut(&pet_id)
        .ok_or((StatusCode::NOT_FOUND, "Pet not found"))?;
    if let Some(name) = form.name {
        pet.name = name;
    }
    if let Some(status) = form.status {
        pet.status = Some(status);
    }
    Ok(Json(pet.clone()))
}

async fn delete_pet(State(db): State<Db>, Path(pet_id): Path<i64>) -> ApiResult<&'static str> {
    let mut store = db.write().await;
    store
        .pets
        .remove(&pet_id)
        .map(|_| "Pet deleted")
        .ok_or((StatusCode::NOT_FOUND, "Pet not found"))
}

// --- store ---

async fn get_inventory(State(db): State<Db>) -> Json<BTreeMap<String, i32>> {
    let store = db.read().await;
    let mut counts = BTreeMap::new();
    for pet in store.pets.values() {
        if let Some(status) = &pet.status {
            *counts.entry(status.clone()).or_insert(0) += 1;
        }
    }
    Json(counts)
}

async fn place_order(State(db): State<Db>, Json(mut order): Json<Order>) -> ApiResult<Json<Order>> {
    check_status(order.status.as_deref(), &ORDER_STATUSES, "Invalid input")?;
    let mut store = db.write().await;
    let id = store.claim_id(order.id);
    order.id = Some(id);
    store.orders.insert(id, order.clone());
    Ok(Json(order))
}

async fn get_order(State(db): State<Db>, Path(order_id): Path<i64>) -> ApiResult<Json<Order>> {
    let store = db.read().await;
    store
        .orders
        .get(&order_id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Order not found"))
}

async fn delete_order(State(db): State<Db>, Path(order_id): Path<i64>) -> ApiResult<StatusCode> {
    let mut store = db.write().await;
    store
        .orders
        .remove(&order_id)
        .map(|_| StatusCode::OK)
        .ok_or((StatusCode::NOT_FOUND, "Order not found"))
}

// --- user ---

async fn create_user(State(db): State<Db>, Json(user): Json<User>) -> ApiResult<Json<User>> {
    let username = user
        .username
        .clone()
        .ok_or((StatusCode::BAD_REQUEST, "Invalid input"))?;
    db.write().await.users.insert(username, user.clone());
    Ok(Json(user))
}

async fn create_users_with_list(
    State(db): State<Db>,
    Json(users): Json<Vec<User>>,
) -> ApiResult<Json<User>> {
    let last = users
        .last()
        .cloned()
        .ok_or((StatusCode::BAD_REQUEST, "Invalid input"))?;
    let mut store = db.write().await;
    for user in users {
        let username = user
            .username
            .clone()
            .ok_or((StatusCode::BAD_REQUEST, "Invalid input"))?;
        store.users.insert(username, user);
    }
    Ok(Json(last))
}

async fn login_user(State(db): State<Db>, Query(query): Query<LoginQuery>) -> ApiResult<String> {
    let mut store = db.write().await;
    let valid = match (&query.username, &query.password) {
        (Some(username), Some(password)) => store
            .users
            .get(username)
            .is_some_and(|user| user.password.as_ref() == Some(password)),
        _ => false,
    };
    if !valid {
        return Err((StatusCode::BAD_REQUEST, "Invalid username/password supplied"));
    }
    store.sessions += 1;
    Ok(format!("logged in user session:{}", store.sessions))
}

async fn logout_user() -> &'static str {
    "User logged out"
}

async fn get_user(State(db): State<Db>, Path(username): Path<String>) -> ApiResult<Json<User>> {
    let store = db.read().await;
    store
        .users
        .get(&username)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "User not found"))
}

async fn update_user(
    State(db): State<Db>,
    Path(username): Path<String>,
    Json(user): Json<User>,
) -> ApiResult<StatusCode> {
    let mut store = db.write().await;
    if store.users.remove(&username).is_none() {
        return Err((StatusCode::NOT_FOUND, "User not found"));
    }
    let key = user.username.clone().unwrap_or(username);
    store.users.insert(key, user);
    Ok(StatusCode::OK)
}

async fn delete_user(State(db): State<Db>, Path(username): Path<String>) -> ApiResult<StatusCode> {
    let mut store = db.write().await;
    store
        .users
        .remove(&username)
        .map(|_| StatusCode::OK)
        .ok_or((StatusCode::NOT_FOUND, "User not found"))
}

//! Operations on the `pet` resource.
//!
//! # Design
//! `PetApi` holds only a shared `Configuration` and carries no mutable state
//! between calls, so it is cheap to construct and safe to share across tasks.
//! Each operation is available in two forms: a pure `build_*` method that
//! produces the exact `HttpRequest`, and an async method that sends it through
//! the configured transport and decodes the response.

use std::sync::Arc;

use crate::client::{parse_empty, parse_json, send, OperationRequest};
use crate::configuration::Configuration;
use crate::enums::{FindPetsByStatusStatus, PetStatus, WireEnum};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::types::Pet;

#[derive(Debug, Clone)]
pub struct PetApi {
    configuration: Arc<Configuration>,
}

impl PetApi {
    pub fn new(configuration: Arc<Configuration>) -> Self {
        Self { configuration }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn build_add_pet(&self, pet: &Pet) -> Result<HttpRequest, ApiError> {
        Ok(OperationRequest::new(&self.configuration, HttpMethod::Post, "/pet")
            .json_body(pet)?
            .build())
    }

    /// Add a new pet to the store. `POST /pet`
    pub async fn add_pet(&self, pet: &Pet) -> Result<Pet, ApiError> {
        let request = self.build_add_pet(pet)?;
        parse_json(send(&self.configuration, request).await?)
    }

    pub fn build_update_pet(&self, pet: &Pet) -> Result<HttpRequest, ApiError> {
        Ok(OperationRequest::new(&self.configuration, HttpMethod::Put, "/pet")
            .json_body(pet)?
            .build())
    }

    /// Update an existing pet, matched by id. `PUT /pet`
    pub async fn update_pet(&self, pet: &Pet) -> Result<Pet, ApiError> {
        let request = self.build_update_pet(pet)?;
        parse_json(send(&self.configuration, request).await?)
    }

    /// `status` is omitted from the query string when `None`.
    pub fn build_find_pets_by_status(&self, status: Option<FindPetsByStatusStatus>) -> HttpRequest {
        OperationRequest::new(&self.configuration, HttpMethod::Get, "/pet/findByStatus")
            .optional_query("status", status.map(WireEnum::wire_value))
            .build()
    }

    /// Find pets by status. `GET /pet/findByStatus`
    pub async fn find_pets_by_status(
        &self,
        status: Option<FindPetsByStatusStatus>,
    ) -> Result<Vec<Pet>, ApiError> {
        let request = self.build_find_pets_by_status(status);
        parse_json(send(&self.configuration, request).await?)
    }

    /// Each tag becomes its own `tags=` pair; an empty slice sends none.
    pub fn build_find_pets_by_tags<S: AsRef<str>>(&self, tags: &[S]) -> HttpRequest {
        OperationRequest::new(&self.configuration, HttpMethod::Get, "/pet/findByTags")
            .repeated_query("tags", tags)
            .build()
    }

    /// Find pets carrying any of `tags`. `GET /pet/findByTags`
    pub async fn find_pets_by_tags<S: AsRef<str>>(&self, tags: &[S]) -> Result<Vec<Pet>, ApiError> {
        let request = self.build_find_pets_by_tags(tags);
        parse_json(send(&self.configuration, request).await?)
    }

    pub fn build_get_pet_by_id(&self, pet_id: i64) -> HttpRequest {
        OperationRequest::new(&self.configuration, HttpMethod::Get, format!("/pet/{pet_id}")).build()
    }

    /// `GET /pet/{petId}`
    pub async fn get_pet_by_id(&self, pet_id: i64) -> Result<Pet, ApiError> {
        let request = self.build_get_pet_by_id(pet_id);
        parse_json(send(&self.configuration, request).await?)
    }

    pub fn build_update_pet_with_form(
        &self,
        pet_id: i64,
        name: Option<&str>,
        status: Option<PetStatus>,
    ) -> HttpRequest {
        OperationRequest::new(&self.configuration, HttpMethod::Post, format!("/pet/{pet_id}"))
            .optional_query("name", name)
            .optional_query("status", status.map(WireEnum::wire_value))
            .build()
    }

    /// Update a pet's name and/or status in place. `POST /pet/{petId}`
    pub async fn update_pet_with_form(
        &self,
        pet_id: i64,
        name: Option<&str>,
        status: Option<PetStatus>,
    ) -> Result<Pet, ApiError> {
        let request = self.build_update_pet_with_form(pet_id, name, status);
        parse_json(send(&self.configuration, request).await?)
    }

    /// `api_key` overrides any configured credential of the same name.
    pub fn build_delete_pet(&self, pet_id: i64, api_key: Option<&str>) -> HttpRequest {
        OperationRequest::new(&self.configuration, HttpMethod::Delete, format!("/pet/{pet_id}"))
            .optional_header("api_key", api_key)
            .build()
    }

    /// `DELETE /pet/{petId}`
    pub async fn delete_pet(&self, pet_id: i64, api_key: Option<&str>) -> Result<(), ApiError> {
        let request = self.build_delete_pet(pet_id, api_key);
        parse_empty(send(&self.configuration, request).await?)
    }
}

//! Operations on the `user` resource.

use std::sync::Arc;

use crate::client::{parse_empty, parse_json, parse_text, path_param, send, OperationRequest};
use crate::configuration::Configuration;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::types::User;

/// Client for `/user/*`. Usernames are percent-encoded as path segments.
#[derive(Debug, Clone)]
pub struct UserApi {
    configuration: Arc<Configuration>,
}

impl UserApi {
    pub fn new(configuration: Arc<Configuration>) -> Self {
        Self { configuration }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn build_create_user(&self, user: &User) -> Result<HttpRequest, ApiError> {
        Ok(OperationRequest::new(&self.configuration, HttpMethod::Post, "/user")
            .json_body(user)?
            .build())
    }

    /// `POST /user`
    pub async fn create_user(&self, user: &User) -> Result<User, ApiError> {
        let request = self.build_create_user(user)?;
        parse_json(send(&self.configuration, request).await?)
    }

    pub fn build_create_users_with_list_input(&self, users: &[User]) -> Result<HttpRequest, ApiError> {
        Ok(OperationRequest::new(&self.configuration, HttpMethod::Post, "/user/createWithList")
            .json_body(users)?
            .build())
    }

    /// Create several users at once; the service echoes the last one.
    /// `POST /user/createWithList`
    pub async fn create_users_with_list_input(&self, users: &[User]) -> Result<User, ApiError> {
        let request = self.build_create_users_with_list_input(users)?;
        parse_json(send(&self.configuration, request).await?)
    }

    pub fn build_login_user(&self, username: Option<&str>, password: Option<&str>) -> HttpRequest {
        OperationRequest::new(&self.configuration, HttpMethod::Get, "/user/login")
            .optional_query("username", username)
            .optional_query("password", password)
            .build()
    }

    /// Returns the session message. `GET /user/login`
    pub async fn login_user(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<String, ApiError> {
        let request = self.build_login_user(username, password);
        parse_text(send(&self.configuration, request).await?)
    }

    pub fn build_logout_user(&self) -> HttpRequest {
        OperationRequest::new(&self.configuration, HttpMethod::Get, "/user/logout").build()
    }

    /// `GET /user/logout`
    pub async fn logout_user(&self) -> Result<(), ApiError> {
        let request = self.build_logout_user();
        parse_empty(send(&self.configuration, request).await?)
    }

    pub fn build_get_user_by_name(&self, username: &str) -> HttpRequest {
        OperationRequest::new(
            &self.configuration,
            HttpMethod::Get,
            format!("/user/{}", path_param(username)),
        )
        .build()
    }

    /// `GET /user/{username}`
    pub async fn get_user_by_name(&self, username: &str) -> Result<User, ApiError> {
        let request = self.build_get_user_by_name(username);
        parse_json(send(&self.configuration, request).await?)
    }

    pub fn build_update_user(&self, username: &str, user: &User) -> Result<HttpRequest, ApiError> {
        Ok(OperationRequest::new(
            &self.configuration,
            HttpMethod::Put,
            format!("/user/{}", path_param(username)),
        )
        .json_body(user)?
        .build())
    }

    /// `PUT /user/{username}`
    pub async fn update_user(&self, username: &str, user: &User) -> Result<(), ApiError> {
        let request = self.build_update_user(username, user)?;
        parse_empty(send(&self.configuration, request).await?)
    }

    pub fn build_delete_user(&self, username: &str) -> HttpRequest {
        OperationRequest::new(
            &self.configuration,
            HttpMethod::Delete,
            format!("/user/{}", path_param(username)),
        )
        .build()
    }

    /// `DELETE /user/{username}`
    pub async fn delete_user(&self, username: &str) -> Result<(), ApiError> {
        let request = self.build_delete_user(username);
        parse_empty(send(&self.configuration, request).await?)
    }
}

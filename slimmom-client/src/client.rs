use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Response, StatusCode};
use slimmom_model::{
    intake::CalorieIntakeResult, measurement::UserMeasurements, profile::UserProfileUpdate,
};

pub const DEFAULT_BASE_URL: &str = "https://slimmom-backend-du1t.onrender.com";
pub const INTAKE_PATH: &str = "/api/products";
pub const PROFILE_UPDATE_PATH: &str = "/api/users/info";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("server unreachable")]
    CommunicationError,
    #[error("server did not respond in time")]
    Timeout,
    #[error("session token rejected")]
    Unauthorized,
    #[error("internal server error")]
    InternalServerError,
    #[error("invalid request")]
    RequestError,
    #[error("incorrect server response")]
    ResponseError,
}

pub type Result<T> = std::result::Result<T, Error>;

#[mockall::automock]
#[async_trait]
pub trait Client: Send + Sync {
    /// Asks the backend for the daily calorie rate and the products to avoid.
    async fn compute_intake(&self, measurements: &UserMeasurements) -> Result<CalorieIntakeResult>;
    /// Stores the merged profile on the server on behalf of the token owner.
    async fn update_profile(&self, token: &str, update: &UserProfileUpdate) -> Result<()>;
}

pub struct ClientImpl {
    base_url: String,
    client: reqwest::Client,
}

impl ClientImpl {
    fn new(base_url: String, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub fn create(base_url: String) -> impl Client {
    ClientImpl::new(base_url, reqwest::Client::new())
}

pub fn create_with_timeout(base_url: String, timeout: Duration) -> Result<impl Client> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|_| Error::CommunicationError)?;
    Ok(ClientImpl::new(base_url, client))
}

fn send_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout
    } else {
        Error::CommunicationError
    }
}

fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status == StatusCode::UNAUTHORIZED {
        Err(Error::Unauthorized)
    } else if status.is_client_error() {
        Err(Error::RequestError)
    } else if status.is_server_error() {
        Err(Error::InternalServerError)
    } else {
        Ok(resp)
    }
}

#[async_trait]
impl Client for ClientImpl {
    async fn compute_intake(&self, measurements: &UserMeasurements) -> Result<CalorieIntakeResult> {
        debug!("Requesting daily calorie intake for {:?}", measurements);
        self.client
            .post(self.url(INTAKE_PATH))
            .json(measurements)
            .send()
            .await
            .map_err(send_error)
            .and_then(check_status)?
            .json()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout
                } else {
                    Error::ResponseError
                }
            })
    }

    async fn update_profile(&self, token: &str, update: &UserProfileUpdate) -> Result<()> {
        debug!("Updating user profile");
        self.client
            .post(self.url(PROFILE_UPDATE_PATH))
            .bearer_auth(token)
            .json(update)
            .send()
            .await
            .map_err(send_error)
            .and_then(check_status)?;
        Ok(())
    }
}

mod client;

pub use client::{
    create, create_with_timeout, Client, ClientImpl, Error, MockClient, Result,
    DEFAULT_BASE_URL, INTAKE_PATH, PROFILE_UPDATE_PATH,
};

//! In-process stand-in for the account API.

use std::sync::Arc;

use parking_lot::Mutex;
use store::{Cookie, CookieStore, MemoryCookies, Profile};
use tokio::sync::Notify;

use crate::client::ProfileApi;
use crate::error::ApiError;

/// A jar holding `pairs`, as if they had been set on an earlier visit.
pub fn cookies_with(pairs: &[(&'static str, &'static str)]) -> MemoryCookies {
    let cookies = MemoryCookies::new();
    for (name, value) in pairs {
        cookies.set(Cookie::new(*name, *value));
    }
    cookies
}

#[derive(Clone, Debug)]
enum ProfileReply {
    Profile(Profile),
    Status(u16),
    Malformed,
}

#[derive(Debug)]
struct FakeState {
    reply: ProfileReply,
    logout_status: Option<u16>,
    profile_calls: usize,
    logout_calls: usize,
    last_token: Option<String>,
    gate: Option<Arc<Notify>>,
}

/// Answers profile and logout calls from canned replies and counts them.
#[derive(Clone, Debug)]
pub struct FakeProfileApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeProfileApi {
    fn with_reply(reply: ProfileReply) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                reply,
                logout_status: None,
                profile_calls: 0,
                logout_calls: 0,
                last_token: None,
                gate: None,
            })),
        }
    }

    pub fn returning(profile: Profile) -> Self {
        Self::with_reply(ProfileReply::Profile(profile))
    }

    pub fn failing(status: u16) -> Self {
        Self::with_reply(ProfileReply::Status(status))
    }

    pub fn malformed() -> Self {
        Self::with_reply(ProfileReply::Malformed)
    }

    pub fn with_logout_status(self, status: u16) -> Self {
        self.state.lock().logout_status = Some(status);
        self
    }

    /// Hold every profile reply until `gate` is notified.
    pub fn gated(self, gate: Arc<Notify>) -> Self {
        self.state.lock().gate = Some(gate);
        self
    }

    pub fn profile_calls(&self) -> usize {
        self.state.lock().profile_calls
    }

    pub fn logout_calls(&self) -> usize {
        self.state.lock().logout_calls
    }

    pub fn last_token(&self) -> Option<String> {
        self.state.lock().last_token.clone()
    }
}

impl ProfileApi for FakeProfileApi {
    async fn get_my_profile(&self, token: &str) -> Result<Profile, ApiError> {
        let gate = {
            let mut state = self.state.lock();
            state.profile_calls += 1;
            state.last_token = Some(token.to_string());
            state.gate.clone()
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let state = self.state.lock();
        match &state.reply {
            ProfileReply::Profile(profile) => Ok(profile.clone()),
            ProfileReply::Status(status) => Err(ApiError::Status(*status)),
            ProfileReply::Malformed => Err(ApiError::MalformedProfile(
                "user level not found".to_string(),
            )),
        }
    }

    async fn log_out(&self, token: &str) -> Result<(), ApiError> {
        let mut state = self.state.lock();
        state.logout_calls += 1;
        state.last_token = Some(token.to_string());
        match state.logout_status {
            Some(status) => Err(ApiError::Status(status)),
            None => Ok(()),
        }
    }
}

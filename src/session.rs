//! Active-user selector
//!
//! The set of users is a closed enumeration. A [`Session`] owns every user's
//! data and the currently selected id; commands receive it explicitly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};

use crate::behavior::BehaviorProfile;
use crate::types::{Holding, Order, Position};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserId {
    #[default]
    #[serde(rename = "u1")]
    JohnDoe,
    #[serde(rename = "u2")]
    SarahParker,
    #[serde(rename = "u3")]
    DavidMorgan,
}

impl UserId {
    pub const ALL: [UserId; 3] = [UserId::JohnDoe, UserId::SarahParker, UserId::DavidMorgan];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserId::JohnDoe => "u1",
            UserId::SarahParker => "u2",
            UserId::DavidMorgan => "u3",
        }
    }

    /// Parse a wire id ("u1"). Unknown ids give `None`.
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.as_str() == id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub avatar_initials: String,
    pub kyc_verified: bool,
    pub client_id: String,
}

impl UserProfile {
    pub fn new(id: UserId, name: &str, avatar_initials: &str, kyc_verified: bool, client_id: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            avatar_initials: avatar_initials.to_string(),
            kyc_verified,
            client_id: client_id.to_string(),
        }
    }
}

/// Everything shown for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    pub profile: UserProfile,
    #[serde(default)]
    pub holdings: Vec<Holding>,
    #[serde(default)]
    pub positions: Vec<Position>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub behavior: Option<BehaviorProfile>,
}

impl UserData {
    /// A user with no account activity
    pub fn empty(profile: UserProfile) -> Self {
        Self {
            profile,
            holdings: Vec::new(),
            positions: Vec::new(),
            orders: Vec::new(),
            behavior: None,
        }
    }
}

/// Entry of the user switcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub avatar_initials: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    users: HashMap<UserId, UserData>,
    active: UserId,
}

impl Session {
    /// Build a session over `users`. Any id of the closed set that has no
    /// data gets an empty account so the current user always resolves.
    pub fn new(users: impl IntoIterator<Item = UserData>, active: UserId) -> Self {
        let mut by_id: HashMap<UserId, UserData> =
            users.into_iter().map(|u| (u.profile.id, u)).collect();

        for id in UserId::ALL {
            by_id.entry(id).or_insert_with(|| {
                warn!("No fixture data for user {}, using an empty account", id);
                UserData::empty(UserProfile::new(id, id.as_str(), "", false, ""))
            });
        }

        Self {
            users: by_id,
            active,
        }
    }

    pub fn active_id(&self) -> UserId {
        self.active
    }

    pub fn current_user(&self) -> &UserData {
        &self.users[&self.active]
    }

    /// Switch to the user with wire id `id`. Unknown ids leave the session
    /// unchanged and return false.
    pub fn switch_user(&mut self, id: &str) -> bool {
        match UserId::parse(id) {
            Some(user) => {
                self.active = user;
                info!("Switched active user to {}", user);
                true
            }
            None => {
                warn!("Ignoring switch to unknown user '{}'", id);
                false
            }
        }
    }

    pub fn available_users(&self) -> Vec<UserSummary> {
        UserId::ALL
            .iter()
            .map(|id| {
                let profile = &self.users[id].profile;
                UserSummary {
                    id: *id,
                    name: profile.name.clone(),
                    avatar_initials: profile.avatar_initials.clone(),
                }
            })
            .collect()
    }
}

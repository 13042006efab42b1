use crate::domain::Role;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Route {
    Login,
    VolunteerHome,
    NgoHome,
    VolunteerDetail(i64),
}

impl Route {
    /// Landing page after authentication. Only volunteers get their own
    /// area; every other role, known or not, lands on the NGO dashboard.
    pub const fn landing_for(role: &Role) -> Self {
        match role {
            Role::Volunteer => Self::VolunteerHome,
            Role::Ngo | Role::Other(_) => Self::NgoHome,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::VolunteerHome => "/volunteer".to_string(),
            Self::NgoHome => "/ngo".to_string(),
            Self::VolunteerDetail(id) => format!("/ngo/volunteer/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.path()
    }
}

//! REST routes issued by the member overlay

use std::fmt;

use guild_core::Snowflake;

/// HTTP method of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Method plus path, relative to the API base URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    pub method: Method,
    pub path: String,
}

impl Route {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    /// `PUT guilds/{guild_id}/bans/{user_id}`
    pub fn create_ban(guild_id: Snowflake, user_id: Snowflake) -> Self {
        Self::new(Method::Put, format!("guilds/{guild_id}/bans/{user_id}"))
    }

    /// `PATCH guilds/{guild_id}/members/@me/nick`
    ///
    /// Only ever used for the acting identity; it needs a different
    /// permission than [`Route::modify_member`].
    pub fn modify_own_nick(guild_id: Snowflake) -> Self {
        Self::new(Method::Patch, format!("guilds/{guild_id}/members/@me/nick"))
    }

    /// `PATCH guilds/{guild_id}/members/{user_id}`
    pub fn modify_member(guild_id: Snowflake, user_id: Snowflake) -> Self {
        Self::new(Method::Patch, format!("guilds/{guild_id}/members/{user_id}"))
    }

    /// `DELETE guilds/{guild_id}/members/{user_id}`
    pub fn remove_member(guild_id: Snowflake, user_id: Snowflake) -> Self {
        Self::new(Method::Delete, format!("guilds/{guild_id}/members/{user_id}"))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

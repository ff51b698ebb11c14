//! Domain entities related to a guild member

mod activity;
mod ban;
mod guild;
mod presence;
mod role;
mod user;

pub use activity::{Activity, ActivityType};
pub use ban::Ban;
pub use guild::Guild;
pub use presence::{read_status, ClientStatus, Presence, UserStatus};
pub use role::{Role, RoleRef};
pub use user::User;

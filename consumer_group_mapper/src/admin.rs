mod admin_wrapper;
mod group_description;
mod groups_admin;
mod member_assignment;

pub use admin_wrapper::*;
pub use group_description::*;
pub use groups_admin::*;
pub use member_assignment::*;

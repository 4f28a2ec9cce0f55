//! Custom request extractors.

mod current_user;
mod path;
mod validated_json;

pub use current_user::AdminUser;
pub use path::Path;
pub use validated_json::ValidatedJson;

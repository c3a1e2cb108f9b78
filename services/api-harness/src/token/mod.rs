//! Token lifecycle manager.

mod lifecycle;
mod rejection;
mod variants;

pub use lifecycle::{
    Credentials, GET_ACCESS_TOKEN_PATH, GET_REFRESH_TOKEN_PATH, REFRESH_REFRESH_TOKEN_PATH,
    Session, get_access_token, get_access_token_endpoint, get_refresh_token,
    get_refresh_token_endpoint, refresh_refresh_token_endpoint, rotate_refresh_token,
};
pub use rejection::{RejectionCase, rejection_cases, run_rejection};
pub use variants::{as_reused, as_wrong_kind};

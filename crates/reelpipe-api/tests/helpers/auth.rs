use super::TEST_JWT_SECRET;
use chrono::Duration;
use reelpipe_api::auth::JwtService;
use uuid::Uuid;

/// Bearer token for `user_id`, valid for an hour.
pub fn token_for(user_id: Uuid) -> String {
    JwtService::new(TEST_JWT_SECRET)
        .issue_token(user_id, Duration::hours(1))
        .expect("Failed to sign token")
}

pub fn expired_token_for(user_id: Uuid) -> String {
    JwtService::new(TEST_JWT_SECRET)
        .issue_token(user_id, Duration::hours(-1))
        .expect("Failed to sign token")
}

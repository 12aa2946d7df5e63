pub const DEFAULT_POLICY_BASE_URL: &str = "https://internal.circleci.com";
pub const DEFAULT_HOST: &str = "https://circleci.com";
pub const DEFAULT_ENDPOINT: &str = "graphql-unstable";
pub const DEFAULT_CONTEXT: &str = "config";
pub const USER_AGENT: &str = concat!("regent/", env!("CARGO_PKG_VERSION"));

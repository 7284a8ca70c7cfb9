pub static GENERATE_CONTENT_PATH: &str = "/v1beta/models";
pub static API_KEY_HEADER: &str = "x-goog-api-key";

pub const TEMPERATURE: f32 = 0.7;
pub const MAX_OUTPUT_TOKENS: u32 = 1024;

pub static CONNECTION_TEST_PROMPT: &str = "Hello, world!";
pub const CONNECTION_TEST_MAX_OUTPUT_TOKENS: u32 = 10;
